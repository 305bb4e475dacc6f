use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "learners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub country_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id"
    )]
    Country,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LearnerResponseDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_id: Option<i32>,
    pub is_active: bool,
}

impl From<Model> for LearnerResponseDto {
    fn from(learner: Model) -> Self {
        Self {
            id: learner.id,
            first_name: learner.first_name,
            last_name: learner.last_name,
            email: learner.email,
            country_id: learner.country_id,
            is_active: learner.is_active,
        }
    }
}
