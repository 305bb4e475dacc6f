use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Learners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Learners::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Learners::FirstName).string().not_null())
                    .col(ColumnDef::new(Learners::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Learners::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Learners::CountryId).integer())
                    .col(
                        ColumnDef::new(Learners::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Learners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Learners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Deleting a country keeps its learners
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_learners_country_id")
                            .from(Learners::Table, Learners::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Learners::Table).to_owned())
            .await
    }
}

/// Reference to the "learners" table
#[derive(Iden)]
enum Learners {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    CountryId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Reference to the "countries" table for foreign key
#[derive(Iden)]
enum Countries {
    Table,
    Id,
}
