use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, patch, post, web, HttpResponse};
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::api::response;
use crate::auth::{AuthIdentity, JwtAuth, RoleGuard};
use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::models::entities::country::Column as CountryColumn;
use crate::models::entities::{
    Country, CountryActiveModel, CountryModel, CountryResponseDto, CreateCountryDto,
    UpdateCountryDto,
};

/// `/country`: every route needs a valid token, writes additionally need the
/// admin role.
pub fn scope(auth: &AuthConfig) -> impl HttpServiceFactory {
    web::scope("/country")
        .wrap(JwtAuth::authenticated(auth))
        .service(create)
        .service(find_all)
        .service(find_by_name)
        .service(find_one)
        .service(update)
        .service(remove)
}

fn validate_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

async fn find_country(db: &DatabaseConnection, id: i32) -> Result<CountryModel, ApiError> {
    Country::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("Country"))
}

// Create a country
#[post("", wrap = "RoleGuard::admin()")]
pub async fn create(
    db: web::Data<DatabaseConnection>,
    identity: AuthIdentity,
    payload: web::Json<CreateCountryDto>,
) -> Result<HttpResponse, ApiError> {
    let name = validate_name(&payload.name)?;
    let now = Utc::now();

    let country = CountryActiveModel {
        id: NotSet,
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db.get_ref())
    .await?;

    info!("Country {} created by {:?}", country.id, identity.sub);
    Ok(response::created(
        "Country created successfully",
        CountryResponseDto::from(country),
    ))
}

// Get all countries
#[get("")]
pub async fn find_all(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let countries: Vec<CountryResponseDto> = Country::find()
        .order_by_asc(CountryColumn::Id)
        .all(db.get_ref())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(response::ok("Countries fetched successfully", countries))
}

// Get a country by ID
#[get("/{id}")]
pub async fn find_one(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let country = find_country(db.get_ref(), path.into_inner()).await?;
    Ok(response::ok(
        "Country fetched successfully",
        CountryResponseDto::from(country),
    ))
}

// Get a country by exact name
#[get("/name/{name}")]
pub async fn find_by_name(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let country = Country::find()
        .filter(CountryColumn::Name.eq(path.into_inner()))
        .one(db.get_ref())
        .await?
        .ok_or(ApiError::NotFound("Country"))?;

    Ok(response::ok(
        "Country fetched successfully by name",
        CountryResponseDto::from(country),
    ))
}

// Update a country
#[patch("/{id}", wrap = "RoleGuard::admin()")]
pub async fn update(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    payload: web::Json<UpdateCountryDto>,
) -> Result<HttpResponse, ApiError> {
    let country = find_country(db.get_ref(), path.into_inner()).await?;

    let mut active: CountryActiveModel = country.into();
    if let Some(name) = &payload.name {
        active.name = Set(validate_name(name)?);
    }
    active.updated_at = Set(Utc::now());

    let country = active.update(db.get_ref()).await?;
    Ok(response::ok(
        "Country updated successfully",
        CountryResponseDto::from(country),
    ))
}

// Delete a country
#[delete("/{id}", wrap = "RoleGuard::admin()")]
pub async fn remove(
    db: web::Data<DatabaseConnection>,
    identity: AuthIdentity,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let result = Country::delete_by_id(id).exec(db.get_ref()).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Country"));
    }

    info!("Country {} deleted by {:?}", id, identity.sub);
    Ok(response::ok_message("Country deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(validate_name("  Uzbekistan ").unwrap(), "Uzbekistan");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(validate_name("   "), Err(ApiError::Validation(_))));
    }
}
