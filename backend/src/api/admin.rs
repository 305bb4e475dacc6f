use actix_web::dev::HttpServiceFactory;
use actix_web::{get, web, HttpResponse};
use log::warn;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::api::response;
use crate::auth::{AdminIdentity, JwtAuth};
use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::models::entities::{Admin, AdminResponseDto};

/// `/admin`: behind the admin token guard.
pub fn scope(auth: &AuthConfig) -> impl HttpServiceFactory {
    web::scope("/admin")
        .wrap(JwtAuth::admin(auth))
        .service(me)
}

// Profile of the admin the token was issued to
#[get("/me")]
pub async fn me(
    db: web::Data<DatabaseConnection>,
    admin: AdminIdentity,
) -> Result<HttpResponse, ApiError> {
    let Some(id) = admin.subject_id() else {
        warn!("Admin token without a numeric sub");
        return Err(ApiError::NotFound("Admin"));
    };

    let admin = Admin::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or(ApiError::NotFound("Admin"))?;

    Ok(response::ok(
        "Admin fetched successfully",
        AdminResponseDto::from(admin),
    ))
}
