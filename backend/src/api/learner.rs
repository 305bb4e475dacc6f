use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, web, HttpResponse};
use log::{debug, info};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::api::response;
use crate::auth::{AuthIdentity, JwtAuth, LearnerIdentity, RoleGuard};
use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::models::entities::learner::Column as LearnerColumn;
use crate::models::entities::{Learner, LearnerResponseDto};

/// `/learner/me` is behind the learner guard (learner signing key, active
/// learners only). Everything else under `/learner` is admin management.
pub fn scope(auth: &AuthConfig) -> impl HttpServiceFactory {
    web::scope("/learner")
        .service(
            web::resource("/me")
                .wrap(JwtAuth::learner(auth))
                .route(web::get().to(me)),
        )
        .service(
            web::scope("")
                .wrap(RoleGuard::admin())
                .wrap(JwtAuth::authenticated(auth))
                .service(find_all)
                .service(find_one)
                .service(remove),
        )
}

// Profile of the learner the token was issued to
pub async fn me(
    db: web::Data<DatabaseConnection>,
    learner: LearnerIdentity,
) -> Result<HttpResponse, ApiError> {
    let id = learner.subject_id().ok_or(ApiError::NotFound("Learner"))?;
    debug!("Learner {} is fetching own profile", id);

    let learner = Learner::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or(ApiError::NotFound("Learner"))?;

    Ok(response::ok(
        "Learner fetched successfully",
        LearnerResponseDto::from(learner),
    ))
}

#[get("")]
pub async fn find_all(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let learners: Vec<LearnerResponseDto> = Learner::find()
        .order_by_asc(LearnerColumn::Id)
        .all(db.get_ref())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(response::ok("Learners fetched successfully", learners))
}

#[get("/{id}")]
pub async fn find_one(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let learner = Learner::find_by_id(path.into_inner())
        .one(db.get_ref())
        .await?
        .ok_or(ApiError::NotFound("Learner"))?;

    Ok(response::ok(
        "Learner fetched successfully",
        LearnerResponseDto::from(learner),
    ))
}

#[delete("/{id}")]
pub async fn remove(
    db: web::Data<DatabaseConnection>,
    identity: AuthIdentity,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let result = Learner::delete_by_id(id).exec(db.get_ref()).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Learner"));
    }

    info!("Learner {} deleted by {:?}", id, identity.sub);
    Ok(response::ok_message("Learner deleted successfully"))
}
