#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error};
use jsonwebtoken::{encode, EncodingKey, Header};
use learnhub::{api, AuthConfig};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{json, Value};

pub const ACCESS_KEY: &str = "test_access_key_for_testing_purposes_only";
pub const LEARNER_KEY: &str = "test_learner_key_for_testing_purposes_only";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        access_token_key: ACCESS_KEY.to_string(),
        admin_access_token_key: ACCESS_KEY.to_string(),
        learner_access_token_key: LEARNER_KEY.to_string(),
        leeway_seconds: 0,
    }
}

pub fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn in_ten_minutes() -> i64 {
    chrono::Utc::now().timestamp() + 600
}

pub fn mint(payload: Value, key: &str) -> String {
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .expect("failed to sign test token")
}

pub fn admin_token() -> String {
    mint(json!({"sub": "1", "role": "admin", "exp": in_ten_minutes()}), ACCESS_KEY)
}

/// Learner token signed with the shared access key, as the generic guard expects.
pub fn learner_access_token() -> String {
    mint(
        json!({"sub": "7", "role": "learner", "is_active": true, "exp": in_ten_minutes()}),
        ACCESS_KEY,
    )
}

/// Learner token signed with the learner key.
pub fn learner_token(is_active: bool) -> String {
    mint(
        json!({"sub": "7", "role": "learner", "is_active": is_active, "exp": in_ten_minutes()}),
        LEARNER_KEY,
    )
}

pub fn expired_token(role: &str, key: &str) -> String {
    mint(
        json!({
            "sub": "1",
            "role": role,
            "is_active": true,
            "exp": chrono::Utc::now().timestamp() - 3600
        }),
        key,
    )
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub async fn init_app(
    db: DatabaseConnection,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
    let auth = auth_config();
    test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .configure(api::configure(&auth)),
    )
    .await
}

/// Run a request and return status plus JSON body, whether the rejection came
/// from a middleware (`Err`) or a handler (`Ok` with an error status).
pub async fn call<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    match app.call(req).await {
        Ok(resp) => {
            let status = resp.status();
            let body = test::read_body(resp).await;
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let body = actix_web::body::to_bytes(resp.into_body())
                .await
                .unwrap_or_default();
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
    }
}
