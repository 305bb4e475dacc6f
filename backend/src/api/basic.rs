use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;

const SERVICE: &str = "LearnHub API";

#[derive(Serialize)]
struct ServiceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
}

impl ServiceInfo {
    fn new() -> Self {
        Self {
            message: None,
            status: None,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: None,
        }
    }
}

/// Unguarded landing route.
#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        message: Some(format!("Welcome to {}", SERVICE)),
        ..ServiceInfo::new()
    })
}

/// Liveness probe; never touches the token guards.
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        status: Some("ok"),
        timestamp: Some(Utc::now().timestamp()),
        ..ServiceInfo::new()
    })
}
