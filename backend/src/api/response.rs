use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// `{ statusCode, message, data? }` envelope used by the resource endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn respond<T: Serialize>(status: StatusCode, message: &str, data: Option<T>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse {
        status_code: status.as_u16(),
        message: message.to_string(),
        data,
    })
}

pub fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    respond(StatusCode::OK, message, Some(data))
}

pub fn created<T: Serialize>(message: &str, data: T) -> HttpResponse {
    respond(StatusCode::CREATED, message, Some(data))
}

pub fn ok_message(message: &str) -> HttpResponse {
    respond::<()>(StatusCode::OK, message, None)
}
