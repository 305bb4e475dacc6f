use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Reasons a guard rejects a request. Every variant ends the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credentials, or a verified token without a payload.
    #[error("{message}")]
    Unauthenticated { message: String },

    /// `Authorization` present but not `Bearer <token>`.
    #[error("{message}")]
    MalformedCredentials { message: String },

    /// Signature, expiry or encoding check failed. `detail` is the verifier's
    /// description of the failure and never contains the token.
    #[error("{message}")]
    InvalidToken { message: String, detail: String },

    /// Valid identity without the required role or active flag.
    #[error("{message}")]
    Forbidden { message: String },

    /// Strict guards only: the token is not a well-formed JWT.
    #[error("{message}")]
    BadRequest { message: String },
}

impl AuthError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedCredentials { message: message.into() }
    }

    pub fn invalid_token(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    pub fn message(&self) -> &str {
        match self {
            AuthError::Unauthenticated { message }
            | AuthError::MalformedCredentials { message }
            | AuthError::InvalidToken { message, .. }
            | AuthError::Forbidden { message }
            | AuthError::BadRequest { message } => message,
        }
    }

    /// Short machine-readable name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated { .. } => "unauthenticated",
            AuthError::MalformedCredentials { .. } => "malformed_credentials",
            AuthError::InvalidToken { .. } => "invalid_token",
            AuthError::Forbidden { .. } => "forbidden",
            AuthError::BadRequest { .. } => "bad_request",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthErrorBody<'a> {
    status_code: u16,
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated { .. }
            | AuthError::MalformedCredentials { .. }
            | AuthError::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let detail = match self {
            AuthError::InvalidToken { detail, .. } => Some(detail.as_str()),
            _ => None,
        };

        HttpResponse::build(status).json(AuthErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error"),
            message: self.message(),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(AuthError::unauthenticated("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::malformed("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::invalid_token("x", "y").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn display_is_the_message() {
        let err = AuthError::invalid_token("Token couldnt verificate!", "jwt expired");
        assert_eq!(err.to_string(), "Token couldnt verificate!");
        assert_eq!(err.kind(), "invalid_token");
    }
}
