pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;

pub use config::{AppConfig, AuthConfig};
pub use error::ApiError;
