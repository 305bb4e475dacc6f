use std::env;

use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Keys and parameters the guards verify tokens with. Loaded once at
/// startup; guards never read the environment themselves.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub access_token_key: String,
    pub admin_access_token_key: String,
    pub learner_access_token_key: String,
    pub leeway_seconds: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl AuthConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token_key = required(&lookup, "ACCESS_TOKEN_KEY")?;

        // Admin tokens were historically signed with the shared access key
        let admin_access_token_key = match non_empty(lookup("ADMIN_ACCESS_TOKEN_KEY")) {
            Some(key) => key,
            None => {
                info!("ADMIN_ACCESS_TOKEN_KEY not set, admin guard uses ACCESS_TOKEN_KEY");
                access_token_key.clone()
            }
        };

        let learner_access_token_key = required(&lookup, "LEARNER_ACCESS_TOKEN_KEY")?;

        let leeway_seconds = match non_empty(lookup("TOKEN_LEEWAY_SECONDS")) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        Ok(Self {
            access_token_key,
            admin_access_token_key,
            learner_access_token_key,
            leeway_seconds,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let host = non_empty(lookup("HOST")).unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match non_empty(lookup("PORT")) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };
        let cors_origin = non_empty(lookup("CORS_ORIGIN")).unwrap_or_else(|| {
            warn!("CORS_ORIGIN not set, allowing any origin");
            "*".to_string()
        });

        Ok(Self {
            database_url,
            host,
            port,
            cors_origin,
            auth: AuthConfig::from_lookup(lookup)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(key)).ok_or(ConfigError::Missing(key))
}
