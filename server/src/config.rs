//! Server configuration from environment variables.

use deening_core::ai::ConfigError;
use std::env;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Multipart uploads larger than this are rejected before they reach a handler.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bearer token every protected request must present.
    pub access_token: String,
    /// Postgres connection string. Without one, documents live in memory.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `ACCESS_TOKEN`: shared bearer token for protected routes
    ///
    /// Optional:
    /// - `DATABASE_URL`: Postgres connection string
    /// - `DEENING_BIND_ADDR`: listen address (default: 0.0.0.0:3000)
    /// - `DEENING_MAX_UPLOAD_BYTES`: upload size limit (default: 10 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_token = env::var("ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("ACCESS_TOKEN".to_string()))?;

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let bind_addr =
            env::var("DEENING_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let max_upload_bytes = match env::var("DEENING_MAX_UPLOAD_BYTES") {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|bytes| *bytes > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "DEENING_MAX_UPLOAD_BYTES".to_string(),
                    value,
                })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            access_token,
            database_url,
            bind_addr,
            max_upload_bytes,
        })
    }

    /// Configuration for tests and local tooling: in-memory store, default limits.
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
