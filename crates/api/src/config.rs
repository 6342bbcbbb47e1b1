use annotater_core::config::{env_lookup, parse_var, ConfigError};
use annotater_detection::ModelConfig;
use annotater_storage::StorageConfig;
use axum::http::HeaderValue;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The blob store
/// and model settings are loaded alongside and nested here.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `120`). Bounds a whole
    /// document run including the model call.
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes (default: 50 MiB).
    pub max_upload_bytes: usize,
    pub storage: StorageConfig,
    pub model: ModelConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                   |
    /// | `MAX_UPLOAD_BYTES`     | `52428800`              |
    ///
    /// See [`StorageConfig::from_env`] and [`ModelConfig::from_env`] for the
    /// nested settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_origins: String = parse_var(lookup, "CORS_ORIGINS", "http://localhost:5173")?;
        let cors_origins = raw_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            host: parse_var(lookup, "HOST", "0.0.0.0")?,
            port: parse_var(lookup, "PORT", "3000")?,
            cors_origins,
            request_timeout_secs: parse_var(lookup, "REQUEST_TIMEOUT_SECS", "120")?,
            max_upload_bytes: parse_var(lookup, "MAX_UPLOAD_BYTES", "52428800")?,
            storage: StorageConfig::from_lookup(lookup)?,
            model: ModelConfig::from_lookup(lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_load_without_environment() {
        let config = ServerConfig::from_lookup(&|_: &str| None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec![HeaderValue::from_static("http://localhost:5173")]);
        assert_eq!(config.storage.document_ext, ".pdf");
        assert_eq!(config.model.model_url, "http://localhost:8000");
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = ServerConfig::from_lookup(&|var: &str| {
            (var == "CORS_ORIGINS").then(|| "http://a.test, http://b.test,".to_string())
        })
        .unwrap();
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "http://b.test");
    }

    #[test]
    fn invalid_port_is_config_error() {
        let result = ServerConfig::from_lookup(&|var: &str| {
            (var == "PORT").then(|| "70000".to_string())
        });
        assert_matches!(result, Err(ConfigError::Invalid { var: "PORT", .. }));
    }
}
