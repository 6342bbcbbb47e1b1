use std::time::Duration;

use annotater_core::config::{env_lookup, parse_var, ConfigError};

/// Where the inference model lives and how long a prediction may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Base URL without a trailing slash.
    pub model_url: String,
    pub timeout_secs: u64,
}

impl ModelConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                 |
    /// |----------------------|-------------------------|
    /// | `MODEL_URL`          | `http://localhost:8000` |
    /// | `MODEL_TIMEOUT_SECS` | `120`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_url: String = parse_var(lookup, "MODEL_URL", "http://localhost:8000")?;
        if !model_url.starts_with("http://") && !model_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "MODEL_URL",
                value: model_url,
                reason: "expected an http(s) URL".into(),
            });
        }
        Ok(Self {
            model_url: model_url.trim_end_matches('/').to_string(),
            timeout_secs: parse_var(lookup, "MODEL_TIMEOUT_SECS", "120")?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
