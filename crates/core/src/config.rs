//! Shared helpers for environment-driven configuration.
//!
//! Each adapter crate owns its config struct; this module only provides the
//! error type and the lookup/parse helper they share. Configs are built from
//! a lookup function so tests never touch the process environment.

use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Read `var` through `lookup`, falling back to `default` when unset, and
/// parse it into `T`.
pub fn parse_var<T, F>(lookup: &F, var: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value,
        reason: e.to_string(),
    })
}

/// Read a variable that has no default.
pub fn require_var<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing { var }),
    }
}

/// Lookup backed by the process environment.
pub fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}
