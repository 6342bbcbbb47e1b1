use std::path::PathBuf;

use annotater_core::config::{env_lookup, parse_var, ConfigError};

/// Locations of the document and report blob trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub document_root: PathBuf,
    /// Appended to the document id, including the leading dot.
    pub document_ext: String,
    pub report_root: PathBuf,
    pub report_ext: String,
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var         | Default            |
    /// |-----------------|--------------------|
    /// | `DOCUMENT_ROOT` | `./data/documents` |
    /// | `DOCUMENT_EXT`  | `.pdf`             |
    /// | `REPORT_ROOT`   | `./data/reports`   |
    /// | `REPORT_EXT`    | `.pdf`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            document_root: parse_var(lookup, "DOCUMENT_ROOT", "./data/documents")?,
            document_ext: extension(parse_var(lookup, "DOCUMENT_EXT", ".pdf")?),
            report_root: parse_var(lookup, "REPORT_ROOT", "./data/reports")?,
            report_ext: extension(parse_var(lookup, "REPORT_EXT", ".pdf")?),
        })
    }
}

/// Accept both `pdf` and `.pdf`; an empty value means no extension.
fn extension(raw: String) -> String {
    if raw.is_empty() || raw.starts_with('.') {
        raw
    } else {
        format!(".{raw}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = StorageConfig::from_lookup(&|_: &str| None).unwrap();
        assert_eq!(config.document_root, PathBuf::from("./data/documents"));
        assert_eq!(config.document_ext, ".pdf");
        assert_eq!(config.report_root, PathBuf::from("./data/reports"));
    }

    #[test]
    fn extension_gets_leading_dot() {
        let config = StorageConfig::from_lookup(&|var: &str| match var {
            "REPORT_EXT" => Some("report".to_string()),
            "DOCUMENT_ROOT" => Some("/srv/docs".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.report_ext, ".report");
        assert_eq!(config.document_root, PathBuf::from("/srv/docs"));
    }
}
