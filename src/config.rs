use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid settings document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Knobs of the semantic core. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// When false, operators are still typed and validated but never
    /// produce a folded constant.
    pub fold_constants: bool,
    /// Name that binds no variable, e.g. in named return lists.
    pub ignore_identifier: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fold_constants: true,
            ignore_identifier: "_".to_string(),
        }
    }
}

impl Settings {
    pub fn load(bytes: &[u8]) -> Result<Settings, ConfigError> {
        let settings = serde_json::from_slice(bytes)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings = Settings::load(br#"{"fold_constants": false}"#).unwrap();
        assert!(!settings.fold_constants);
        assert_eq!(settings.ignore_identifier, "_");
        assert_eq!(Settings::load(b"{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_document() {
        assert!(Settings::load(b"{ fold_constants: ").is_err());
    }
}
