//! Deployment configuration with TOML file support.

use crate::logging::{init_logging, LogFormat};
use quad_types::{ChamberParams, ParamsError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("invalid {chamber} chamber parameters: {source}")]
    Invalid {
        chamber: &'static str,
        source: ParamsError,
    },
}

/// Parameters of both chambers plus logging.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`]
/// or built programmatically (e.g. for tests). Every field falls back to
/// the originally deployed values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Single-asset chamber.
    #[serde(default = "default_upper")]
    pub upper: ChamberParams,

    /// Multi-asset chamber.
    #[serde(default = "default_lower")]
    pub lower: ChamberParams,
}

fn default_upper() -> ChamberParams {
    ChamberParams::upper_defaults()
}

fn default_lower() -> ChamberParams {
    ChamberParams::lower_defaults()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// The upper chamber must take a bond; the lower chamber must not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let upper = |source| ConfigError::Invalid {
            chamber: "upper",
            source,
        };
        let lower = |source| ConfigError::Invalid {
            chamber: "lower",
            source,
        };
        self.upper.validate().map_err(upper)?;
        if self.upper.submission_bond_bips.is_none() {
            return Err(upper(ParamsError::MissingSubmissionBond));
        }
        self.lower.validate().map_err(lower)?;
        if self.lower.submission_bond_bips.is_some() {
            return Err(lower(ParamsError::UnexpectedSubmissionBond));
        }
        Ok(())
    }

    /// Install the global subscriber described by this config.
    pub fn init_logging(&self) -> bool {
        init_logging(self.log_format, &self.log_level)
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            upper: default_upper(),
            lower: default_lower(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = GovernanceConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = GovernanceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_deployed_defaults() {
        let config = GovernanceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.upper.quorum_bips, 500);
        assert_eq!(config.upper.submission_bond_bips, Some(500));
        assert_eq!(config.lower.quorum_bips, 2000);
        assert_eq!(config.lower.voting_window_secs, 48 * 3600);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            log_format = "json"

            [lower]
            quorum_bips = 1000
            majority_bips = 6000
            voting_window_secs = 3600
        "#;
        let config = GovernanceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.lower.quorum_bips, 1000);
        assert_eq!(config.lower.submission_bond_bips, None);
        assert_eq!(config.upper, ChamberParams::upper_defaults()); // default
    }

    #[test]
    fn upper_chamber_without_bond_is_rejected() {
        let toml = r#"
            [upper]
            quorum_bips = 500
            majority_bips = 5100
            voting_window_secs = 172800
        "#;
        let err = GovernanceConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                chamber: "upper",
                source: ParamsError::MissingSubmissionBond
            }
        ));
    }

    #[test]
    fn lower_chamber_with_bond_is_rejected() {
        let mut config = GovernanceConfig::default();
        config.lower.submission_bond_bips = Some(100);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                chamber: "lower",
                source: ParamsError::UnexpectedSubmissionBond
            })
        ));
    }

    #[test]
    fn out_of_range_bips_are_rejected() {
        let toml = r#"
            [lower]
            quorum_bips = 20000
            majority_bips = 5100
            voting_window_secs = 3600
        "#;
        assert!(matches!(
            GovernanceConfig::from_toml_str(toml),
            Err(ConfigError::Invalid { chamber: "lower", .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();
        let config = GovernanceConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn missing_file_returns_io_error() {
        let result = GovernanceConfig::from_toml_file("/nonexistent/quad.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
