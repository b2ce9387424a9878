use std::env;
use std::path::Path;

use rowslope_parser::{LoaderOptions, DEFAULT_NAME_DELIMITER};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SLOPE_THRESHOLD_PERCENT: f64 = 5.0;

pub const ENV_SLOPE_THRESHOLD: &str = "ROWSLOPE_SLOPE_THRESHOLD";
pub const ENV_NAME_DELIMITER: &str = "ROWSLOPE_NAME_DELIMITER";
pub const ENV_FIELD_DELIMITER: &str = "ROWSLOPE_FIELD_DELIMITER";

/// Tunables for one analysis run.
///
/// Resolved in layers: defaults, then an optional TOML file, then
/// `ROWSLOPE_*` environment variables, then explicit overrides from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Slopes strictly above this percentage trigger an adjustment.
    pub slope_threshold_percent: f64,
    pub name_delimiter: char,
    pub field_delimiter: char,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            slope_threshold_percent: DEFAULT_SLOPE_THRESHOLD_PERCENT,
            name_delimiter: DEFAULT_NAME_DELIMITER,
            field_delimiter: ',',
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies `ROWSLOPE_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| env::var(key).ok())
    }

    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENV_SLOPE_THRESHOLD) {
            self.slope_threshold_percent =
                raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: ENV_SLOPE_THRESHOLD,
                    message: format!("'{raw}' is not a number"),
                })?;
        }
        if let Some(raw) = lookup(ENV_NAME_DELIMITER) {
            self.name_delimiter = single_char(ENV_NAME_DELIMITER, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FIELD_DELIMITER) {
            self.field_delimiter = single_char(ENV_FIELD_DELIMITER, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.slope_threshold_percent.is_finite() || self.slope_threshold_percent < 0.0 {
            return Err(ConfigError::Invalid {
                key: "slope_threshold_percent",
                message: format!(
                    "{} must be a finite, non-negative percentage",
                    self.slope_threshold_percent
                ),
            });
        }
        if !self.field_delimiter.is_ascii() {
            return Err(ConfigError::Invalid {
                key: "field_delimiter",
                message: format!("'{}' is not an ASCII character", self.field_delimiter),
            });
        }
        if self.field_delimiter == self.name_delimiter {
            return Err(ConfigError::Invalid {
                key: "name_delimiter",
                message: "name and field delimiters must differ".to_string(),
            });
        }
        Ok(())
    }

    /// Options for the table loaders. Fails on a config that does not
    /// validate, since the fields are public and may bypass the constructors.
    pub fn loader_options(&self) -> Result<LoaderOptions, ConfigError> {
        self.validate()?;
        let field_delimiter =
            u8::try_from(self.field_delimiter).map_err(|_| ConfigError::Invalid {
                key: "field_delimiter",
                message: format!("'{}' does not fit in one byte", self.field_delimiter),
            })?;
        Ok(LoaderOptions {
            name_delimiter: self.name_delimiter,
            field_delimiter,
        })
    }
}

fn single_char(key: &'static str, raw: &str) -> Result<char, ConfigError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(ConfigError::Invalid {
            key,
            message: format!("expected a single character, got '{raw}'"),
        }),
    }
}
