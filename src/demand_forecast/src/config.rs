//! Run configuration: TOML file, environment, and command-line overrides.
//!
//! Resolution order for every key is flag > environment > file > default. The
//! binary folds `DATABASE_URL` into the flag layer (clap `env`), so this module
//! only merges two layers.
//!
//! ```toml
//! database_url = "sqlite://data/sales.db"
//! min_days = 2
//! horizon = 30
//! ```
//!
//! Entrypoints:
//! - Parse from a TOML string: [`load_config_str`]
//! - Parse from a file path: [`load_config_path`]
//! - Merge and validate: [`Config::resolve`]

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Environment variable naming the backing store.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Fewest distinct observed days an item needs before it is forecast.
pub const DEFAULT_MIN_DAYS: usize = 2;
/// Number of future periods summed into one prediction.
pub const DEFAULT_HORIZON: usize = 30;
/// Largest accepted `min_days` (one hundred years of days).
pub const MAX_MIN_DAYS: usize = 36_500;
/// Largest accepted `horizon` (ten years of days).
pub const MAX_HORIZON: usize = 3_650;

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Connection target for the record store.
    pub database_url: Option<String>,
    /// Minimum number of distinct days of history.
    pub min_days: Option<usize>,
    /// Forecast horizon in periods.
    pub horizon: Option<usize>,
}

/// Values supplied on the command line (or via environment through clap).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Connection target for the record store.
    pub database_url: Option<String>,
    /// Minimum number of distinct days of history.
    pub min_days: Option<usize>,
    /// Forecast horizon in periods.
    pub horizon: Option<usize>,
}

/// Tunables of the trend forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastSettings {
    /// Items with fewer distinct days are reported as insufficient.
    pub min_days: usize,
    /// Number of future day-numbers projected and summed.
    pub horizon: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            min_days: DEFAULT_MIN_DAYS,
            horizon: DEFAULT_HORIZON,
        }
    }
}

impl ForecastSettings {
    /// Require `1 <= min_days <= MAX_MIN_DAYS` and `1 <= horizon <= MAX_HORIZON`.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_MIN_DAYS).contains(&self.min_days) {
            return Err(ForecastError::Configuration(format!(
                "min_days must be between 1 and {MAX_MIN_DAYS}, got {}",
                self.min_days
            )));
        }
        if !(1..=MAX_HORIZON).contains(&self.horizon) {
            return Err(ForecastError::Configuration(format!(
                "horizon must be between 1 and {MAX_HORIZON}, got {}",
                self.horizon
            )));
        }
        Ok(())
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Trimmed, non-empty connection target.
    pub database_url: String,
    /// Forecaster tunables.
    pub forecast: ForecastSettings,
}

impl Config {
    /// Merge the file layer under the overrides and validate the result.
    ///
    /// Errors:
    /// - [`ForecastError::Configuration`] when no non-empty database URL is present
    /// - [`ForecastError::Configuration`] when `min_days` or `horizon` is zero
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self> {
        let database_url = overrides
            .database_url
            .or(file.database_url)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                ForecastError::Configuration(format!("{DATABASE_URL_ENV} not set"))
            })?;

        let forecast = ForecastSettings {
            min_days: overrides
                .min_days
                .or(file.min_days)
                .unwrap_or(DEFAULT_MIN_DAYS),
            horizon: overrides.horizon.or(file.horizon).unwrap_or(DEFAULT_HORIZON),
        };
        forecast.validate()?;

        Ok(Self {
            database_url,
            forecast,
        })
    }
}

/// Parse a configuration from a TOML string.
pub fn load_config_str(toml_str: &str) -> Result<ConfigFile> {
    toml::from_str(toml_str)
        .map_err(|e| ForecastError::Configuration(format!("failed to parse config TOML: {e}")))
}

/// Read a configuration TOML file from disk and parse it.
pub fn load_config_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        ForecastError::Configuration(format!("read config file {}: {e}", path.display()))
    })?;
    load_config_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn defaults_apply_when_only_url_given() {
        let cfg = Config::resolve(
            ConfigFile::default(),
            Overrides {
                database_url: url("sales.db"),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cfg.database_url, "sales.db");
        assert_eq!(cfg.forecast, ForecastSettings::default());
        assert_eq!(cfg.forecast.min_days, 2);
        assert_eq!(cfg.forecast.horizon, 30);
    }

    #[test]
    fn overrides_win_over_file() {
        let file = load_config_str(
            r#"
            database_url = "file.db"
            min_days = 5
            horizon = 7
            "#,
        )
        .unwrap();
        let cfg = Config::resolve(
            file,
            Overrides {
                database_url: url("flag.db"),
                min_days: None,
                horizon: Some(14),
            },
        )
        .unwrap();
        assert_eq!(cfg.database_url, "flag.db");
        assert_eq!(cfg.forecast.min_days, 5);
        assert_eq!(cfg.forecast.horizon, 14);
    }

    #[test]
    fn missing_url_is_configuration_error() {
        let err = Config::resolve(ConfigFile::default(), Overrides::default()).unwrap_err();
        assert!(matches!(err, ForecastError::Configuration(_)));
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }

    #[test]
    fn blank_url_is_configuration_error() {
        let err = Config::resolve(
            ConfigFile {
                database_url: url("   "),
                ..Default::default()
            },
            Overrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ForecastError::Configuration(_)));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let err = Config::resolve(
            ConfigFile::default(),
            Overrides {
                database_url: url("sales.db"),
                horizon: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("horizon"));
    }

    #[test]
    fn oversized_settings_are_rejected() {
        let too_far = ForecastSettings {
            min_days: 2,
            horizon: usize::MAX,
        };
        let err = too_far.validate().unwrap_err();
        assert!(matches!(err, ForecastError::Configuration(_)));
        assert!(err.to_string().contains("horizon must be between 1 and 3650"));

        let too_strict = ForecastSettings {
            min_days: MAX_MIN_DAYS + 1,
            horizon: 30,
        };
        assert!(too_strict.validate().is_err());

        let edge = ForecastSettings {
            min_days: MAX_MIN_DAYS,
            horizon: MAX_HORIZON,
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_config_str("databse_url = \"typo.db\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config TOML"));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("forecast.toml");
        std::fs::write(&path, "database_url = \"sqlite://sales.db\"\nmin_days = 3\n").unwrap();

        let file = load_config_path(&path).unwrap();
        assert_eq!(file.database_url.as_deref(), Some("sqlite://sales.db"));
        assert_eq!(file.min_days, Some(3));
        assert_eq!(file.horizon, None);
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let err = load_config_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ForecastError::Configuration(_)));
    }
}
