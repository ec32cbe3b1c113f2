use crate::services::catalog::MAX_LOAN_DAYS;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log filter used when SMARTLIBRARY_LOG is not set
    pub log_level: String,
    /// Directory for smartlibrary.log (defaults to the config directory)
    pub log_dir: Option<String>,
    /// Event polling timeout in milliseconds
    pub tick_rate_ms: u64,
    /// Loan duration prefilled in the issue loan form
    pub loan_duration_days: u32,
    /// Directory with books.csv, members.csv, loans.csv and fines.csv
    pub seed_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
            tick_rate_ms: 250,
            loan_duration_days: 14,
            seed_dir: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".smartlibrary"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config from the home directory, falling back to defaults
    /// when there is no config file
    pub fn load() -> anyhow::Result<Config> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Config> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::parse(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    fn parse(contents: &str) -> anyhow::Result<Config> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the event loop or the issue loan form cannot use
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tick_rate_ms == 0 {
            anyhow::bail!("tick_rate_ms must be at least 1");
        }
        if !(1..=MAX_LOAN_DAYS).contains(&self.loan_duration_days) {
            anyhow::bail!(
                "loan_duration_days must be between 1 and {}",
                MAX_LOAN_DAYS
            );
        }
        Ok(())
    }

    /// Directory the log file is written to
    pub fn log_directory(&self) -> Option<PathBuf> {
        self.log_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(Self::config_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(r#"{ "loan_duration_days": 21 }"#).unwrap();
        assert_eq!(config.loan_duration_days, 21);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.seed_dir.is_none());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_config_is_error() {
        assert!(Config::parse("{ log_level: }").is_err());
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let err = Config::parse(r#"{ "tick_rate_ms": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("tick_rate_ms"));
        assert!(Config::parse(r#"{ "loan_duration_days": 0 }"#).is_err());
        assert!(Config::parse(r#"{ "loan_duration_days": 366 }"#).is_err());
        assert!(Config::parse(r#"{ "loan_duration_days": 365 }"#).is_ok());
    }

    #[test]
    fn test_explicit_log_dir_wins() {
        let config = Config {
            log_dir: Some("/tmp/smartlibrary-logs".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.log_directory(),
            Some(PathBuf::from("/tmp/smartlibrary-logs"))
        );
    }
}
