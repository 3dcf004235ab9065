//! Configuration management for vgpuplan
//!
//! Provides a layered configuration system that supports YAML files and
//! environment variable overrides.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Main configuration structure for vgpuplan components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Profile catalog source
    pub catalog: CatalogConfig,

    /// Inventory parser behavior
    pub parser: ParserConfig,

    /// Advisor policies
    pub advisor: AdvisorConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl PlannerConfig {
    /// Load configuration with precedence:
    /// 1. Environment variables (highest)
    /// 2. Configuration file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&Self::default())?);

        if let Ok(config_path) = std::env::var("VGPUPLAN_CONFIG") {
            builder = builder.add_source(config::File::with_name(&config_path).required(false));
        } else {
            for path in &["./vgpuplan.yaml", "/etc/vgpuplan/config.yaml"] {
                builder = builder.add_source(config::File::with_name(path).required(false));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix("VGPUPLAN")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        debug!("configuration loaded");

        Ok(parsed)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!(path = %path.display(), "loading configuration file");
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path));

        let config = builder.build()?;
        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;

        Ok(parsed)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        self.advisor.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            parser: ParserConfig::default(),
            advisor: AdvisorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Profile catalog source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a catalog YAML file; when absent the builtin catalog is used
    pub path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { path: None }
    }
}

/// Inventory parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Count assumed when a model is mentioned without a multiplier
    pub default_count: u32,
}

impl ParserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_count == 0 {
            return Err(crate::Error::config("Parser default count must be >= 1"));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { default_count: 1 }
    }
}

/// Advisor policy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Concurrent users assumed when the caller does not specify any
    pub default_concurrent_users: u32,

    /// Assumed model artifact size for storage sizing, in GB
    pub model_size_gb: u32,

    /// Assumed dataset size for storage sizing, in GB
    pub dataset_size_gb: u32,
}

impl AdvisorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_concurrent_users == 0 {
            return Err(crate::Error::config("Default concurrent users must be >= 1"));
        }
        Ok(())
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            default_concurrent_users: 1,
            model_size_gb: 50,
            dataset_size_gb: 100,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json or text)
    pub format: String,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(crate::Error::config(format!("Unknown log level: {}", other)));
            }
        }
        match self.format.as_str() {
            "json" | "text" => Ok(()),
            other => Err(crate::Error::config(format!("Unknown log format: {}", other))),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.catalog.path.is_none());
        assert_eq!(config.parser.default_count, 1);
    }

    #[test]
    fn test_config_validation() {
        let mut config = PlannerConfig::default();
        assert!(config.validate().is_ok());

        config.parser.default_count = 0;
        assert!(config.validate().is_err());

        config.parser.default_count = 1;
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = PlannerConfig::default();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let deserialized: PlannerConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, deserialized);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PlannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.advisor.model_size_gb, deserialized.advisor.model_size_gb);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vgpuplan.yaml");
        std::fs::write(
            &path,
            "parser:\n  default_count: 2\nadvisor:\n  default_concurrent_users: 8\n",
        )
        .unwrap();

        let config = PlannerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.parser.default_count, 2);
        assert_eq!(config.advisor.default_concurrent_users, 8);
        // Untouched sections keep defaults
        assert_eq!(config.logging.level, "info");
    }
}
