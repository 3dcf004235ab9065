//! Error handling for vgpuplan
//!
//! Provides a unified error type and result type for use across all vgpuplan
//! components. `NotFound` and `Validation` are ordinary recoverable results
//! used for suggestion and fallback flows; they never indicate a crash.

/// Result type alias for vgpuplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for vgpuplan
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A catalog lookup found no matching GPU model or profile name
    #[error("Not found: {0}")]
    NotFound(String),

    /// A caller contract violation (zero count, non-positive memory, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// Malformed catalog data (startup-time fatal, no degraded mode)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration parsing errors
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Check if this error is recoverable by the caller (suggestion or
    /// fallback flows keep going; everything else should stop the request)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::Validation(_))
    }

    /// Check if this error indicates a caller-side problem
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::Validation(_) | Error::InvalidConfiguration(_)
        )
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "not_found",
            Error::Validation(_) => "validation",
            Error::InvalidConfiguration(_) => "configuration",
            Error::Catalog(_) => "catalog",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Yaml(_) => "yaml",
            Error::Config(_) => "config",
            Error::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::not_found("profile A40-64Q");
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.to_string(), "Not found: profile A40-64Q");

        let err = Error::validation("count must be > 0");
        assert_eq!(err.to_string(), "Validation error: count must be > 0");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::not_found("x").category(), "not_found");
        assert_eq!(Error::validation("x").category(), "validation");
        assert_eq!(Error::config("x").category(), "configuration");
        assert_eq!(Error::catalog("x").category(), "catalog");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::not_found("x").is_recoverable());
        assert!(Error::validation("x").is_recoverable());
        assert!(!Error::catalog("x").is_recoverable());

        assert!(Error::validation("x").is_client_error());
        assert!(!Error::catalog("x").is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert_eq!(err.category(), "io");
        assert!(!err.is_recoverable());
    }
}
