//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that log filter directives parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: EngineConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::EngineConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logging.filter must not be empty")]
    EmptyLogFilter,

    #[error("logging.filter `{filter}` is invalid: {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

pub fn validate_config(config: &EngineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let filter = config.logging.filter.trim();
    if filter.is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    } else if let Err(e) = EnvFilter::try_new(filter) {
        errors.push(ValidationError::InvalidLogFilter {
            filter: filter.to_string(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_filter_rejected() {
        let mut config = EngineConfig::default();
        config.logging.filter = "  ".to_string();
        assert_eq!(validate_config(&config), Err(vec![ValidationError::EmptyLogFilter]));
    }

    #[test]
    fn test_malformed_filter_rejected() {
        let mut config = EngineConfig::default();
        config.logging.filter = "route_sync=verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidLogFilter { .. }));
    }
}
