//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::EngineConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why an engine config could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The text is not a valid `EngineConfig` document.
    Parse(toml::de::Error),
    /// The document parsed but some settings are unusable.
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read route-sync config `{}`: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "malformed route-sync config: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "rejected route-sync config ({} problem", errors.len())?;
                if errors.len() != 1 {
                    write!(f, "s")?;
                }
                write!(f, "): ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{EmptyChildRoutes, LogFormat};

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = parse_config(
            r#"
            [sync]
            empty_child_routes = "retain"

            [registry]
            cache_results = false

            [logging]
            filter = "route_sync=debug"
            format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(config.sync.empty_child_routes, EmptyChildRoutes::Retain);
        assert!(!config.registry.cache_results);
        assert_eq!(config.logging.filter, "route_sync=debug");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        let err = parse_config("[sync]\nempty_child_routes = \"keep\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_reported() {
        let err = parse_config("[logging]\nfilter = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert_eq!(
            err.to_string(),
            "rejected route-sync config (1 problem): logging.filter must not be empty"
        );
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("route-sync-load-from-file-{}.toml", std::process::id()));
        fs::write(&path, "[registry]\ncache_results = false\n").unwrap();
        let config = load_config(&path);
        let _ = fs::remove_file(&path);

        assert!(!config.unwrap().registry.cache_results);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/route-sync.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/route-sync.toml"));
    }
}
