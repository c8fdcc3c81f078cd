//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::BalancerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BalancerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: BalancerConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ServiceClass;

    #[test]
    fn parses_full_config() {
        let raw = r#"
            [listener]
            bind_address = "10.0.0.1:80"
            max_connections = 5

            [proxy]
            read_buffer_size = 2048

            [[backends]]
            address = "192.168.0.101:80"
            class = "video"

            [[backends]]
            address = "192.168.0.102:80"
            class = "video"

            [[backends]]
            address = "192.168.0.103:80"
            class = "music"
        "#;
        let config: BalancerConfig = toml::from_str(raw).unwrap();
        validate_config(&config).unwrap();

        assert_eq!(config.listener.bind_address, "10.0.0.1:80");
        assert_eq!(config.listener.max_connections, 5);
        assert_eq!(config.proxy.read_buffer_size, 2048);
        assert_eq!(config.backends.len(), 3);
        assert_eq!(config.backends[2].class, ServiceClass::Music);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/media-balancer.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
