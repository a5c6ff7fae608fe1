//! Configuration loading from disk and the process environment.

use std::path::Path;
use std::fs;
use crate::config::schema::ServiceConfig;
use crate::config::validation::ValidationError;

/// Overrides `service.env`.
pub const ENV_NAME_VAR: &str = "DEMO_ENV";
/// Overrides `listener.bind_address`.
pub const BIND_ADDRESS_VAR: &str = "DEMO_BIND_ADDRESS";
/// Overrides `outbound.url`.
pub const OUTBOUND_URL_VAR: &str = "DEMO_OUTBOUND_URL";

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
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML file into a config without validating it.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load configuration: file (or defaults), then environment overrides.
///
/// The result is not validated; callers apply their own overrides first and
/// then run [`validate_config`](crate::config::validation::validate_config).
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit variable lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) => read_config(p)?,
        None => ServiceConfig::default(),
    };

    apply_overrides(&mut config, lookup);

    Ok(config)
}

/// Apply `DEMO_*` overrides using the given variable lookup.
pub fn apply_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(env) = lookup(ENV_NAME_VAR) {
        config.service.env = env;
    }
    if let Some(addr) = lookup(BIND_ADDRESS_VAR) {
        config.listener.bind_address = addr;
    }
    if let Some(url) = lookup(OUTBOUND_URL_VAR) {
        config.outbound.url = url;
    }
}
