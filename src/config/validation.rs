//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the outbound URL
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("outbound.url: invalid URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },

    #[error("service.env: must not be blank")]
    BlankEnv,

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A socket address or a `host:port` pair the listener can resolve.
fn is_listen_address(value: &str) -> bool {
    if value.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match value.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty() && !host.contains(char::is_whitespace) && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_listen_address(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.service.env.trim().is_empty() {
        errors.push(ValidationError::BlankEnv);
    }

    if config.service.burn_iterations == 0 {
        errors.push(ValidationError::Zero { field: "service.burn_iterations" });
    }

    match url::Url::parse(config.outbound.url.trim()) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
        Ok(u) => errors.push(ValidationError::InvalidUrl {
            value: config.outbound.url.clone(),
            reason: format!("unsupported scheme '{}'", u.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            value: config.outbound.url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.outbound.timeout_secs == Some(0) {
        errors.push(ValidationError::Zero { field: "outbound.timeout_secs" });
    }

    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
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
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.service.env = "  ".into();
        config.outbound.url = "ftp://example.com/x".into();
        config.timeouts.request_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::BlankEnv));
        assert!(errors.contains(&ValidationError::Zero { field: "timeouts.request_secs" }));
    }

    #[test]
    fn test_bind_address_accepts_host_and_port() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "localhost:8080".into();
        assert!(validate_config(&config).is_ok());

        for bad in ["nope", "localhost", ":8080", "localhost:http", "localhost:70000"] {
            config.listener.bind_address = bad.into();
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(
                errors,
                vec![ValidationError::InvalidAddress { field: "listener.bind_address", value: bad.into() }],
                "{bad}"
            );
        }
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].to_string(), "observability.metrics_address: invalid socket address 'nope'");
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = ServiceConfig::default();
        config.observability.log_level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::UnknownLogLevel("loud".into())]);
    }
}
