//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Inner iteration count of one busy-loop round.
///
/// The busy-loop pattern is compiled once per process, so a round is cheap
/// compared to a per-match compile. Hosts that need a given per-round wall
/// clock cost tune `service.burn_iterations` instead of relying on this count.
pub const DEFAULT_BURN_ITERATIONS: u64 = 10_000_001;

/// Internal endpoint the `/httpclient` route relays to.
pub const DEFAULT_OUTBOUND_URL: &str = "http://dgt-svc-cteam.midlxdgt02:8080/cteam-native/middleware/god";

/// Root configuration for the demo service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Demo operation settings.
    pub service: DemoConfig,

    /// Outbound relay settings.
    pub outbound: OutboundConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Settings for the delay/busy-loop operation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Environment name echoed in `/demo` responses.
    pub env: String,

    /// Regex matches per busy-loop round.
    pub burn_iterations: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            env: "local".to_string(),
            burn_iterations: DEFAULT_BURN_ITERATIONS,
        }
    }
}

/// Outbound relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutboundConfig {
    /// Target of the relayed POST.
    pub url: String,

    /// Optional client timeout in seconds. `None` keeps the client default.
    pub timeout_secs: Option<u64>,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OUTBOUND_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// `None` leaves requests unbounded so any requested delay is honoured.
    pub request_secs: Option<u64>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
