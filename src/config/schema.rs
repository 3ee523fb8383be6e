//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the function host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable holding the secret handed to authorized callers.
pub const DEFAULT_SECRET_ENV_VAR: &str = "FAUNADB_SERVER_SECRET";

/// Route the function is mounted on, matching the hosting platform's layout.
pub const DEFAULT_FUNCTION_PATH: &str = "/.netlify/functions/faunakey";

/// Root configuration for the function host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FunctionConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the function is mounted.
    pub function: FunctionRouteConfig,

    /// Where the secret comes from.
    pub secret: SecretConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8888").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8888".to_string(),
        }
    }
}

/// Function route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FunctionRouteConfig {
    /// Absolute request path the function answers on.
    pub path: String,
}

impl Default for FunctionRouteConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_FUNCTION_PATH.to_string(),
        }
    }
}

/// Secret lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecretConfig {
    /// Name of the environment variable read on every invocation.
    pub env_var: String,
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_SECRET_ENV_VAR.to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
