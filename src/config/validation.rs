//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! reported together rather than stopping at the first one.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::FunctionConfig;

/// Paths the host serves itself.
pub const RESERVED_PATHS: &[&str] = &["/health"];

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("function.path must not be empty")]
    EmptyFunctionPath,

    #[error("function.path `{0}` must start with `/`")]
    RelativeFunctionPath(String),

    #[error("function.path `{0}` is reserved")]
    ReservedFunctionPath(String),

    #[error("secret.env_var must not be empty")]
    EmptySecretEnvVar,

    #[error("secret.env_var `{0}` must not contain `=` or NUL")]
    InvalidSecretEnvVar(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &FunctionConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let path = &config.function.path;
    if path.is_empty() {
        errors.push(ValidationError::EmptyFunctionPath);
    } else if !path.starts_with('/') {
        errors.push(ValidationError::RelativeFunctionPath(path.clone()));
    } else if RESERVED_PATHS.contains(&path.as_str()) {
        errors.push(ValidationError::ReservedFunctionPath(path.clone()));
    }

    let env_var = &config.secret.env_var;
    if env_var.is_empty() {
        errors.push(ValidationError::EmptySecretEnvVar);
    } else if env_var.contains('=') || env_var.contains('\0') {
        errors.push(ValidationError::InvalidSecretEnvVar(env_var.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
