//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize, or defaults)
//!     → validation.rs (semantic checks)
//!     → FunctionConfig (validated, immutable)
//!     → handed to the server and the function state at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the function runs with no file at all
//! - The secret itself never lives in config, only the variable that holds it

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError, CONFIG_PATH_ENV_VAR};
pub use schema::FunctionConfig;
pub use schema::FunctionRouteConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::SecretConfig;
