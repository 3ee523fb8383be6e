//! Serverless function that hands the FaunaDB server secret to callers
//! holding an unexpired identity claim.

pub mod config;
pub mod function;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::FunctionConfig;
pub use function::{FaunaKeyFunction, FunctionResponse};
pub use http::FunctionServer;
pub use lifecycle::Shutdown;
