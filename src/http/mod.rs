//! HTTP host adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, trace)
//!     → invocation body decoded into an InvocationEvent
//!     → function::FaunaKeyFunction::invoke
//!     → response.rs (FunctionResponse → HTTP status + JSON body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, FunctionServer};
