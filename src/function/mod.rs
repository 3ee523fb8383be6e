//! The faunakey function.
//!
//! # Data Flow
//! ```text
//! InvocationEvent (from host)
//!     → claim.rs (ClientContext / UserClaim)
//!     → handler.rs (expiry check against clock.rs)
//!     → secret.rs (read secret, valid callers only)
//!     → response.rs (FunctionResponse envelope)
//! ```
//!
//! # Design Decisions
//! - Token decoding and signature checks belong to the host, not here
//! - Exactly two outcomes: 200 with the secret, or 401
//! - The secret is read per invocation, never cached

pub mod claim;
pub mod clock;
pub mod error;
pub mod handler;
pub mod response;
pub mod secret;

use std::sync::Arc;

pub use claim::{ClientContext, InvocationEvent, UserClaim};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{FunctionError, UNAUTHORIZED_MESSAGE};
pub use handler::{authorize, handle, is_valid_user};
pub use response::FunctionResponse;
pub use secret::{EnvSecret, SecretSource, StaticSecret};

use crate::config::FunctionConfig;

/// Everything an invocation needs, shareable across requests.
#[derive(Clone)]
pub struct FaunaKeyFunction {
    secrets: Arc<dyn SecretSource>,
    clock: Arc<dyn Clock>,
}

impl FaunaKeyFunction {
    pub fn new(secrets: Arc<dyn SecretSource>, clock: Arc<dyn Clock>) -> Self {
        Self { secrets, clock }
    }

    /// Environment-backed secret and wall clock, as configured.
    pub fn from_config(config: &FunctionConfig) -> Self {
        Self::new(
            Arc::new(EnvSecret::from_config(&config.secret)),
            Arc::new(SystemClock),
        )
    }

    pub fn invoke(&self, event: &InvocationEvent) -> FunctionResponse {
        handle(&event.client_context, self.secrets.as_ref(), self.clock.as_ref())
    }
}
