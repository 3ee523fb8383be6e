//! Function-level failures.

use thiserror::Error;

/// Message returned to callers without a usable token.
pub const UNAUTHORIZED_MESSAGE: &str = "User token invalid or not present";

/// The only way an invocation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FunctionError {
    /// Missing, null, or expired user claim.
    #[error("User token invalid or not present")]
    Unauthorized,
}

impl FunctionError {
    pub fn status_code(&self) -> u16 {
        match self {
            FunctionError::Unauthorized => 401,
        }
    }
}
