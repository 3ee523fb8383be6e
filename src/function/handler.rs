//! The function itself: check the claim's expiry, hand out the secret.

use crate::function::claim::{ClientContext, UserClaim};
use crate::function::clock::Clock;
use crate::function::error::FunctionError;
use crate::function::response::FunctionResponse;
use crate::function::secret::SecretSource;

/// A user is valid when present and not yet expired at `now_secs`.
pub fn is_valid_user(user: Option<&UserClaim>, now_secs: f64) -> bool {
    user.is_some_and(|user| user.is_live_at(now_secs))
}

/// Authorize the caller and return the live claim, or `Unauthorized`.
pub fn authorize<'a>(
    context: &'a ClientContext,
    now_secs: f64,
) -> Result<&'a UserClaim, FunctionError> {
    match context.user.as_ref() {
        Some(user) if is_valid_user(Some(user), now_secs) => Ok(user),
        _ => Err(FunctionError::Unauthorized),
    }
}

/// Run one invocation.
pub fn handle(
    context: &ClientContext,
    secrets: &dyn SecretSource,
    clock: &dyn Clock,
) -> FunctionResponse {
    match authorize(context, clock.now_secs()) {
        Ok(user) => {
            tracing::info!(
                sub = user.sub.as_deref().unwrap_or("-"),
                email = user.email.as_deref().unwrap_or("-"),
                exp = ?user.exp,
                "valid user"
            );
            FunctionResponse::fauna_key(secrets.secret())
        }
        Err(err) => {
            tracing::info!("invalid user");
            FunctionResponse::from(err)
        }
    }
}
