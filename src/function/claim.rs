//! Identity claims handed to the function by its host.
//!
//! The host has already decoded and authenticated the caller's token; the
//! function only ever looks at the expiry. Everything else is carried along
//! untouched so it can show up in logs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decoded user claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserClaim {
    /// Expiry timestamp (seconds since epoch). `None` when missing or not a number.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub exp: Option<f64>,

    /// Subject, when it is a string. Only used for logging.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<String>,

    /// Email, when it is a string. Only used for logging.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    /// Any other claim fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserClaim {
    /// Claim expiring at `exp`, with no other fields.
    pub fn expiring_at(exp: f64) -> Self {
        Self {
            exp: Some(exp),
            ..Self::default()
        }
    }

    /// Whether the claim is still live at `now_secs`. Strictly greater: a
    /// claim expiring exactly now is already expired.
    pub fn is_live_at(&self, now_secs: f64) -> bool {
        matches!(self.exp, Some(exp) if exp > now_secs)
    }
}

/// Envelope the host wraps the claim in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientContext {
    /// `null` and absent both mean "no user".
    #[serde(default)]
    pub user: Option<UserClaim>,
}

impl ClientContext {
    pub fn with_user(user: UserClaim) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// A single invocation as delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    #[serde(default)]
    pub client_context: ClientContext,
}

impl InvocationEvent {
    pub fn new(client_context: ClientContext) -> Self {
        Self { client_context }
    }

    /// Decode an invocation body. An empty (or all-whitespace) body is an
    /// anonymous invocation.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }
}

/// Accept any JSON value for `exp`, keeping only finite numbers.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|exp| exp.is_finite()))
}

/// Accept any JSON value for an informational field, keeping only strings.
/// A claim must never be rejected over a field the function does not check.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_expiry_comparison() {
        let claim = UserClaim::expiring_at(1_700_000_000.0);
        assert!(claim.is_live_at(1_699_999_999.0));
        assert!(!claim.is_live_at(1_700_000_000.0));
        assert!(!claim.is_live_at(1_700_000_001.0));
    }

    #[test]
    fn test_fractional_now() {
        let claim = UserClaim::expiring_at(1_700_000_000.0);
        assert!(claim.is_live_at(1_699_999_999.999));
        assert!(!claim.is_live_at(1_700_000_000.001));
    }

    #[test]
    fn test_missing_or_non_numeric_exp_is_never_live() {
        let missing: UserClaim = serde_json::from_value(json!({ "sub": "u-1" })).unwrap();
        assert_eq!(missing.exp, None);
        assert!(!missing.is_live_at(0.0));

        let text: UserClaim = serde_json::from_value(json!({ "exp": "tomorrow" })).unwrap();
        assert_eq!(text.exp, None);
        assert!(!text.is_live_at(0.0));

        let null: UserClaim = serde_json::from_value(json!({ "exp": null })).unwrap();
        assert_eq!(null.exp, None);

        // Numeric strings are not coerced: `exp` must be a JSON number.
        let quoted: UserClaim =
            serde_json::from_value(json!({ "exp": "2000000000" })).unwrap();
        assert_eq!(quoted.exp, None);
        assert!(!quoted.is_live_at(1_700_000_000.0));
    }

    #[test]
    fn test_odd_typed_identity_fields_do_not_reject_claim() {
        let event = InvocationEvent::from_slice(
            br#"{"clientContext":{"user":{"exp":2000000000,"sub":12345,"email":["a","b"]}}}"#,
        )
        .unwrap();

        let user = event.client_context.user.unwrap();
        assert_eq!(user.exp, Some(2_000_000_000.0));
        assert_eq!(user.sub, None);
        assert_eq!(user.email, None);
        assert!(user.is_live_at(1_700_000_000.0));
    }

    #[test]
    fn test_extra_fields_preserved() {
        let claim: UserClaim = serde_json::from_value(json!({
            "exp": 42,
            "sub": "u-1",
            "email": "ada@example.com",
            "app_metadata": { "provider": "email" }
        }))
        .unwrap();

        assert_eq!(claim.exp, Some(42.0));
        assert_eq!(claim.sub.as_deref(), Some("u-1"));
        assert_eq!(claim.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claim.extra["app_metadata"], json!({ "provider": "email" }));
    }

    #[test]
    fn test_event_decoding() {
        let event = InvocationEvent::from_slice(b"").unwrap();
        assert_eq!(event.client_context.user, None);

        let event = InvocationEvent::from_slice(b"  \n").unwrap();
        assert_eq!(event.client_context.user, None);

        let event = InvocationEvent::from_slice(br#"{"clientContext":{"user":null}}"#).unwrap();
        assert_eq!(event.client_context.user, None);

        let event = InvocationEvent::from_slice(br#"{"clientContext":{"user":{"exp":7}}}"#).unwrap();
        assert_eq!(event.client_context.user, Some(UserClaim::expiring_at(7.0)));

        assert!(InvocationEvent::from_slice(b"{not json").is_err());
    }
}
