//! The `{statusCode, body}` pair returned to the host.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::function::error::FunctionError;

/// Response envelope. `body` is already JSON-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub body: String,
}

impl FunctionResponse {
    /// 200 carrying the secret. An unset secret leaves the key out
    /// entirely, so the body is `{}`.
    pub fn fauna_key(secret: Option<String>) -> Self {
        let mut payload = Map::new();
        if let Some(secret) = secret {
            payload.insert("faunaKey".to_string(), Value::String(secret));
        }
        Self {
            status_code: 200,
            body: Value::Object(payload).to_string(),
        }
    }

    pub fn from_error(err: FunctionError) -> Self {
        Self {
            status_code: err.status_code(),
            body: json!({ "message": err.to_string() }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Decode the body back into JSON.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl From<FunctionError> for FunctionResponse {
    fn from(err: FunctionError) -> Self {
        Self::from_error(err)
    }
}
