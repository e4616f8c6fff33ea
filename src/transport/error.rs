use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
struct ErrorEnvelope {
    error: ErrorJsonBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    param: Option<Value>,
}

/// Error payload reported by the API for a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub param: Option<String>,
}

/// Decode `{"error": {"code": ..., "message": ..., "param": ...}}`.
///
/// Returns `None` when the body is not an error envelope.
pub fn decode_api_error(json: &str) -> Option<ApiErrorBody> {
    let parsed: ErrorEnvelope = serde_json::from_str(json).ok()?;
    let param = parsed.error.param.and_then(|param| match param {
        Value::Null => None,
        Value::String(value) => Some(value),
        other => Some(other.to_string()),
    });
    Some(ApiErrorBody {
        code: parsed.error.code,
        message: parsed.error.message,
        param,
    })
}
