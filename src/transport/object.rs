use serde_json::{Map, Value};

use super::TransportError;

/// Decode a single entity body. An empty body decodes to an empty object.
pub fn decode_object_json_response(json: &str) -> Result<Map<String, Value>, TransportError> {
    if json.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(json)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(TransportError::NotAnObject),
    }
}

/// Decode an arbitrary JSON body. An empty body decodes to `null`.
pub fn decode_value_json_response(json: &str) -> Result<Value, TransportError> {
    if json.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(json)?)
}

/// Read a required string field, such as `id` or `project_id`, from an entity body.
pub fn required_str<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, TransportError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .ok_or(TransportError::MissingField { field })
}
