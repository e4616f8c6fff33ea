use serde::Deserialize;
use serde_json::{Map, Value};

use super::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct PageJsonResponse {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct CountJsonResponse {
    count: u64,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Map<String, Value>>,
    pub truncated: bool,
}

pub fn decode_page_json_response(json: &str) -> Result<Page, TransportError> {
    let parsed: PageJsonResponse = serde_json::from_str(json)?;
    let items = parsed
        .data
        .into_iter()
        .map(|item| match item {
            Value::Object(fields) => Ok(fields),
            _ => Err(TransportError::NotAnObject),
        })
        .collect::<Result<Vec<_>, TransportError>>()?;

    Ok(Page {
        items,
        truncated: parsed.truncated,
    })
}

pub fn decode_count_json_response(json: &str) -> Result<u64, TransportError> {
    let parsed: CountJsonResponse = serde_json::from_str(json)?;
    Ok(parsed.count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_page_items_and_truncation_flag() {
        let json = r#"
        {
          "data": [
            {"id": "CT1", "name": "Ann"},
            {"id": "CT2", "name": "Bob"}
          ],
          "truncated": true,
          "next_marker": "abc"
        }
        "#;

        let page = decode_page_json_response(json).unwrap();
        assert!(page.truncated);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1]["id"], "CT2");
    }

    #[test]
    fn missing_fields_mean_empty_final_page() {
        let page = decode_page_json_response("{}").unwrap();
        assert!(page.items.is_empty());
        assert!(!page.truncated);
    }

    #[test]
    fn rejects_non_object_items() {
        let err = decode_page_json_response(r#"{"data": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, TransportError::NotAnObject));
    }

    #[test]
    fn decodes_count() {
        assert_eq!(decode_count_json_response(r#"{"count": 42}"#).unwrap(), 42);
        assert!(decode_count_json_response(r#"{"total": 42}"#).is_err());
    }
}
