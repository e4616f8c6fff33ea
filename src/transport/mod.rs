//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod error;
mod object;
mod page;
mod query;

pub use error::decode_api_error;
pub use object::{decode_object_json_response, decode_value_json_response, required_str};
pub use page::{decode_count_json_response, decode_page_json_response};
pub use query::{encode_count, encode_page, encode_query_options};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("response is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("response field `{field}` is invalid: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: crate::domain::ValidationError,
    },
}
