use serde::Serialize;
use serde_json::{Map, Value};

/// Options for sending a single message (`POST /projects/{id}/messages/send`).
///
/// Unset fields are omitted from the request body. `extra` carries any additional keys
/// the API accepts and is merged into the top level of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_variables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_clicks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SendMessage {
    /// Text message to one phone number.
    pub fn to_number(to_number: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            to_number: Some(to_number.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Text message to an existing contact.
    pub fn to_contact(contact_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            contact_id: Some(contact_id.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

/// Options for sending the same message to many recipients
/// (`POST /projects/{id}/messages/send_batch`).
///
/// Recipient counts are not limited locally; the server enforces its own maximum.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendMessages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_numbers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_variables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SendMessages {
    pub fn to_numbers(to_numbers: Vec<String>, content: impl Into<String>) -> Self {
        Self {
            to_numbers: Some(to_numbers),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn to_group(group_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

/// Options for scheduling a one-time or recurring message (`POST /projects/{id}/scheduled`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_variables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScheduleMessage {
    /// Message to one phone number, sent `start_time_offset` seconds from now.
    pub fn after(
        to_number: impl Into<String>,
        content: impl Into<String>,
        start_time_offset: i64,
    ) -> Self {
        Self {
            to_number: Some(to_number.into()),
            content: Some(content.into()),
            start_time_offset: Some(start_time_offset),
            ..Default::default()
        }
    }

    /// Message to one phone number at a unix timestamp.
    pub fn at(to_number: impl Into<String>, content: impl Into<String>, start_time: i64) -> Self {
        Self {
            to_number: Some(to_number.into()),
            content: Some(content.into()),
            start_time: Some(start_time),
            ..Default::default()
        }
    }
}

/// Lookup and update fields for `POST /projects/{id}/contacts`.
///
/// The server matches an existing contact (by `lookup_key`, default `phone_number`),
/// applies the remaining fields, and creates the contact if nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_group_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_group_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContactLookup {
    pub fn by_phone_number(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            ..Default::default()
        }
    }
}
