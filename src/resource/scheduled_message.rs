use serde_json::{Map, Value};

use super::{Entity, Resource};
use crate::client::TelerivetError;
use crate::domain::FieldError;

/// A message scheduled to be sent once or on a recurrence rule.
#[derive(Debug, Clone)]
pub struct ScheduledMessage {
    entity: Entity,
}

impl Resource for ScheduledMessage {
    const COLLECTION: &'static str = "scheduled";
    const READ_ONLY_FIELDS: &'static [&'static str] = &[
        "id",
        "project_id",
        "recipients_str",
        "group_id",
        "contact_id",
        "to_number",
        "time_created",
        "prev_time",
        "next_time",
        "occurrences",
    ];

    fn from_entity(entity: Entity) -> Self {
        Self { entity }
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl ScheduledMessage {
    pub fn content(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("content")
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), FieldError> {
        self.entity
            .data_mut()
            .set("content", Value::String(content.into()))
    }

    /// iCalendar recurrence rule, or `COUNT=1` for a one-time message.
    pub fn rrule(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("rrule")
    }

    pub fn set_rrule(&mut self, rrule: impl Into<String>) -> Result<(), FieldError> {
        self.entity.data_mut().set("rrule", Value::String(rrule.into()))
    }

    pub fn timezone_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("timezone_id")
    }

    pub fn recipients_str(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("recipients_str")
    }

    pub fn to_number(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("to_number")
    }

    pub fn group_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("group_id")
    }

    pub fn start_time(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("start_time")
    }

    pub fn end_time(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("end_time")
    }

    pub fn next_time(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("next_time")
    }

    pub fn occurrences(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("occurrences")
    }

    pub fn vars(&self) -> Result<Option<&Map<String, Value>>, FieldError> {
        self.entity.data().get_object("vars")
    }

    pub async fn load(&mut self) -> Result<(), TelerivetError> {
        self.entity.load().await
    }

    pub async fn save(&mut self) -> Result<(), TelerivetError> {
        self.entity.save().await
    }

    pub async fn delete(self) -> Result<(), TelerivetError> {
        self.entity.delete().await
    }
}
