use serde_json::{Map, Value};

use super::{Entity, Message, Resource};
use crate::client::{Cursor, TelerivetError};
use crate::domain::{FieldError, QueryOptions};

/// A label that can be applied to messages.
#[derive(Debug, Clone)]
pub struct Label {
    entity: Entity,
}

impl Resource for Label {
    const COLLECTION: &'static str = "labels";
    const READ_ONLY_FIELDS: &'static [&'static str] = &["id", "project_id", "time_created"];

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

impl Label {
    pub fn name(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldError> {
        self.entity.data_mut().set("name", Value::String(name.into()))
    }

    pub fn time_created(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("time_created")
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

    /// Messages carrying this label.
    pub fn query_messages(&self, options: QueryOptions) -> Cursor<Message> {
        self.entity
            .client()
            .cursor(self.entity.child_path(Message::COLLECTION), options)
    }
}
