use serde_json::{Map, Value};

use super::{Entity, Resource};
use crate::client::TelerivetError;
use crate::domain::FieldError;

/// An automated service (auto-reply, poll, webhook, ...).
#[derive(Debug, Clone)]
pub struct Service {
    entity: Entity,
}

impl Resource for Service {
    const COLLECTION: &'static str = "services";
    const READ_ONLY_FIELDS: &'static [&'static str] =
        &["id", "project_id", "service_type", "contexts"];

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

impl Service {
    pub fn name(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldError> {
        self.entity.data_mut().set("name", Value::String(name.into()))
    }

    pub fn active(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("active")
    }

    pub fn set_active(&mut self, active: bool) -> Result<(), FieldError> {
        self.entity.data_mut().set("active", Value::Bool(active))
    }

    /// Lower values are triggered first.
    pub fn priority(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("priority")
    }

    pub fn set_priority(&mut self, priority: i64) -> Result<(), FieldError> {
        self.entity.data_mut().set("priority", Value::from(priority))
    }

    pub fn service_type(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("service_type")
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
}
