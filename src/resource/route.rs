use serde_json::{Map, Value};

use super::{Entity, Resource};
use crate::client::TelerivetError;
use crate::domain::FieldError;

/// A custom route that picks a phone per message.
#[derive(Debug, Clone)]
pub struct Route {
    entity: Entity,
}

impl Resource for Route {
    const COLLECTION: &'static str = "routes";
    const READ_ONLY_FIELDS: &'static [&'static str] = &["id", "project_id", "phone_ids"];

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

impl Route {
    pub fn name(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldError> {
        self.entity.data_mut().set("name", Value::String(name.into()))
    }

    pub fn phone_ids(&self) -> Result<Vec<&str>, FieldError> {
        self.entity.data().get_str_list("phone_ids")
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
