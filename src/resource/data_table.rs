use serde_json::{Map, Value};

use super::{Entity, Resource};
use crate::client::TelerivetError;
use crate::domain::FieldError;

#[derive(Debug, Clone)]
pub struct DataTable {
    entity: Entity,
}

impl Resource for DataTable {
    const COLLECTION: &'static str = "tables";
    const READ_ONLY_FIELDS: &'static [&'static str] = &["id", "project_id", "num_rows"];

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

impl DataTable {
    pub fn name(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldError> {
        self.entity.data_mut().set("name", Value::String(name.into()))
    }

    pub fn num_rows(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("num_rows")
    }

    pub fn show_add_row(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("show_add_row")
    }

    pub fn set_show_add_row(&mut self, show: bool) -> Result<(), FieldError> {
        self.entity.data_mut().set("show_add_row", Value::Bool(show))
    }

    pub fn show_stats(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("show_stats")
    }

    pub fn set_show_stats(&mut self, show: bool) -> Result<(), FieldError> {
        self.entity.data_mut().set("show_stats", Value::Bool(show))
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
