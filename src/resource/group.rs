use serde_json::{Map, Value};

use super::{Contact, Entity, Resource};
use crate::client::{Cursor, TelerivetError};
use crate::domain::{FieldError, QueryOptions};

/// A named group of contacts. Dynamic groups are membership rules evaluated server-side.
#[derive(Debug, Clone)]
pub struct Group {
    entity: Entity,
}

impl Resource for Group {
    const COLLECTION: &'static str = "groups";
    const READ_ONLY_FIELDS: &'static [&'static str] =
        &["id", "project_id", "dynamic", "num_members", "time_created"];

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

impl Group {
    pub fn name(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldError> {
        self.entity.data_mut().set("name", Value::String(name.into()))
    }

    pub fn dynamic(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("dynamic")
    }

    pub fn num_members(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("num_members")
    }

    pub fn time_created(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("time_created")
    }

    pub fn allow_sending(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("allow_sending")
    }

    pub fn set_allow_sending(&mut self, allow: bool) -> Result<(), FieldError> {
        self.entity.data_mut().set("allow_sending", Value::Bool(allow))
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

    /// Members of this group.
    pub fn query_contacts(&self, options: QueryOptions) -> Cursor<Contact> {
        self.entity
            .client()
            .cursor(self.entity.child_path(Contact::COLLECTION), options)
    }
}
