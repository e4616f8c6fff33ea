use serde_json::{Map, Value};

use super::{Entity, Resource};
use crate::client::TelerivetError;
use crate::domain::FieldError;

/// A basic route: an Android phone running the gateway app, or a virtual number.
#[derive(Debug, Clone)]
pub struct Phone {
    entity: Entity,
}

impl Resource for Phone {
    const COLLECTION: &'static str = "phones";
    const READ_ONLY_FIELDS: &'static [&'static str] = &[
        "id",
        "project_id",
        "phone_type",
        "country",
        "time_created",
        "last_active_time",
        "battery",
        "charging",
        "internet_type",
        "app_version",
        "manufacturer",
        "model",
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

impl Phone {
    pub fn name(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldError> {
        self.entity.data_mut().set("name", Value::String(name.into()))
    }

    pub fn phone_number(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("phone_number")
    }

    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) -> Result<(), FieldError> {
        self.entity
            .data_mut()
            .set("phone_number", Value::String(phone_number.into()))
    }

    pub fn phone_type(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("phone_type")
    }

    /// ISO 3166-1 alpha-2 country code.
    pub fn country(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("country")
    }

    pub fn send_paused(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("send_paused")
    }

    pub fn set_send_paused(&mut self, paused: bool) -> Result<(), FieldError> {
        self.entity.data_mut().set("send_paused", Value::Bool(paused))
    }

    pub fn time_created(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("time_created")
    }

    pub fn last_active_time(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("last_active_time")
    }

    /// Battery level in percent, for Android phones.
    pub fn battery(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("battery")
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
