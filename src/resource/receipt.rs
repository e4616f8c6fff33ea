use serde_json::{Map, Value};

use super::{Entity, Resource};
use crate::client::TelerivetError;
use crate::domain::FieldError;

/// A mobile money receipt parsed from a provider notification. Only `vars` is writable.
#[derive(Debug, Clone)]
pub struct MobileMoneyReceipt {
    entity: Entity,
}

impl Resource for MobileMoneyReceipt {
    const COLLECTION: &'static str = "receipts";
    const READ_ONLY_FIELDS: &'static [&'static str] = &[
        "id",
        "project_id",
        "tx_id",
        "tx_type",
        "currency",
        "amount",
        "balance",
        "fee",
        "name",
        "phone_number",
        "time_created",
        "other_tx_id",
        "content",
        "provider_id",
        "contact_id",
        "phone_id",
        "message_id",
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

impl MobileMoneyReceipt {
    pub fn tx_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("tx_id")
    }

    pub fn tx_type(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("tx_type")
    }

    pub fn currency(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("currency")
    }

    pub fn amount(&self) -> Result<Option<f64>, FieldError> {
        self.entity.data().get_f64("amount")
    }

    pub fn balance(&self) -> Result<Option<f64>, FieldError> {
        self.entity.data().get_f64("balance")
    }

    pub fn fee(&self) -> Result<Option<f64>, FieldError> {
        self.entity.data().get_f64("fee")
    }

    /// Name of the other party, as reported by the provider.
    pub fn name(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("name")
    }

    pub fn phone_number(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("phone_number")
    }

    pub fn time_created(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("time_created")
    }

    pub fn content(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("content")
    }

    pub fn contact_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("contact_id")
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
