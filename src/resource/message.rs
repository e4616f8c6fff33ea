use serde_json::{Map, Value};

use super::{Entity, Label, Resource};
use crate::client::{HttpMethod, TelerivetError};
use crate::domain::FieldError;

/// An incoming or outgoing message. Only `starred` and `vars` are writable.
#[derive(Debug, Clone)]
pub struct Message {
    entity: Entity,
}

impl Resource for Message {
    const COLLECTION: &'static str = "messages";
    const READ_ONLY_FIELDS: &'static [&'static str] = &[
        "id",
        "project_id",
        "direction",
        "status",
        "message_type",
        "source",
        "time_created",
        "time_sent",
        "time_updated",
        "from_number",
        "to_number",
        "content",
        "simulated",
        "label_ids",
        "error_message",
        "external_id",
        "price",
        "price_currency",
        "contact_id",
        "phone_id",
        "route_id",
        "service_id",
        "broadcast_id",
        "scheduled_id",
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

impl Message {
    /// `incoming` or `outgoing`.
    pub fn direction(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("direction")
    }

    /// Delivery status, e.g. `queued`, `sent`, `delivered`, `failed`.
    pub fn status(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("status")
    }

    pub fn message_type(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("message_type")
    }

    pub fn source(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("source")
    }

    pub fn time_created(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("time_created")
    }

    pub fn time_sent(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("time_sent")
    }

    pub fn from_number(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("from_number")
    }

    pub fn to_number(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("to_number")
    }

    pub fn content(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("content")
    }

    pub fn starred(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("starred")
    }

    pub fn set_starred(&mut self, starred: bool) -> Result<(), FieldError> {
        self.entity.data_mut().set("starred", Value::Bool(starred))
    }

    pub fn simulated(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("simulated")
    }

    pub fn label_ids(&self) -> Result<Vec<&str>, FieldError> {
        self.entity.data().get_str_list("label_ids")
    }

    pub fn error_message(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("error_message")
    }

    pub fn price(&self) -> Result<Option<f64>, FieldError> {
        self.entity.data().get_f64("price")
    }

    pub fn contact_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("contact_id")
    }

    pub fn phone_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("phone_id")
    }

    pub fn route_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("route_id")
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

    /// Cancel a message that has not been sent yet and return its updated state.
    pub async fn cancel(&self) -> Result<Message, TelerivetError> {
        self.entity
            .client()
            .request_entity(HttpMethod::Post, &self.entity.child_path("cancel"), None)
            .await
    }

    /// `PUT /projects/{project_id}/labels/{label_id}/messages/{id}`.
    pub async fn add_label(&self, label: &Label) -> Result<(), TelerivetError> {
        self.entity
            .client()
            .execute(HttpMethod::Put, &self.label_path(label), &[], None)
            .await?;
        Ok(())
    }

    /// `DELETE /projects/{project_id}/labels/{label_id}/messages/{id}`.
    pub async fn remove_label(&self, label: &Label) -> Result<(), TelerivetError> {
        self.entity
            .client()
            .execute(HttpMethod::Delete, &self.label_path(label), &[], None)
            .await?;
        Ok(())
    }

    fn label_path(&self, label: &Label) -> String {
        label
            .entity()
            .child_path(&format!("{}/{}", Self::COLLECTION, self.id()))
    }
}
