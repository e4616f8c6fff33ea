use serde_json::{Map, Value};

use super::{Entity, Group, Message, Resource};
use crate::client::{Cursor, HttpMethod, TelerivetError};
use crate::domain::{FieldError, QueryOptions};

/// A contact in a project's address book.
#[derive(Debug, Clone)]
pub struct Contact {
    entity: Entity,
}

impl Resource for Contact {
    const COLLECTION: &'static str = "contacts";
    const READ_ONLY_FIELDS: &'static [&'static str] = &[
        "id",
        "project_id",
        "time_created",
        "time_updated",
        "last_message_time",
        "last_incoming_message_time",
        "last_outgoing_message_time",
        "message_count",
        "incoming_message_count",
        "outgoing_message_count",
        "last_message_id",
        "group_ids",
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

impl Contact {
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

    /// Whether outgoing messages to this contact are blocked.
    pub fn send_blocked(&self) -> Result<Option<bool>, FieldError> {
        self.entity.data().get_bool("send_blocked")
    }

    pub fn set_send_blocked(&mut self, blocked: bool) -> Result<(), FieldError> {
        self.entity.data_mut().set("send_blocked", Value::Bool(blocked))
    }

    /// `active`, `handled` or `closed`.
    pub fn conversation_status(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("conversation_status")
    }

    pub fn set_conversation_status(&mut self, status: impl Into<String>) -> Result<(), FieldError> {
        self.entity
            .data_mut()
            .set("conversation_status", Value::String(status.into()))
    }

    pub fn default_route_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("default_route_id")
    }

    pub fn set_default_route_id(&mut self, route_id: impl Into<String>) -> Result<(), FieldError> {
        self.entity
            .data_mut()
            .set("default_route_id", Value::String(route_id.into()))
    }

    pub fn time_created(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("time_created")
    }

    pub fn last_message_time(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("last_message_time")
    }

    pub fn message_count(&self) -> Result<Option<i64>, FieldError> {
        self.entity.data().get_i64("message_count")
    }

    pub fn last_message_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("last_message_id")
    }

    pub fn group_ids(&self) -> Result<Vec<&str>, FieldError> {
        self.entity.data().get_str_list("group_ids")
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

    /// `PUT /projects/{project_id}/groups/{group_id}/contacts/{id}`.
    pub async fn add_to_group(&self, group: &Group) -> Result<(), TelerivetError> {
        self.entity
            .client()
            .execute(HttpMethod::Put, &self.membership_path(group), &[], None)
            .await?;
        Ok(())
    }

    /// `DELETE /projects/{project_id}/groups/{group_id}/contacts/{id}`.
    pub async fn remove_from_group(&self, group: &Group) -> Result<(), TelerivetError> {
        self.entity
            .client()
            .execute(HttpMethod::Delete, &self.membership_path(group), &[], None)
            .await?;
        Ok(())
    }

    /// Messages sent to or received from this contact.
    pub fn query_messages(&self, options: QueryOptions) -> Cursor<Message> {
        self.entity
            .client()
            .cursor(self.entity.child_path(Message::COLLECTION), options)
    }

    /// Groups this contact belongs to.
    pub fn query_groups(&self, options: QueryOptions) -> Cursor<Group> {
        self.entity
            .client()
            .cursor(self.entity.child_path(Group::COLLECTION), options)
    }

    fn membership_path(&self, group: &Group) -> String {
        group.entity().child_path(&format!("{}/{}", Self::COLLECTION, self.id()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::testing::{FakeTransport, fake_client};

    #[tokio::test]
    async fn group_membership_uses_group_contact_path() {
        let transport = FakeTransport::new();
        transport.push(200, "");
        transport.push(200, "");
        let project = fake_client(&transport).init_project_by_id("PJ1").unwrap();
        let contact = project.init_contact_by_id("CT1").unwrap();
        let group = project.init_group_by_id("CG1").unwrap();

        contact.add_to_group(&group).await.unwrap();
        contact.remove_from_group(&group).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].path, "/v1/projects/PJ1/groups/CG1/contacts/CT1");
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].path, "/v1/projects/PJ1/groups/CG1/contacts/CT1");
    }

    #[tokio::test]
    async fn query_messages_and_groups_use_contact_subpaths() {
        let transport = FakeTransport::new();
        transport.push_json(
            200,
            json!({"data": [{"id": "SM1", "project_id": "PJ1", "content": "hi"}], "truncated": false}),
        );
        transport.push_json(200, json!({"data": [], "truncated": false}));
        let project = fake_client(&transport).init_project_by_id("PJ1").unwrap();
        let contact = project.init_contact_by_id("CT1").unwrap();

        let messages = contact.query_messages(QueryOptions::new()).all().await.unwrap();
        assert_eq!(messages[0].content().unwrap(), Some("hi"));
        contact.query_groups(QueryOptions::new()).all().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].path, "/v1/projects/PJ1/contacts/CT1/messages");
        assert_eq!(requests[1].path, "/v1/projects/PJ1/contacts/CT1/groups");
    }

    #[test]
    fn counters_are_read_only() {
        let transport = FakeTransport::new();
        let project = fake_client(&transport).init_project_by_id("PJ1").unwrap();
        let mut contact = project.init_contact_by_id("CT1").unwrap();

        assert!(contact.set("message_count", json!(5)).is_err());
        assert!(contact.set_send_blocked(true).is_ok());
        assert_eq!(contact.send_blocked().unwrap(), Some(true));
    }
}
