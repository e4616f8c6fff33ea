//! Resource layer: the entity base and one typed wrapper per API resource.
//!
//! Every resource can exist in two states:
//! - loaded, built from a server response, answering for every field it carries;
//! - handle-only, built locally from its ids (`init_*_by_id`), which refuses access to
//!   any other field with [`FieldError::NotLoaded`] until [`Entity::load`] runs.

mod contact;
mod data_table;
mod group;
mod label;
mod message;
mod phone;
mod project;
mod receipt;
mod route;
mod scheduled_message;
mod service;

use serde_json::{Map, Value};

use crate::client::{HttpMethod, TelerivetClient, TelerivetError};
use crate::domain::{EntityData, FieldError, ResourceId};
use crate::transport::{TransportError, required_str};

pub use contact::Contact;
pub use data_table::DataTable;
pub use group::Group;
pub use label::Label;
pub use message::Message;
pub use phone::Phone;
pub use project::Project;
pub use receipt::MobileMoneyReceipt;
pub use route::Route;
pub use scheduled_message::ScheduledMessage;
pub use service::Service;

/// A typed API resource backed by an [`Entity`].
pub trait Resource: Sized {
    /// Collection segment in the URL (`contacts`, `groups`, ...).
    const COLLECTION: &'static str;
    /// Fields the client refuses to write.
    const READ_ONLY_FIELDS: &'static [&'static str];
    /// Whether instances live under `/projects/{project_id}/`.
    const PROJECT_SCOPED: bool = true;

    fn from_entity(entity: Entity) -> Self;

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    fn id(&self) -> &ResourceId {
        self.entity().id()
    }

    /// Project the resource belongs to. For a project this is its own id.
    fn project_id(&self) -> &ResourceId {
        self.entity().project_id()
    }

    fn is_loaded(&self) -> bool {
        self.entity().data().is_loaded()
    }

    /// Raw field access for fields without a typed accessor.
    fn get(&self, field: &str) -> Result<Option<&Value>, FieldError> {
        self.entity().data().get(field)
    }

    /// Raw field write; marks the field dirty for the next save.
    fn set(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        self.entity_mut().data_mut().set(field, value)
    }

    /// Custom variable lookup (`vars.name`).
    fn var(&self, name: &str) -> Result<Option<&Value>, FieldError> {
        Ok(self
            .entity()
            .data()
            .get_object(EntityData::VARS)?
            .and_then(|vars| vars.get(name)))
    }

    fn set_var(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        self.entity_mut().data_mut().set_var(name, value)
    }
}

/// Client-bound entity record: ids, instance path, and a dirty-tracked field map.
#[derive(Debug, Clone)]
pub struct Entity {
    client: TelerivetClient,
    collection: &'static str,
    project_scoped: bool,
    id: ResourceId,
    project_id: ResourceId,
    data: EntityData,
}

impl Entity {
    /// Build a loaded entity from a response body.
    pub(crate) fn from_fields<T: Resource>(
        client: TelerivetClient,
        fields: Map<String, Value>,
        loaded: bool,
    ) -> Result<Self, TelerivetError> {
        let id = response_id(&fields, "id")?;
        let project_id = if T::PROJECT_SCOPED {
            response_id(&fields, "project_id")?
        } else {
            id.clone()
        };
        Ok(Self {
            client,
            collection: T::COLLECTION,
            project_scoped: T::PROJECT_SCOPED,
            id,
            project_id,
            data: EntityData::new(fields, loaded, T::READ_ONLY_FIELDS),
        })
    }

    /// Build a handle-only entity. No request is made.
    pub(crate) fn handle<T: Resource>(
        client: TelerivetClient,
        project_id: ResourceId,
        id: ResourceId,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_owned(), Value::String(id.as_str().to_owned()));
        if T::PROJECT_SCOPED {
            fields.insert(
                "project_id".to_owned(),
                Value::String(project_id.as_str().to_owned()),
            );
        }
        Self {
            client,
            collection: T::COLLECTION,
            project_scoped: T::PROJECT_SCOPED,
            id,
            project_id,
            data: EntityData::new(fields, false, T::READ_ONLY_FIELDS),
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn project_id(&self) -> &ResourceId {
        &self.project_id
    }

    pub fn client(&self) -> &TelerivetClient {
        &self.client
    }

    pub fn data(&self) -> &EntityData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut EntityData {
        &mut self.data
    }

    /// Instance path relative to the API base URL.
    pub fn path(&self) -> String {
        if self.project_scoped {
            format!("/projects/{}/{}/{}", self.project_id, self.collection, self.id)
        } else {
            format!("/{}/{}", self.collection, self.id)
        }
    }

    /// Fetch all fields from the server. Locally modified fields keep their values.
    pub async fn load(&mut self) -> Result<(), TelerivetError> {
        let fields = self
            .client
            .request_object(HttpMethod::Get, &self.path(), None)
            .await?;
        self.data.replace_loaded(fields);
        Ok(())
    }

    /// Send the dirty fields, and only those, to the server.
    ///
    /// Nothing is sent when no field changed. The dirty set is cleared only on success.
    pub async fn save(&mut self) -> Result<(), TelerivetError> {
        if !self.data.is_dirty() {
            tracing::debug!(path = %self.path(), "nothing to save");
            return Ok(());
        }
        let path = self.path();
        tracing::debug!(
            %path,
            fields = ?self.data.dirty_keys().collect::<Vec<_>>(),
            "saving entity"
        );
        let body = Value::Object(self.data.dirty_fields());
        self.client
            .execute(HttpMethod::Post, &path, &[], Some(body))
            .await?;
        self.data.clear_dirty();
        Ok(())
    }

    pub async fn delete(self) -> Result<(), TelerivetError> {
        self.client
            .execute(HttpMethod::Delete, &self.path(), &[], None)
            .await?;
        Ok(())
    }

    /// Path of a sub-collection or action under this entity (`{path}/{suffix}`).
    pub(crate) fn child_path(&self, suffix: &str) -> String {
        format!("{}/{suffix}", self.path())
    }
}

fn response_id(fields: &Map<String, Value>, field: &'static str) -> Result<ResourceId, TelerivetError> {
    let raw = required_str(fields, field).map_err(|err| TelerivetError::Parse(Box::new(err)))?;
    ResourceId::from_response(raw).map_err(|source| {
        TelerivetError::Parse(Box::new(TransportError::InvalidField { field, source }))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::testing::{FakeTransport, fake_client};

    fn loaded_contact(transport: &FakeTransport) -> Contact {
        let fields = json!({"id": "CT1", "project_id": "PJ1", "name": "Ann"});
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        let entity = Entity::from_fields::<Contact>(fake_client(transport), fields, true).unwrap();
        Contact::from_entity(entity)
    }

    #[test]
    fn paths_follow_scope() {
        let transport = FakeTransport::new();
        let contact = loaded_contact(&transport);
        assert_eq!(contact.entity().path(), "/projects/PJ1/contacts/CT1");

        let project = fake_client(&transport).init_project_by_id("PJ1").unwrap();
        assert_eq!(project.entity().path(), "/projects/PJ1");
        assert_eq!(project.project_id().as_str(), "PJ1");
    }

    #[test]
    fn id_fields_are_read_only_everywhere() {
        let transport = FakeTransport::new();
        let mut contact = loaded_contact(&transport);
        for field in ["id", "project_id"] {
            assert!(matches!(
                contact.set(field, json!("X")),
                Err(FieldError::ReadOnly { .. })
            ));
        }
    }

    #[tokio::test]
    async fn save_posts_only_dirty_fields_and_clears_them() {
        let transport = FakeTransport::new();
        transport.push_json(200, json!({"id": "CT1", "project_id": "PJ1"}));
        let mut contact = loaded_contact(&transport);

        contact.set_name("Bob").unwrap();
        contact.set_var("tier", json!("gold")).unwrap();
        contact.save().await.unwrap();

        let request = transport.only_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/v1/projects/PJ1/contacts/CT1");
        assert_eq!(
            request.body,
            Some(json!({"name": "Bob", "vars": {"tier": "gold"}}))
        );
        assert!(!contact.entity().data().is_dirty());
    }

    #[tokio::test]
    async fn save_without_changes_sends_nothing() {
        let transport = FakeTransport::new();
        let mut contact = loaded_contact(&transport);
        contact.save().await.unwrap();
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn failed_save_keeps_dirty_fields() {
        let transport = FakeTransport::new();
        transport.push_json(400, json!({"error": {"code": "invalid_param", "message": "bad"}}));
        let mut contact = loaded_contact(&transport);

        contact.set_name("Bob").unwrap();
        assert!(matches!(
            contact.save().await.unwrap_err(),
            TelerivetError::Api { status: 400, .. }
        ));
        assert!(contact.entity().data().is_dirty());
    }

    #[tokio::test]
    async fn load_populates_handle_only_entity() {
        let transport = FakeTransport::new();
        transport.push_json(
            200,
            json!({"id": "CT1", "project_id": "PJ1", "name": "Ann", "phone_number": "+15551234567"}),
        );
        let project = fake_client(&transport).init_project_by_id("PJ1").unwrap();
        let mut contact = project.init_contact_by_id("CT1").unwrap();
        assert!(matches!(
            contact.name(),
            Err(FieldError::NotLoaded { .. })
        ));

        contact.load().await.unwrap();
        assert!(contact.is_loaded());
        assert_eq!(contact.name().unwrap(), Some("Ann"));

        let request = transport.only_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/v1/projects/PJ1/contacts/CT1");
    }

    #[tokio::test]
    async fn save_sends_only_the_variables_written_locally() {
        let transport = FakeTransport::new();
        transport.push(200, "{}");
        let fields = json!({"id": "CT1", "project_id": "PJ1", "vars": {"a": 1, "b": 2}});
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        let mut contact = Contact::from_entity(
            Entity::from_fields::<Contact>(fake_client(&transport), fields, true).unwrap(),
        );

        contact.set_var("c", json!(3)).unwrap();
        contact.save().await.unwrap();

        assert_eq!(transport.only_request().body, Some(json!({"vars": {"c": 3}})));
        assert_eq!(contact.var("a").unwrap(), Some(&json!(1)));
        assert_eq!(contact.var("c").unwrap(), Some(&json!(3)));
    }

    #[tokio::test]
    async fn load_after_set_var_keeps_server_variables() {
        let transport = FakeTransport::new();
        transport.push_json(
            200,
            json!({"id": "CT1", "project_id": "PJ1", "vars": {"city": "Nairobi"}}),
        );
        let project = fake_client(&transport).init_project_by_id("PJ1").unwrap();
        let mut contact = project.init_contact_by_id("CT1").unwrap();

        contact.set_var("tier", json!("gold")).unwrap();
        contact.load().await.unwrap();

        assert_eq!(contact.var("city").unwrap(), Some(&json!("Nairobi")));
        assert_eq!(contact.var("tier").unwrap(), Some(&json!("gold")));
        assert!(contact.entity().data().is_dirty());
    }

    #[tokio::test]
    async fn deleted_variable_disappears_after_save() {
        let transport = FakeTransport::new();
        transport.push(200, "{}");
        let fields = json!({"id": "CT1", "project_id": "PJ1", "vars": {"old": "x"}});
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        let mut contact = Contact::from_entity(
            Entity::from_fields::<Contact>(fake_client(&transport), fields, true).unwrap(),
        );

        contact.set_var("old", Value::Null).unwrap();
        contact.save().await.unwrap();

        assert_eq!(transport.only_request().body, Some(json!({"vars": {"old": null}})));
        assert_eq!(contact.var("old").unwrap(), None);
        assert!(contact.vars().unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn response_ids_longer_than_client_limit_are_accepted() {
        let transport = FakeTransport::new();
        let long_id = "CT".repeat(30);
        transport.push_json(
            200,
            json!({"data": [{"id": long_id, "project_id": "PJ1"}], "truncated": false}),
        );
        let project = fake_client(&transport).init_project_by_id("PJ1").unwrap();

        let contacts = project
            .query_contacts(crate::domain::QueryOptions::new())
            .all()
            .await
            .unwrap();
        assert_eq!(contacts[0].id().as_str(), long_id);
    }

    #[tokio::test]
    async fn empty_response_id_is_a_parse_error() {
        let transport = FakeTransport::new();
        transport.push_json(200, json!({"id": " ", "project_id": "PJ1"}));
        let project = fake_client(&transport).init_project_by_id("PJ1").unwrap();

        let err = project.get_contact_by_id("CT1").await.unwrap_err();
        assert!(matches!(err, TelerivetError::Parse(_)));
    }

    #[tokio::test]
    async fn delete_issues_delete_on_instance_path() {
        let transport = FakeTransport::new();
        transport.push(200, "");
        let contact = loaded_contact(&transport);
        contact.delete().await.unwrap();

        let request = transport.only_request();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "/v1/projects/PJ1/contacts/CT1");
    }

    #[test]
    fn var_reads_from_vars_object() {
        let transport = FakeTransport::new();
        let fields = json!({"id": "CT1", "project_id": "PJ1", "vars": {"city": "Nairobi"}});
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        let contact = Contact::from_entity(
            Entity::from_fields::<Contact>(fake_client(&transport), fields, true).unwrap(),
        );
        assert_eq!(contact.var("city").unwrap(), Some(&json!("Nairobi")));
        assert_eq!(contact.var("missing").unwrap(), None);
    }
}
