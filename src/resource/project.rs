use serde_json::{Map, Value, json};

use super::{
    Contact, DataTable, Entity, Group, Label, Message, MobileMoneyReceipt, Phone, Resource, Route,
    ScheduledMessage, Service,
};
use crate::client::{Cursor, HttpMethod, TelerivetClient, TelerivetError, to_body};
use crate::domain::{
    ContactLookup, FieldError, QueryOptions, ResourceId, ScheduleMessage, SendMessage,
    SendMessages, ValidationError,
};

/// A Telerivet project and the entry point for everything scoped to it.
///
/// Each method maps to exactly one HTTP call (or none, for `init_*_by_id`). Nothing is
/// cached between calls.
#[derive(Debug, Clone)]
pub struct Project {
    entity: Entity,
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";
    const READ_ONLY_FIELDS: &'static [&'static str] =
        &["id", "project_id", "timezone_id", "url_slug", "organization_id"];
    const PROJECT_SCOPED: bool = false;

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

impl Project {
    pub fn name(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldError> {
        self.entity
            .data_mut()
            .set("name", Value::String(name.into()))
    }

    /// IANA timezone name, e.g. `America/Los_Angeles`.
    pub fn timezone_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("timezone_id")
    }

    pub fn url_slug(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("url_slug")
    }

    pub fn organization_id(&self) -> Result<Option<&str>, FieldError> {
        self.entity.data().get_str("organization_id")
    }

    pub fn vars(&self) -> Result<Option<&Map<String, Value>>, FieldError> {
        self.entity.data().get_object("vars")
    }

    /// Replace the custom variables sent on the next save.
    pub fn set_vars(&mut self, vars: Map<String, Value>) -> Result<(), FieldError> {
        self.entity.data_mut().set("vars", Value::Object(vars))
    }

    pub async fn load(&mut self) -> Result<(), TelerivetError> {
        self.entity.load().await
    }

    /// Save the modified fields (`POST /projects/{id}`).
    pub async fn save(&mut self) -> Result<(), TelerivetError> {
        self.entity.save().await
    }

    /// Send one message (`POST /projects/{id}/messages/send`).
    pub async fn send_message(&self, options: &SendMessage) -> Result<Message, TelerivetError> {
        let path = format!("{}/send", self.collection_path::<Message>());
        self.client()
            .request_entity(HttpMethod::Post, &path, Some(to_body(options)?))
            .await
    }

    /// Send one message to many recipients (`POST /projects/{id}/messages/send_batch`).
    ///
    /// The response is returned as-is.
    pub async fn send_messages(&self, options: &SendMessages) -> Result<Value, TelerivetError> {
        let path = format!("{}/send_batch", self.collection_path::<Message>());
        self.client()
            .do_request(HttpMethod::Post, &path, &[], Some(to_body(options)?))
            .await
    }

    /// Schedule a message (`POST /projects/{id}/scheduled`).
    pub async fn schedule_message(
        &self,
        options: &ScheduleMessage,
    ) -> Result<ScheduledMessage, TelerivetError> {
        let path = self.collection_path::<ScheduledMessage>();
        self.client()
            .request_entity(HttpMethod::Post, &path, Some(to_body(options)?))
            .await
    }

    /// Look up a contact and update it, or create it (`POST /projects/{id}/contacts`).
    ///
    /// Matching happens server-side; the single returned contact is used as-is.
    pub async fn get_or_create_contact(
        &self,
        options: &ContactLookup,
    ) -> Result<Contact, TelerivetError> {
        let path = self.collection_path::<Contact>();
        self.client()
            .request_entity(HttpMethod::Post, &path, Some(to_body(options)?))
            .await
    }

    /// Lazy query over contacts (`GET /projects/{id}/contacts`).
    ///
    /// Nothing is sent until the cursor is polled; page errors surface from [`Cursor::next`].
    pub fn query_contacts(&self, options: QueryOptions) -> Cursor<Contact> {
        self.query(options)
    }

    /// Fetch one contact (`GET /projects/{id}/contacts/{contact_id}`).
    ///
    /// Errors:
    /// - [`TelerivetError::Validation`] for an empty or over-long id, before any request,
    /// - [`TelerivetError::Api`] when the server reports an error such as `not_found`,
    /// - [`TelerivetError::HttpStatus`] for other non-2xx responses,
    /// - [`TelerivetError::Parse`] when the body is not a contact object.
    pub async fn get_contact_by_id(&self, id: impl Into<String>) -> Result<Contact, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Build a handle from its id without a network call.
    ///
    /// Errors:
    /// - [`ValidationError::Empty`] or [`ValidationError::IdTooLong`] for an invalid id.
    pub fn init_contact_by_id(&self, id: impl Into<String>) -> Result<Contact, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over phones (`GET /projects/{id}/phones`).
    pub fn query_phones(&self, options: QueryOptions) -> Cursor<Phone> {
        self.query(options)
    }

    /// Fetch one (`GET /projects/{id}/phones/{phone_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_phone_by_id(&self, id: impl Into<String>) -> Result<Phone, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_phone_by_id(&self, id: impl Into<String>) -> Result<Phone, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over messages (`GET /projects/{id}/messages`).
    pub fn query_messages(&self, options: QueryOptions) -> Cursor<Message> {
        self.query(options)
    }

    /// Fetch one (`GET /projects/{id}/messages/{message_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_message_by_id(&self, id: impl Into<String>) -> Result<Message, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_message_by_id(&self, id: impl Into<String>) -> Result<Message, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over groups (`GET /projects/{id}/groups`).
    pub fn query_groups(&self, options: QueryOptions) -> Cursor<Group> {
        self.query(options)
    }

    /// Group with the given name, created if missing (`POST /projects/{id}/groups`).
    pub async fn get_or_create_group(
        &self,
        name: impl Into<String>,
    ) -> Result<Group, TelerivetError> {
        self.get_or_create_named(name.into()).await
    }

    /// Fetch one (`GET /projects/{id}/groups/{group_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_group_by_id(&self, id: impl Into<String>) -> Result<Group, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_group_by_id(&self, id: impl Into<String>) -> Result<Group, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over labels (`GET /projects/{id}/labels`).
    pub fn query_labels(&self, options: QueryOptions) -> Cursor<Label> {
        self.query(options)
    }

    /// Label with the given name, created if missing (`POST /projects/{id}/labels`).
    pub async fn get_or_create_label(
        &self,
        name: impl Into<String>,
    ) -> Result<Label, TelerivetError> {
        self.get_or_create_named(name.into()).await
    }

    /// Fetch one (`GET /projects/{id}/labels/{label_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_label_by_id(&self, id: impl Into<String>) -> Result<Label, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_label_by_id(&self, id: impl Into<String>) -> Result<Label, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over data tables (`GET /projects/{id}/tables`).
    pub fn query_data_tables(&self, options: QueryOptions) -> Cursor<DataTable> {
        self.query(options)
    }

    /// Data table with the given name, created if missing (`POST /projects/{id}/tables`).
    pub async fn get_or_create_data_table(
        &self,
        name: impl Into<String>,
    ) -> Result<DataTable, TelerivetError> {
        self.get_or_create_named(name.into()).await
    }

    /// Fetch one (`GET /projects/{id}/tables/{data_table_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_data_table_by_id(
        &self,
        id: impl Into<String>,
    ) -> Result<DataTable, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_data_table_by_id(&self, id: impl Into<String>) -> Result<DataTable, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over scheduled messages (`GET /projects/{id}/scheduled`).
    pub fn query_scheduled_messages(&self, options: QueryOptions) -> Cursor<ScheduledMessage> {
        self.query(options)
    }

    /// Fetch one (`GET /projects/{id}/scheduled/{scheduled_message_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_scheduled_message_by_id(
        &self,
        id: impl Into<String>,
    ) -> Result<ScheduledMessage, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_scheduled_message_by_id(
        &self,
        id: impl Into<String>,
    ) -> Result<ScheduledMessage, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over services (`GET /projects/{id}/services`).
    pub fn query_services(&self, options: QueryOptions) -> Cursor<Service> {
        self.query(options)
    }

    /// Fetch one (`GET /projects/{id}/services/{service_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_service_by_id(&self, id: impl Into<String>) -> Result<Service, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_service_by_id(&self, id: impl Into<String>) -> Result<Service, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over mobile money receipts (`GET /projects/{id}/receipts`).
    pub fn query_receipts(&self, options: QueryOptions) -> Cursor<MobileMoneyReceipt> {
        self.query(options)
    }

    /// Fetch one (`GET /projects/{id}/receipts/{receipt_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_receipt_by_id(
        &self,
        id: impl Into<String>,
    ) -> Result<MobileMoneyReceipt, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_receipt_by_id(
        &self,
        id: impl Into<String>,
    ) -> Result<MobileMoneyReceipt, ValidationError> {
        self.init_by_id(id)
    }

    /// Lazy query over custom routes (`GET /projects/{id}/routes`).
    pub fn query_routes(&self, options: QueryOptions) -> Cursor<Route> {
        self.query(options)
    }

    /// Fetch one (`GET /projects/{id}/routes/{route_id}`).
    ///
    /// Errors as for [`Project::get_contact_by_id`].
    pub async fn get_route_by_id(&self, id: impl Into<String>) -> Result<Route, TelerivetError> {
        self.get_by_id(id).await
    }

    /// Handle without a network call. Fails only on an invalid id.
    pub fn init_route_by_id(&self, id: impl Into<String>) -> Result<Route, ValidationError> {
        self.init_by_id(id)
    }

    fn client(&self) -> &TelerivetClient {
        self.entity.client()
    }

    fn collection_path<T: Resource>(&self) -> String {
        format!("{}/{}", self.entity.path(), T::COLLECTION)
    }

    fn query<T: Resource>(&self, options: QueryOptions) -> Cursor<T> {
        self.client().cursor(self.collection_path::<T>(), options)
    }

    async fn get_by_id<T: Resource>(&self, id: impl Into<String>) -> Result<T, TelerivetError> {
        let id = ResourceId::new(id)?;
        let path = format!("{}/{id}", self.collection_path::<T>());
        self.client()
            .request_entity(HttpMethod::Get, &path, None)
            .await
    }

    fn init_by_id<T: Resource>(&self, id: impl Into<String>) -> Result<T, ValidationError> {
        let id = ResourceId::new(id)?;
        Ok(T::from_entity(Entity::handle::<T>(
            self.client().clone(),
            self.id().clone(),
            id,
        )))
    }

    async fn get_or_create_named<T: Resource>(&self, name: String) -> Result<T, TelerivetError> {
        let path = self.collection_path::<T>();
        self.client()
            .request_entity(HttpMethod::Post, &path, Some(json!({ "name": name })))
            .await
    }
}
