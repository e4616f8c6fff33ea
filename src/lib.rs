//! Typed Rust client for the Telerivet REST API.
//!
//! The crate is layered: a domain layer of strong types and request options, a
//! transport layer for wire-format details, a client layer that issues authenticated
//! requests, and a resource layer of dirty-tracked entities (projects, contacts,
//! messages, ...) with lazy paginated cursors.
//!
//! ```rust,no_run
//! use telerivet::{ApiKey, QueryOptions, Resource, SendMessage, TelerivetClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelerivetClient::new(ApiKey::new("...")?);
//!     let project = client.init_project_by_id("PJ...")?;
//!
//!     let message = project
//!         .send_message(&SendMessage::to_number("+16505550123", "hello"))
//!         .await?;
//!     println!("{} {:?}", message.id(), message.status()?);
//!
//!     let mut contacts = project.query_contacts(QueryOptions::new().eq("name", "Ann"));
//!     while let Some(contact) = contacts.next().await? {
//!         println!("{:?}", contact.phone_number()?);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod resource;
mod transport;

pub use client::{Cursor, HttpMethod, TelerivetClient, TelerivetClientBuilder, TelerivetError};
pub use domain::{
    ApiKey, ContactLookup, EntityData, FieldError, Filter, Modifier, PageSize, PhoneNumber,
    QueryOptions, ResourceId, ScheduleMessage, SendMessage, SendMessages, SortDirection,
    ValidationError,
};
pub use resource::{
    Contact, DataTable, Entity, Group, Label, Message, MobileMoneyReceipt, Phone, Project,
    Resource, Route, ScheduledMessage, Service,
};
