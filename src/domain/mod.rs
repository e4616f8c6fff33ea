//! Domain layer: strong types with validation and invariants (no I/O).

mod entity;
mod query;
mod request;
mod validation;
mod value;

pub use entity::{EntityData, FieldError};
pub use query::{Filter, Modifier, QueryOptions, SortDirection};
pub use request::{ContactLookup, ScheduleMessage, SendMessage, SendMessages};
pub use validation::ValidationError;
pub use value::{ApiKey, PageSize, PhoneNumber, ResourceId};
