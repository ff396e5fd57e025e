//! Request and response types for the RescueGroups API

/// Animal records and search parameters
pub mod animal;
/// Wire envelopes
pub mod envelope;
/// Tolerant deserializers for upstream values
mod lenient;
/// Organization records
pub mod organization;
/// Parsed result pages
pub mod page;

pub use animal::{Animal, AnimalPicture, AnimalSearchParams};
pub use envelope::{
    Criteria, EnvelopeStatus, Filter, FilterOperation, ObjectType, RequestEnvelope,
    ResponseEnvelope, SearchBlock, SortOrder,
};
pub use organization::Organization;
pub use page::Page;
