//! API resource implementations for the RescueGroups client

/// Animal search and lookup
pub mod animals;
/// Organization lookup
pub mod organizations;

pub use animals::Animals;
pub use organizations::Organizations;
