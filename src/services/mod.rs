//! Business logic services.

pub mod query;
pub mod resource;
