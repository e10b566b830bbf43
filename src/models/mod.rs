//! Domain records, DTOs, and list/paging primitives.

pub mod filter;
pub mod page_window;
pub mod pagination;
pub mod resource;
