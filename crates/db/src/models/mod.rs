//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO with every required field, built from a request body
//! - An update DTO (all `Option` fields) for partial updates

pub mod actor;
pub mod movie;
