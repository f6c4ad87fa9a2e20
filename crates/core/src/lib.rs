//! Domain logic for the casting agency service.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` and
//! `api` crates build on these types and rules.

pub mod error;
pub mod patch;
pub mod permissions;
pub mod release_date;
pub mod roles;
pub mod types;
pub mod validation;
