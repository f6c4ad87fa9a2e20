//! Request middleware.
//!
//! - [`permission::permission_gate`] -- Verifies the bearer token and checks
//!   one required permission before the wrapped handler runs.
//! - [`permission::guarded`] -- Attaches the gate to a method router.

pub mod permission;
