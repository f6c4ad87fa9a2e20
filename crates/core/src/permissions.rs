//! Permission strings and the check the permission gate runs per route.
//!
//! A permission is a `verb:resource` tag granted to a bearer credential by
//! the identity provider. Each route requires exactly one.

use crate::error::AuthError;

pub const GET_ACTORS: &str = "get:actors";
pub const POST_ACTORS: &str = "post:actors";
pub const PATCH_ACTORS: &str = "patch:actors";
pub const DELETE_ACTORS: &str = "delete:actors";

pub const GET_MOVIES: &str = "get:movies";
pub const POST_MOVIES: &str = "post:movies";
pub const PATCH_MOVIES: &str = "patch:movies";
pub const DELETE_MOVIES: &str = "delete:movies";

/// Every permission the service checks.
pub const ALL_PERMISSIONS: &[&str] = &[
    GET_ACTORS,
    POST_ACTORS,
    PATCH_ACTORS,
    DELETE_ACTORS,
    GET_MOVIES,
    POST_MOVIES,
    PATCH_MOVIES,
    DELETE_MOVIES,
];

/// Check that `required` is among the `granted` permissions.
///
/// `granted` is `None` when the claim set carries no `permissions` field at
/// all, which is a malformed credential rather than a missing grant.
pub fn check_permission(granted: Option<&[String]>, required: &str) -> Result<(), AuthError> {
    let granted = granted.ok_or(AuthError::PermissionsMissingInClaims)?;
    if granted.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(AuthError::Forbidden {
            permission: required.to_string(),
        })
    }
}

/// Return `true` if `value` is one of the permissions the service knows.
pub fn is_known_permission(value: &str) -> bool {
    ALL_PERMISSIONS.contains(&value)
}
