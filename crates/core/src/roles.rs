//! Well-known role names and the permissions each one carries.
//!
//! These mirror the role configuration in the identity provider. The service
//! itself only ever checks permissions; roles exist so development tokens
//! can be minted with realistic permission sets.

use crate::permissions::{
    DELETE_ACTORS, DELETE_MOVIES, GET_ACTORS, GET_MOVIES, PATCH_ACTORS, PATCH_MOVIES, POST_ACTORS,
    POST_MOVIES,
};

pub const ROLE_CASTING_ASSISTANT: &str = "casting-assistant";
pub const ROLE_CASTING_DIRECTOR: &str = "casting-director";
pub const ROLE_EXECUTIVE_PRODUCER: &str = "executive-producer";

const CASTING_ASSISTANT: &[&str] = &[GET_ACTORS, GET_MOVIES];

const CASTING_DIRECTOR: &[&str] = &[
    GET_ACTORS,
    GET_MOVIES,
    POST_ACTORS,
    DELETE_ACTORS,
    PATCH_ACTORS,
    PATCH_MOVIES,
];

const EXECUTIVE_PRODUCER: &[&str] = &[
    GET_ACTORS,
    GET_MOVIES,
    POST_ACTORS,
    DELETE_ACTORS,
    PATCH_ACTORS,
    PATCH_MOVIES,
    POST_MOVIES,
    DELETE_MOVIES,
];

/// Permissions granted to `role`, or `None` for an unknown role name.
pub fn permissions_for_role(role: &str) -> Option<&'static [&'static str]> {
    match role {
        ROLE_CASTING_ASSISTANT => Some(CASTING_ASSISTANT),
        ROLE_CASTING_DIRECTOR => Some(CASTING_DIRECTOR),
        ROLE_EXECUTIVE_PRODUCER => Some(EXECUTIVE_PRODUCER),
        _ => None,
    }
}
