//! Shared response envelope for API handlers.
//!
//! Every successful response is a flat JSON object carrying
//! `"success": true` next to the payload's own keys, e.g.
//! `{ "success": true, "movies": [...] }`. Use [`Success`] instead of ad-hoc
//! `serde_json::json!` so payloads stay typed.

use axum::Json;
use serde::Serialize;

/// `{ "success": true, ...payload }` envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Success::json(MovieList { movies }))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Success<T> {
    pub fn json(payload: T) -> Json<Self> {
        Json(Self {
            success: true,
            payload,
        })
    }
}
