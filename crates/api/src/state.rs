use std::sync::Arc;

use casting_db::store::RecordStore;

use crate::auth::jwt::TokenVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backing record store (PostgreSQL or in-memory).
    pub store: Arc<dyn RecordStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bearer-token verifier used by the permission gate.
    pub verifier: Arc<TokenVerifier>,
}
