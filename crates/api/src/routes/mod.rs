pub mod actor;
pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Every route carries its own permission gate:
///
/// ```text
/// GET    /movies          get:movies
/// POST   /movies          post:movies
/// PATCH  /movies/{id}     patch:movies
/// DELETE /movies/{id}     delete:movies
///
/// GET    /actors          get:actors
/// POST   /actors          post:actors
/// PATCH  /actors/{id}     patch:actors
/// DELETE /actors/{id}     delete:actors
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/movies", movie::router(state))
        .nest("/actors", actor::router(state))
}
