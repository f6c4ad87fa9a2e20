use axum::routing::{delete, get, patch, post};
use axum::Router;
use casting_core::permissions::{DELETE_ACTORS, GET_ACTORS, PATCH_ACTORS, POST_ACTORS};

use crate::handlers::actor;
use crate::middleware::permission::guarded;
use crate::state::AppState;

/// Routes mounted at `/actors`.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            guarded(get(actor::list_actors), state, GET_ACTORS)
                .merge(guarded(post(actor::create_actor), state, POST_ACTORS)),
        )
        .route(
            "/{id}",
            guarded(patch(actor::update_actor), state, PATCH_ACTORS)
                .merge(guarded(delete(actor::delete_actor), state, DELETE_ACTORS)),
        )
}
