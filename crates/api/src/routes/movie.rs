use axum::routing::{delete, get, patch, post};
use axum::Router;
use casting_core::permissions::{DELETE_MOVIES, GET_MOVIES, PATCH_MOVIES, POST_MOVIES};

use crate::handlers::movie;
use crate::middleware::permission::guarded;
use crate::state::AppState;

/// Routes mounted at `/movies`.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            guarded(get(movie::list_movies), state, GET_MOVIES)
                .merge(guarded(post(movie::create_movie), state, POST_MOVIES)),
        )
        .route(
            "/{id}",
            guarded(patch(movie::update_movie), state, PATCH_MOVIES)
                .merge(guarded(delete(movie::delete_movie), state, DELETE_MOVIES)),
        )
}
