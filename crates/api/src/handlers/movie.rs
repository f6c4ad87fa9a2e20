//! Handlers for the `/movies` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Extension;
use casting_core::error::CoreError;
use casting_core::types::DbId;
use casting_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use serde::Serialize;

use crate::auth::jwt::Claims;
use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, JsonObject};
use crate::response::Success;
use crate::state::AppState;

const ENTITY: &str = "Movie";

#[derive(Debug, Serialize)]
pub struct MovieList {
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct MovieBody {
    pub movie: Movie,
}

#[derive(Debug, Serialize)]
pub struct DeletedMovie {
    #[serde(rename = "movieID")]
    pub movie_id: DbId,
}

/// GET /movies
///
/// All movies ordered by id. An empty table is a 404.
pub async fn list_movies(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let movies = state.store.list_movies().await?;
    if movies.is_empty() {
        return Err(CoreError::EmptyCollection { entity: "movies" }.into());
    }
    Ok(Success::json(MovieList { movies }))
}

/// POST /movies
pub async fn create_movie(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> AppResult<impl IntoResponse> {
    let input = CreateMovie::from_body(&body)?;
    let movie = state
        .store
        .create_movie(&input)
        .await
        .map_err(AppError::unprocessable)?;

    tracing::info!(
        movie_id = movie.id,
        title = %movie.title,
        subject = claims.subject(),
        "Movie created",
    );

    Ok(Success::json(MovieBody { movie }))
}

/// PATCH /movies/{id}
///
/// Applies whichever of `title` / `release_date` the body carries.
pub async fn update_movie(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonObject(body): JsonObject,
) -> AppResult<impl IntoResponse> {
    let input = UpdateMovie::from_body(&body, state.config.patch_semantics)?;

    let movie = state
        .store
        .update_movie(id, &input)
        .await
        .map_err(AppError::unprocessable)?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

    tracing::info!(
        movie_id = id,
        unchanged = input.is_empty(),
        subject = claims.subject(),
        "Movie updated",
    );

    Ok(Success::json(MovieBody { movie }))
}

/// DELETE /movies/{id}
pub async fn delete_movie(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<impl IntoResponse> {
    state
        .store
        .find_movie(id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

    let deleted = state
        .store
        .delete_movie(id)
        .await
        .map_err(AppError::unprocessable)?;
    if !deleted {
        return Err(CoreError::NotFound { entity: ENTITY, id }.into());
    }

    tracing::info!(movie_id = id, subject = claims.subject(), "Movie deleted");

    Ok(Success::json(DeletedMovie { movie_id: id }))
}
