//! Handlers for the `/actors` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Extension;
use casting_core::error::CoreError;
use casting_core::types::DbId;
use casting_db::models::actor::{Actor, CreateActor, UpdateActor};
use serde::Serialize;

use crate::auth::jwt::Claims;
use crate::error::{AppError, AppResult};
use crate::extract::{EntityId, JsonObject};
use crate::response::Success;
use crate::state::AppState;

const ENTITY: &str = "Actor";

#[derive(Debug, Serialize)]
pub struct ActorList {
    pub actors: Vec<Actor>,
}

#[derive(Debug, Serialize)]
pub struct ActorBody {
    pub actor: Actor,
}

#[derive(Debug, Serialize)]
pub struct DeletedActor {
    #[serde(rename = "actorID")]
    pub actor_id: DbId,
}

/// GET /actors
///
/// All actors ordered by id; 404 when there are none.
pub async fn list_actors(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let actors = state.store.list_actors().await?;
    if actors.is_empty() {
        return Err(CoreError::EmptyCollection { entity: "actors" }.into());
    }
    Ok(Success::json(ActorList { actors }))
}

/// POST /actors
pub async fn create_actor(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> AppResult<impl IntoResponse> {
    let input = CreateActor::from_body(&body)?;
    let actor = state
        .store
        .create_actor(&input)
        .await
        .map_err(AppError::unprocessable)?;

    tracing::info!(
        actor_id = actor.id,
        name = %actor.name,
        subject = claims.subject(),
        "Actor created",
    );

    Ok(Success::json(ActorBody { actor }))
}

/// PATCH /actors/{id}
///
/// Applies any subset of `name`, `gender` and `age`.
pub async fn update_actor(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonObject(body): JsonObject,
) -> AppResult<impl IntoResponse> {
    let input = UpdateActor::from_body(&body, state.config.patch_semantics)?;

    let actor = state
        .store
        .update_actor(id, &input)
        .await
        .map_err(AppError::unprocessable)?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

    tracing::info!(
        actor_id = id,
        unchanged = input.is_empty(),
        subject = claims.subject(),
        "Actor updated",
    );

    Ok(Success::json(ActorBody { actor }))
}

/// DELETE /actors/{id}
pub async fn delete_actor(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<impl IntoResponse> {
    state
        .store
        .find_actor(id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

    let deleted = state
        .store
        .delete_actor(id)
        .await
        .map_err(AppError::unprocessable)?;
    if !deleted {
        return Err(CoreError::NotFound { entity: ENTITY, id }.into());
    }

    tracing::info!(actor_id = id, subject = claims.subject(), "Actor deleted");

    Ok(Success::json(DeletedActor { actor_id: id }))
}
