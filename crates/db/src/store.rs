//! The record store handlers are written against.
//!
//! The API never touches a pool directly. It holds an
//! `Arc<dyn RecordStore>` in its state, so the backing store can be
//! PostgreSQL ([`PgStore`]) or in-process ([`crate::memory::MemoryStore`]).

use async_trait::async_trait;
use casting_core::types::DbId;

use crate::error::StoreResult;
use crate::models::actor::{Actor, CreateActor, UpdateActor};
use crate::models::movie::{CreateMovie, Movie, UpdateMovie};
use crate::repositories::{ActorRepo, MovieRepo};
use crate::DbPool;

/// Row lifecycle for movies.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All movies, ordered by id ascending.
    async fn list_movies(&self) -> StoreResult<Vec<Movie>>;

    async fn find_movie(&self, id: DbId) -> StoreResult<Option<Movie>>;

    async fn find_movie_by_title(&self, title: &str) -> StoreResult<Option<Movie>>;

    async fn create_movie(&self, input: &CreateMovie) -> StoreResult<Movie>;

    /// Apply `input` to the row with `id`. `None` if there is no such row.
    async fn update_movie(&self, id: DbId, input: &UpdateMovie) -> StoreResult<Option<Movie>>;

    /// Remove the row with `id`. `false` if there was no such row.
    async fn delete_movie(&self, id: DbId) -> StoreResult<bool>;
}

/// Row lifecycle for actors.
#[async_trait]
pub trait ActorStore: Send + Sync {
    /// All actors, ordered by id ascending.
    async fn list_actors(&self) -> StoreResult<Vec<Actor>>;

    async fn find_actor(&self, id: DbId) -> StoreResult<Option<Actor>>;

    async fn find_actor_by_name(&self, name: &str) -> StoreResult<Option<Actor>>;

    async fn create_actor(&self, input: &CreateActor) -> StoreResult<Actor>;

    /// Apply `input` to the row with `id`. `None` if there is no such row.
    async fn update_actor(&self, id: DbId, input: &UpdateActor) -> StoreResult<Option<Actor>>;

    /// Remove the row with `id`. `false` if there was no such row.
    async fn delete_actor(&self, id: DbId) -> StoreResult<bool>;
}

/// A complete backing store for the service.
#[async_trait]
pub trait RecordStore: MovieStore + ActorStore {
    /// Short name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// Confirm the store can serve requests.
    async fn health_check(&self) -> StoreResult<()>;

    /// Release held resources. Called once after the server stops.
    async fn close(&self) {}
}

/// PostgreSQL-backed store delegating to the repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        Ok(MovieRepo::list(&self.pool).await?)
    }

    async fn find_movie(&self, id: DbId) -> StoreResult<Option<Movie>> {
        Ok(MovieRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_movie_by_title(&self, title: &str) -> StoreResult<Option<Movie>> {
        Ok(MovieRepo::find_by_title(&self.pool, title).await?)
    }

    async fn create_movie(&self, input: &CreateMovie) -> StoreResult<Movie> {
        Ok(MovieRepo::create(&self.pool, input).await?)
    }

    async fn update_movie(&self, id: DbId, input: &UpdateMovie) -> StoreResult<Option<Movie>> {
        Ok(MovieRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_movie(&self, id: DbId) -> StoreResult<bool> {
        Ok(MovieRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl ActorStore for PgStore {
    async fn list_actors(&self) -> StoreResult<Vec<Actor>> {
        Ok(ActorRepo::list(&self.pool).await?)
    }

    async fn find_actor(&self, id: DbId) -> StoreResult<Option<Actor>> {
        Ok(ActorRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_actor_by_name(&self, name: &str) -> StoreResult<Option<Actor>> {
        Ok(ActorRepo::find_by_name(&self.pool, name).await?)
    }

    async fn create_actor(&self, input: &CreateActor) -> StoreResult<Actor> {
        Ok(ActorRepo::create(&self.pool, input).await?)
    }

    async fn update_actor(&self, id: DbId, input: &UpdateActor) -> StoreResult<Option<Actor>> {
        Ok(ActorRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_actor(&self, id: DbId) -> StoreResult<bool> {
        Ok(ActorRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl RecordStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
