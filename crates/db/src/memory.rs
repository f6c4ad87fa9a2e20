//! In-process record store.
//!
//! Rows live in ordered maps behind a single `RwLock`; every operation takes
//! the lock once, so each call is atomic in the same way a single-row SQL
//! statement is. Ids are assigned from per-table counters starting at 1 and
//! are never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use casting_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::models::actor::{Actor, CreateActor, UpdateActor};
use crate::models::movie::{CreateMovie, Movie, UpdateMovie};
use crate::store::{ActorStore, MovieStore, RecordStore};

#[derive(Debug, Default)]
struct Tables {
    movies: BTreeMap<DbId, Movie>,
    actors: BTreeMap<DbId, Actor>,
    last_movie_id: DbId,
    last_actor_id: DbId,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let tables = self.tables.read().await;
        Ok(tables.movies.values().cloned().collect())
    }

    async fn find_movie(&self, id: DbId) -> StoreResult<Option<Movie>> {
        Ok(self.tables.read().await.movies.get(&id).cloned())
    }

    async fn find_movie_by_title(&self, title: &str) -> StoreResult<Option<Movie>> {
        let tables = self.tables.read().await;
        Ok(tables.movies.values().find(|m| m.title == title).cloned())
    }

    async fn create_movie(&self, input: &CreateMovie) -> StoreResult<Movie> {
        let mut tables = self.tables.write().await;
        tables.last_movie_id += 1;
        let movie = Movie {
            id: tables.last_movie_id,
            title: input.title.clone(),
            release_date: input.release_date,
        };
        tables.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update_movie(&self, id: DbId, input: &UpdateMovie) -> StoreResult<Option<Movie>> {
        let mut tables = self.tables.write().await;
        Ok(tables.movies.get_mut(&id).map(|movie| {
            input.apply_to(movie);
            movie.clone()
        }))
    }

    async fn delete_movie(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.movies.remove(&id).is_some())
    }
}

#[async_trait]
impl ActorStore for MemoryStore {
    async fn list_actors(&self) -> StoreResult<Vec<Actor>> {
        let tables = self.tables.read().await;
        Ok(tables.actors.values().cloned().collect())
    }

    async fn find_actor(&self, id: DbId) -> StoreResult<Option<Actor>> {
        Ok(self.tables.read().await.actors.get(&id).cloned())
    }

    async fn find_actor_by_name(&self, name: &str) -> StoreResult<Option<Actor>> {
        let tables = self.tables.read().await;
        Ok(tables.actors.values().find(|a| a.name == name).cloned())
    }

    async fn create_actor(&self, input: &CreateActor) -> StoreResult<Actor> {
        let mut tables = self.tables.write().await;
        tables.last_actor_id += 1;
        let actor = Actor {
            id: tables.last_actor_id,
            name: input.name.clone(),
            age: input.age,
            gender: input.gender.clone(),
        };
        tables.actors.insert(actor.id, actor.clone());
        Ok(actor)
    }

    async fn update_actor(&self, id: DbId, input: &UpdateActor) -> StoreResult<Option<Actor>> {
        let mut tables = self.tables.write().await;
        Ok(tables.actors.get_mut(&id).map(|actor| {
            input.apply_to(actor);
            actor.clone()
        }))
    }

    async fn delete_actor(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.actors.remove(&id).is_some())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
