//! Persistence for movies and actors.
//!
//! - [`models`] -- row structs and the create/update DTOs built from request bodies.
//! - [`repositories`] -- sqlx query code against PostgreSQL.
//! - [`store`] -- the [`store::RecordStore`] trait handlers depend on, and its PostgreSQL implementation.
//! - [`memory`] -- an in-process [`store::RecordStore`] for local runs and tests.
//! - [`seed`] -- idempotent sample data.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
