#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use casting_api::auth::jwt::{issue_token, AuthConfig, Claims, TokenVerifier, DEFAULT_AUDIENCE};
use casting_api::config::{ServerConfig, StoreBackend};
use casting_api::router::build_app_router;
use casting_api::state::AppState;
use casting_core::patch::PatchSemantics;
use casting_core::permissions::ALL_PERMISSIONS;
use casting_core::release_date::parse_release_date;
use casting_core::types::DbId;
use casting_db::error::{StoreError, StoreResult};
use casting_db::memory::MemoryStore;
use casting_db::models::actor::{Actor, CreateActor, UpdateActor};
use casting_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use casting_db::store::{ActorStore, MovieStore, RecordStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

/// Build a test `ServerConfig` with safe defaults.
///
/// Any CORS origin, a 30-second request timeout, HS256 tokens signed with
/// [`TEST_SECRET`].
pub fn test_config(patch_semantics: PatchSemantics) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        patch_semantics,
        store_backend: StoreBackend::Memory,
        seed_sample_data: false,
        auth: AuthConfig::with_secret(TEST_SECRET),
    }
}

/// Build the full application router over `store`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_app_with(store: Arc<dyn RecordStore>, patch_semantics: PatchSemantics) -> Router {
    let config = test_config(patch_semantics);
    let verifier = TokenVerifier::from_secret(TEST_SECRET.as_bytes(), &config.auth);

    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        verifier: Arc::new(verifier),
    };

    build_app_router(state, &config)
}

/// App over a fresh in-memory store, returned alongside the store so tests
/// can seed rows or inspect them directly.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    build_test_app_with(PatchSemantics::Presence)
}

pub fn build_test_app_with(patch_semantics: PatchSemantics) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = build_app_with(store.clone(), patch_semantics);
    (app, store)
}

/// A valid bearer token granting exactly `permissions`.
pub fn token(permissions: &[&str]) -> String {
    let claims = Claims::for_permissions(
        permissions,
        DEFAULT_AUDIENCE,
        None,
        chrono::Duration::minutes(10),
    );
    issue_token(TEST_SECRET.as_bytes(), &claims).unwrap()
}

/// A valid bearer token granting every permission.
pub fn admin_token() -> String {
    token(ALL_PERMISSIONS)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn insert_movie(store: &MemoryStore, title: &str, date: &str) -> Movie {
    store
        .create_movie(&CreateMovie {
            title: title.to_string(),
            release_date: parse_release_date(date).unwrap(),
        })
        .await
        .unwrap()
}

pub async fn insert_actor(store: &MemoryStore, name: &str, gender: &str, age: i32) -> Actor {
    store
        .create_actor(&CreateActor {
            name: name.to_string(),
            age,
            gender: gender.to_string(),
        })
        .await
        .unwrap()
}

/// A store whose lookups by id succeed but whose listings and writes fail.
pub struct FailingStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Connectivity("connection refused".into()))
}

#[async_trait]
impl MovieStore for FailingStore {
    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        unavailable()
    }

    async fn find_movie(&self, id: DbId) -> StoreResult<Option<Movie>> {
        Ok(Some(Movie {
            id,
            title: "Ghost".into(),
            release_date: parse_release_date("2000-01-01").unwrap(),
        }))
    }

    async fn find_movie_by_title(&self, _title: &str) -> StoreResult<Option<Movie>> {
        Ok(None)
    }

    async fn create_movie(&self, _input: &CreateMovie) -> StoreResult<Movie> {
        unavailable()
    }

    async fn update_movie(&self, _id: DbId, _input: &UpdateMovie) -> StoreResult<Option<Movie>> {
        Err(StoreError::Constraint("check constraint violated".into()))
    }

    async fn delete_movie(&self, _id: DbId) -> StoreResult<bool> {
        unavailable()
    }
}

#[async_trait]
impl ActorStore for FailingStore {
    async fn list_actors(&self) -> StoreResult<Vec<Actor>> {
        unavailable()
    }

    async fn find_actor(&self, id: DbId) -> StoreResult<Option<Actor>> {
        Ok(Some(Actor {
            id,
            name: "Ghost".into(),
            age: 40,
            gender: "Other".into(),
        }))
    }

    async fn find_actor_by_name(&self, _name: &str) -> StoreResult<Option<Actor>> {
        Ok(None)
    }

    async fn create_actor(&self, _input: &CreateActor) -> StoreResult<Actor> {
        unavailable()
    }

    async fn update_actor(&self, _id: DbId, _input: &UpdateActor) -> StoreResult<Option<Actor>> {
        unavailable()
    }

    async fn delete_actor(&self, _id: DbId) -> StoreResult<bool> {
        unavailable()
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn health_check(&self) -> StoreResult<()> {
        unavailable()
    }
}
