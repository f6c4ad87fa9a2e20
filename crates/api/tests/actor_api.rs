//! HTTP-level integration tests for the `/actors` resource.

mod common;

use axum::http::StatusCode;
use casting_core::patch::PatchSemantics;
use casting_core::permissions::{DELETE_ACTORS, GET_ACTORS, PATCH_ACTORS, POST_ACTORS};
use casting_db::store::ActorStore;
use common::{
    body_json, build_test_app, build_test_app_with, delete_auth, get_auth, insert_actor,
    patch_json_auth, post_json_auth, token,
};
use serde_json::json;

#[tokio::test]
async fn list_returns_flat_actor_objects() {
    let (app, store) = build_test_app();
    insert_actor(&store, "Kate Winslet", "Female", 25).await;

    let response = get_auth(app, "/actors", &token(&[GET_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(
        json["actors"],
        json!([{"id": 1, "name": "Kate Winslet", "age": 25, "gender": "Female"}])
    );
}

#[tokio::test]
async fn list_empty_table_is_404() {
    let (app, _store) = build_test_app();

    let response = get_auth(app, "/actors", &token(&[GET_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn create_actor_appears_in_list() {
    let (app, _store) = build_test_app();

    let body = json!({"name": "Dummy", "gender": "Male", "age": 30});
    let response = post_json_auth(app.clone(), "/actors", body, &token(&[POST_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["actor"]["name"], "Dummy");
    assert_eq!(json["actor"]["age"], 30);
    let id = json["actor"]["id"].clone();

    let listed = body_json(get_auth(app, "/actors", &token(&[GET_ACTORS])).await).await;
    assert!(listed["actors"].as_array().unwrap().iter().any(|a| a["id"] == id));
}

#[tokio::test]
async fn create_missing_fields_lists_them() {
    let (app, store) = build_test_app();

    let response =
        post_json_auth(app, "/actors", json!({"name": "Dummy"}), &token(&[POST_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let message = body_json(response).await["message"].as_str().unwrap().to_string();
    assert!(message.contains("gender"));
    assert!(message.contains("age"));
    assert!(store.list_actors().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_wrong_age_type_is_400() {
    let (app, store) = build_test_app();

    let body = json!({"name": "Dummy", "gender": "Male", "age": "old"});
    let response = post_json_auth(app, "/actors", body, &token(&[POST_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.list_actors().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_negative_age_is_400() {
    let (app, _store) = build_test_app();

    let body = json!({"name": "Dummy", "gender": "Male", "age": -1});
    let response = post_json_auth(app, "/actors", body, &token(&[POST_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_name_changes_only_name() {
    let (app, store) = build_test_app();
    let actor = insert_actor(&store, "Dummy", "Male", 25).await;

    let uri = format!("/actors/{}", actor.id);
    let response = patch_json_auth(app, &uri, json!({"name": "X"}), &token(&[PATCH_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["actor"],
        json!({"id": actor.id, "name": "X", "age": 25, "gender": "Male"})
    );
}

#[tokio::test]
async fn patch_age_zero_skip_falsy_leaves_age() {
    let (app, store) = build_test_app_with(PatchSemantics::SkipFalsy);
    let actor = insert_actor(&store, "Dummy", "Male", 25).await;

    let uri = format!("/actors/{}", actor.id);
    let response = patch_json_auth(app, &uri, json!({"age": 0}), &token(&[PATCH_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["actor"]["age"], 25);
    assert_eq!(store.find_actor(actor.id).await.unwrap().unwrap().age, 25);
}

#[tokio::test]
async fn patch_age_zero_presence_sets_age() {
    let (app, store) = build_test_app_with(PatchSemantics::Presence);
    let actor = insert_actor(&store, "Dummy", "Male", 25).await;

    let uri = format!("/actors/{}", actor.id);
    let response = patch_json_auth(app, &uri, json!({"age": 0}), &token(&[PATCH_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["actor"]["age"], 0);
    assert_eq!(store.find_actor(actor.id).await.unwrap().unwrap().age, 0);
}

#[tokio::test]
async fn patch_null_presence_is_400() {
    let (app, store) = build_test_app();
    let actor = insert_actor(&store, "Dummy", "Male", 25).await;

    let uri = format!("/actors/{}", actor.id);
    let response =
        patch_json_auth(app, &uri, json!({"gender": null}), &token(&[PATCH_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_validates_before_lookup() {
    let (app, _store) = build_test_app();

    // No row 77 exists, but the body is rejected first.
    let response = patch_json_auth(app, "/actors/77", json!({}), &token(&[PATCH_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_actor_then_patch_is_404() {
    let (app, store) = build_test_app();
    let actor = insert_actor(&store, "Dummy", "Male", 25).await;
    let uri = format!("/actors/{}", actor.id);

    let response = delete_auth(app.clone(), &uri, &token(&[DELETE_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["actorID"], actor.id);

    let response =
        patch_json_auth(app.clone(), &uri, json!({"name": "Y"}), &token(&[PATCH_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &uri, &token(&[DELETE_ACTORS])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
