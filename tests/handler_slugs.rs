mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use slug_shortener::api::dto::slug::SlugResponse;
use slug_shortener::application::services::CreationLimit;

fn create_body(slug: &str, redirect: &str, uid: &str) -> Value {
    json!({ "slug": slug, "redirect": redirect, "uid": uid })
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_slug_echoes_input() {
    let (server, _store) = common::make_server();

    let response = server
        .post("/slugs")
        .json(&create_body("abc", "https://x.com", "u1"))
        .await;

    response.assert_status_ok();
    let slug = response.json::<SlugResponse>();
    assert_eq!(slug.slug, "abc");
    assert_eq!(slug.redirect, "https://x.com");
    assert_eq!(slug.uid, "u1");
    assert_eq!(slug.id.len(), 24);
    assert!(slug.id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_create_slug_generates_distinct_ids() {
    let (server, _store) = common::make_server();

    let first = server
        .post("/slugs")
        .json(&create_body("abc", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();
    let second = server
        .post("/slugs")
        .json(&create_body("abc", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_create_slug_accepts_camel_case_user() {
    let (server, _store) = common::make_server();

    let response = server
        .post("/slugs")
        .json(&json!({ "slug": "abc", "redirect": "https://x.com", "userId": "u2" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<SlugResponse>().uid, "u2");
}

#[tokio::test]
async fn test_create_slug_unknown_user() {
    let (server, _store) = common::make_server();

    let response = server
        .post("/slugs")
        .json(&create_body("abc", "https://x.com", "ghost"))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "user_not_found");
}

#[tokio::test]
async fn test_create_slug_missing_field() {
    let (server, _store) = common::make_server();

    let response = server
        .post("/slugs")
        .json(&json!({ "slug": "abc", "uid": "u1" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_slug_empty_token() {
    let (server, _store) = common::make_server();

    let response = server
        .post("/slugs")
        .json(&create_body("", "https://x.com", "u1"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_slug_malformed_json() {
    let (server, _store) = common::make_server();

    let response = server
        .post("/slugs")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_limit_boundary() {
    let (server, _store) = common::make_server();

    for i in 0..30 {
        server
            .post("/slugs")
            .json(&create_body(&format!("s{i}"), "https://x.com", "u1"))
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/slugs")
        .json(&create_body("s30", "https://x.com", "u1"))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "rate_limit_exceeded");
    assert_eq!(json["error"]["details"]["limit"], 30);

    // Other users have their own quota.
    server
        .post("/slugs")
        .json(&create_body("s30", "https://x.com", "u2"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_create_limit_is_configurable() {
    let (server, _store) = common::make_server_with_limit(CreationLimit::new(2, 1));

    for token in ["a", "b"] {
        server
            .post("/slugs")
            .json(&create_body(token, "https://x.com", "u1"))
            .await
            .assert_status_ok();
    }

    server
        .post("/slugs")
        .json(&create_body("c", "https://x.com", "u1"))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_deleted_slugs_free_quota() {
    let (server, _store) = common::make_server_with_limit(CreationLimit::new(1, 30));

    let created = server
        .post("/slugs")
        .json(&create_body("a", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();

    server
        .delete("/slugs")
        .add_query_param("userid", "u1")
        .add_query_param("id", &created.id)
        .await
        .assert_status_ok();

    server
        .post("/slugs")
        .json(&create_body("b", "https://x.com", "u1"))
        .await
        .assert_status_ok();
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_slugs_empty() {
    let (server, _store) = common::make_server();

    let response = server.get("/slugs").add_query_param("userid", "u1").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<SlugResponse>>(), vec![]);
}

#[tokio::test]
async fn test_list_slugs_only_owned_in_order() {
    let (server, _store) = common::make_server();

    for (token, uid) in [("a", "u1"), ("b", "u2"), ("c", "u1")] {
        server
            .post("/slugs")
            .json(&create_body(token, "https://x.com", uid))
            .await
            .assert_status_ok();
    }

    let slugs = server
        .get("/slugs")
        .add_query_param("userid", "u1")
        .await
        .json::<Vec<SlugResponse>>();

    let tokens: Vec<_> = slugs.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(tokens, ["a", "c"]);
    assert!(slugs.iter().all(|s| s.uid == "u1"));
}

#[tokio::test]
async fn test_list_slugs_unknown_user() {
    let (server, _store) = common::make_server();

    let response = server.get("/slugs").add_query_param("userid", "ghost").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "user_not_found");
}

#[tokio::test]
async fn test_list_slugs_missing_user_param() {
    let (server, _store) = common::make_server();

    let response = server.get("/slugs").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_slug_success() {
    let (server, _store) = common::make_server();

    let created = server
        .post("/slugs")
        .json(&create_body("abc", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();

    let response = server
        .put("/slugs")
        .json(&json!({
            "id": created.id,
            "slug": "xyz",
            "redirect": "https://y.com",
            "uid": "u1",
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({}));

    let slugs = server
        .get("/slugs")
        .add_query_param("userid", "u1")
        .await
        .json::<Vec<SlugResponse>>();
    assert_eq!(slugs.len(), 1);
    assert_eq!(slugs[0].id, created.id);
    assert_eq!(slugs[0].slug, "xyz");
    assert_eq!(slugs[0].redirect, "https://y.com");
}

#[tokio::test]
async fn test_update_slug_other_owner_is_noop() {
    let (server, _store) = common::make_server();

    let created = server
        .post("/slugs")
        .json(&create_body("abc", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();

    // u2 exists but does not own the slug: success without effect.
    server
        .put("/slugs")
        .json(&json!({
            "id": created.id,
            "slug": "stolen",
            "redirect": "https://evil.com",
            "uid": "u2",
        }))
        .await
        .assert_status_ok();

    let slugs = server
        .get("/slugs")
        .add_query_param("userid", "u1")
        .await
        .json::<Vec<SlugResponse>>();
    assert_eq!(slugs[0].slug, "abc");
    assert_eq!(slugs[0].redirect, "https://x.com");
}

#[tokio::test]
async fn test_update_slug_invalid_id() {
    let (server, _store) = common::make_server();

    let response = server
        .put("/slugs")
        .json(&json!({
            "id": "not-an-id",
            "slug": "abc",
            "redirect": "https://x.com",
            "uid": "u1",
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_update_slug_unknown_user() {
    let (server, _store) = common::make_server();

    let response = server
        .put("/slugs")
        .json(&json!({
            "id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "slug": "abc",
            "redirect": "https://x.com",
            "uid": "ghost",
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "user_not_found");
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_slug_removes_only_target() {
    let (server, _store) = common::make_server();

    let first = server
        .post("/slugs")
        .json(&create_body("a", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();
    let second = server
        .post("/slugs")
        .json(&create_body("b", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();

    let response = server
        .delete("/slugs")
        .add_query_param("userid", "u1")
        .add_query_param("id", &first.id)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({}));

    let slugs = server
        .get("/slugs")
        .add_query_param("userid", "u1")
        .await
        .json::<Vec<SlugResponse>>();
    assert_eq!(slugs, vec![second]);
}

#[tokio::test]
async fn test_delete_slug_is_idempotent() {
    let (server, _store) = common::make_server();

    let created = server
        .post("/slugs")
        .json(&create_body("a", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();

    for _ in 0..2 {
        server
            .delete("/slugs")
            .add_query_param("userid", "u1")
            .add_query_param("id", &created.id)
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn test_delete_slug_other_owner_is_noop() {
    let (server, _store) = common::make_server();

    let created = server
        .post("/slugs")
        .json(&create_body("a", "https://x.com", "u1"))
        .await
        .json::<SlugResponse>();

    server
        .delete("/slugs")
        .add_query_param("userid", "u2")
        .add_query_param("id", &created.id)
        .await
        .assert_status_ok();

    let slugs = server
        .get("/slugs")
        .add_query_param("userid", "u1")
        .await
        .json::<Vec<SlugResponse>>();
    assert_eq!(slugs.len(), 1);
}

#[tokio::test]
async fn test_delete_slug_invalid_id() {
    let (server, _store) = common::make_server();

    let response = server
        .delete("/slugs")
        .add_query_param("userid", "u1")
        .add_query_param("id", "xyz")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}
