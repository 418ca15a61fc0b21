//! HTTP-level integration tests for the employee and role endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, post, post_json, post_raw, put};
use sqlx::PgPool;

const COLLECTIONS: [&str; 2] = ["employees", "roles"];

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_201_with_id(pool: PgPool) {
    for collection in COLLECTIONS {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/{collection}"),
            serde_json::json!({"name": "John Doe"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "");
        assert!(json["data"].as_i64().unwrap() > 0);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_name_returns_400(pool: PgPool) {
    create(&pool, "employees", "Alice").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/employees",
        serde_json::json!({"name": "Alice"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "employee with name Alice already exists");
    assert!(json["data"].is_null());

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/employees").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_name_in_other_collection_is_allowed(pool: PgPool) {
    create(&pool, "employees", "Operator").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/roles",
        serde_json::json!({"name": "Operator"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_short_name_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/roles", serde_json::json!({"name": "X"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("name"));

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/roles").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_malformed_json_returns_400_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_raw(app, "/api/v1/employees", "{\"name\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(!json["message"].as_str().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_id(pool: PgPool) {
    let id = create(&pool, "employees", "Get Me").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/employees/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["name"], "Get Me");
    assert!(json["data"]["created_at"].is_string());
    assert!(json["data"]["updated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/roles/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "role with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_with_invalid_id_returns_400(pool: PgPool) {
    for path in ["/api/v1/employees/abc", "/api/v1/employees/0"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body_json(response).await["success"], false);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_utf8_path_segment_returns_400_envelope(pool: PgPool) {
    for path in [
        "/api/v1/employees/%FF",
        "/api/v1/roles/list/%FF",
    ] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, path).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false, "{path}");
        assert!(!json["message"].as_str().unwrap().is_empty(), "{path}");
        assert!(json["data"].is_null(), "{path}");
    }

    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/employees/%FF").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_then_filled(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/employees").await).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([]));

    let first = create(&pool, "employees", "John Deer").await;
    let second = create(&pool, "employees", "John Smith").await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/employees").await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [first, second]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_ids(pool: PgPool) {
    let admin = create(&pool, "roles", "Admin").await;
    let _viewer = create(&pool, "roles", "Viewer").await;
    let editor = create(&pool, "roles", "Editor").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/roles/list/{admin},{editor},999999")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let mut names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["Admin", "Editor"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_ids_with_bad_part_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/roles/list/1,two,3").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "invalid id: two");
}

// ---------------------------------------------------------------------------
// Deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_by_id_reports_count(pool: PgPool) {
    let id = create(&pool, "employees", "Temp").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/employees/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], 1);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/employees/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_by_ids(pool: PgPool) {
    let one = create(&pool, "roles", "One").await;
    let two = create(&pool, "roles", "Two").await;
    let three = create(&pool, "roles", "Three").await;

    let app = common::build_test_app(pool.clone());
    let response = post(app, &format!("/api/v1/roles/delete?ids={one},{two}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], 2);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/roles").await).await;
    let remaining = json["data"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], three);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_by_ids_requires_ids(pool: PgPool) {
    for uri in [
        "/api/v1/employees/delete",
        "/api/v1/employees/delete?ids=",
        "/api/v1/employees/delete?ids=1,x",
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["success"], false);
    }
}

// ---------------------------------------------------------------------------
// Unsupported methods
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unsupported_method_returns_405_envelope(pool: PgPool) {
    for collection in COLLECTIONS {
        let app = common::build_test_app(pool.clone());
        let response = put(app, &format!("/api/v1/{collection}/1")).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "method not allowed");
        assert!(json["data"].is_null());
    }

    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/roles").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["success"], false);
}
