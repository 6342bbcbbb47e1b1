mod common;

use annotater_core::test_support::png_bytes;
use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use sqlx::PgPool;

use common::{body_json, build_test_app, delete, get, post_json, send};

fn markup_type(id: u64, creator_id: i64) -> Value {
    json!({
        "id": id,
        "description": "Stamp overlaps text",
        "creator_id": creator_id,
        "class_name": "stamp"
    })
}

fn annotation(class_label: u64, error_bb: Value) -> Value {
    json!({
        "creator_id": 20,
        "class_label": class_label,
        "error_bb": error_bb,
        "page_data": STANDARD.encode(png_bytes(100, 100)),
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_annotation_lifecycle(pool: PgPool) {
    let app = build_test_app(pool, vec![]);
    send(&app, post_json("/api/v1/annotation-types", markup_type(1, 20))).await;

    let created = send(
        &app,
        post_json("/api/v1/annotations", annotation(1, json!([1.0, 1.0, 0.0, 1.0]))),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["data"]["id"].as_u64().unwrap();

    let fetched = body_json(send(&app, get(&format!("/api/v1/annotations/{id}"))).await).await;
    assert_eq!(fetched["data"]["class_label"], 1);
    assert_eq!(fetched["data"]["error_bb"], json!([1.0, 1.0, 0.0, 1.0]));
    let page = STANDARD
        .decode(fetched["data"]["page_data"].as_str().unwrap())
        .unwrap();
    assert_eq!(page, png_bytes(100, 100));

    let mine = body_json(send(&app, get("/api/v1/annotations?creator_id=20")).await).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);

    let deleted = send(&app, delete(&format!("/api/v1/annotations/{id}"))).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let missing = send(&app, get(&format!("/api/v1/annotations/{id}"))).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_box_is_rejected_without_storing(pool: PgPool) {
    let app = build_test_app(pool, vec![]);
    send(&app, post_json("/api/v1/annotation-types", markup_type(1, 20))).await;

    let response = send(
        &app,
        post_json("/api/v1/annotations", annotation(1, json!([-1.0, 1.0, 0.0, 1.0]))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let short = send(
        &app,
        post_json("/api/v1/annotations", annotation(1, json!([0.5, 0.5]))),
    )
    .await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);

    let all = body_json(send(&app, get("/api/v1/annotations")).await).await;
    assert!(all["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_annotation_with_unknown_type_conflicts(pool: PgPool) {
    let app = build_test_app(pool, vec![]);

    let response = send(
        &app,
        post_json("/api/v1/annotations", annotation(9, json!([0.1, 0.2, 0.3, 0.4]))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_and_referenced_types_conflict(pool: PgPool) {
    let app = build_test_app(pool, vec![]);
    let first = send(&app, post_json("/api/v1/annotation-types", markup_type(1, 20))).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let duplicate = send(&app, post_json("/api/v1/annotation-types", markup_type(1, 20))).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    send(
        &app,
        post_json("/api/v1/annotations", annotation(1, json!([0.1, 0.2, 0.3, 0.4]))),
    )
    .await;
    let referenced = send(&app, delete("/api/v1/annotation-types/1")).await;
    assert_eq!(referenced.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_type_listing_filters(pool: PgPool) {
    let app = build_test_app(pool, vec![]);
    for (id, creator) in [(2, 20), (1, 20), (3, 7)] {
        send(&app, post_json("/api/v1/annotation-types", markup_type(id, creator))).await;
    }

    let by_ids = body_json(send(&app, get("/api/v1/annotation-types?ids=2,1")).await).await;
    let ids: Vec<u64> = by_ids["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    let by_creator = body_json(send(&app, get("/api/v1/annotation-types?creator_id=7")).await).await;
    assert_eq!(by_creator["data"][0]["id"], 3);

    let all = body_json(send(&app, get("/api/v1/annotation-types")).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);

    let bad = send(&app, get("/api/v1/annotation-types?ids=1,x")).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_type_then_get_is_not_found(pool: PgPool) {
    let app = build_test_app(pool, vec![]);
    send(&app, post_json("/api/v1/annotation-types", markup_type(4, 20))).await;

    let deleted = send(&app, delete("/api/v1/annotation-types/4")).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = send(&app, get("/api/v1/annotation-types/4")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(missing).await["error"], "MarkupType with id 4 not found");
}
