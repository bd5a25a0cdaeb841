//! Admin endpoint integration tests
//!
//! Covers:
//! - GET /api/admin/bosses: table rows and raw records
//! - PUT /api/admin/bosses/{id}: whole-record overwrite
//! - session enforcement on both

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::util::ServiceExt;

mod common;
use common::{
    body_json, build_app, build_app_state, create_admin, create_test_db, get, json_request, login,
    seed_boss, seed_defeated_boss,
};

use marathon_tracker::models::boss::BossStatus;
use marathon_tracker::services::ChangeKind;

fn full_form() -> serde_json::Value {
    serde_json::json!({
        "name": "Starscourge Radahn",
        "status": "Completed",
        "start_time": "10:00:00",
        "end_time": "11:30:59",
        "level_emily": 70,
        "level_agent": 68,
        "death_count_emily": 12,
        "death_count_agent": 9,
        "clip_link": "https://www.twitch.tv/emily/clip/MeteorFall-xyz",
        "order_index": 7
    })
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let db = create_test_db().await;
    let boss = seed_boss(&db, "Margit", 1, None).await;
    let app = build_app(build_app_state(db));

    let response = app.clone().oneshot(get("/api/admin/bosses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bosses/{}", boss.id),
            full_form(),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bogus_cookie_is_rejected() {
    let app = build_app(build_app_state(create_test_db().await));

    let request = Request::builder()
        .uri("/api/admin/bosses")
        .header(header::COOKIE, "tracker_session=not-a-session")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_list_rows() {
    let db = create_test_db().await;
    seed_defeated_boss(&db, "Margit", 1, (3, 2), (40, 42)).await;
    seed_boss(&db, "Godrick", 2, None).await;
    let state = build_app_state(db);
    create_admin(&state).await;
    let app = build_app(state);
    let cookie = login(&app).await;

    let request = Request::builder()
        .uri("/api/admin/bosses")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["time_range"], "0:45:20 - 2:06:36");
    assert_eq!(rows[0]["deaths_emily"], 3);
    assert_eq!(rows[1]["status"], "Not Started");
    assert_eq!(rows[1]["time_range"], "-");
    assert_eq!(body["bosses"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_persists_and_refetch_reflects_it() {
    let db = create_test_db().await;
    let boss = seed_boss(&db, "Radahn", 3, None).await;
    let state = build_app_state(db);
    create_admin(&state).await;
    let app = build_app(state);
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bosses/{}", boss.id),
            full_form(),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Starscourge Radahn");
    assert_eq!(updated["order_index"], 7);

    let bosses = body_json(app.oneshot(get("/api/bosses")).await.unwrap()).await;
    let stored = &bosses[0];
    assert_eq!(stored["status"], "Completed");
    assert_eq!(stored["start_time"], "10:00:00");
    assert_eq!(stored["end_time"], "11:30:59");
    assert_eq!(stored["level_emily"], 70);
    assert_eq!(stored["death_count_agent"], 9);
    assert_eq!(stored["clip_link"], "https://www.twitch.tv/emily/clip/MeteorFall-xyz");
    assert_ne!(stored["updated_at"], serde_json::json!(boss.updated_at));
}

#[tokio::test]
async fn test_update_publishes_change() {
    let db = create_test_db().await;
    let boss = seed_boss(&db, "Radahn", 3, Some(BossStatus::InProgress)).await;
    let state = build_app_state(db);
    create_admin(&state).await;
    let mut rx = state.feed.subscribe();
    let app = build_app(state);
    let cookie = login(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bosses/{}", boss.id),
            full_form(),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.kind, ChangeKind::Update);
    assert_eq!(event.table, "bosses");
    assert_eq!(event.record_id.as_deref(), Some(boss.id.as_str()));
}

#[tokio::test]
async fn test_update_rejects_malformed_time() {
    let db = create_test_db().await;
    let boss = seed_boss(&db, "Radahn", 3, None).await;
    let state = build_app_state(db);
    create_admin(&state).await;
    let app = build_app(state);
    let cookie = login(&app).await;

    let mut form = full_form();
    form["end_time"] = serde_json::json!("half past eleven");
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bosses/{}", boss.id),
            form,
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["detail"]
        .as_str()
        .unwrap()
        .contains("end_time"));
}

#[tokio::test]
async fn test_update_rejects_negative_deaths() {
    let db = create_test_db().await;
    let boss = seed_boss(&db, "Radahn", 3, None).await;
    let state = build_app_state(db);
    create_admin(&state).await;
    let app = build_app(state);
    let cookie = login(&app).await;

    let mut form = full_form();
    form["death_count_emily"] = serde_json::json!(-1);
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/bosses/{}", boss.id),
            form,
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_boss_is_404() {
    let state = build_app_state(create_test_db().await);
    create_admin(&state).await;
    let app = build_app(state);
    let cookie = login(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/admin/bosses/does-not-exist",
            full_form(),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
