//! Test helpers shared by the integration tests.
//!
//! Provides an in-memory database, app state and router builders, seed
//! data and a login helper that returns the session cookie.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::util::ServiceExt;

use marathon_tracker::bootstrapper::create_app;
use marathon_tracker::db::connect_with_url;
use marathon_tracker::models::boss::{self, BossStatus};
use marathon_tracker::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@marathon.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Create an in-memory SQLite database with all migrations applied
pub async fn create_test_db() -> DatabaseConnection {
    connect_with_url("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

/// App state with a one hour session lifetime
pub fn build_app_state(db: DatabaseConnection) -> AppState {
    AppState::with_session_ttl(db, 3600)
}

/// Full application router, same layers as production
pub fn build_app(state: AppState) -> Router {
    create_app(state)
}

/// Insert a boss with the given status and empty stats
pub async fn seed_boss(
    db: &DatabaseConnection,
    name: &str,
    order_index: i32,
    status: Option<BossStatus>,
) -> boss::Model {
    let now = Utc::now();
    boss::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        status: Set(status),
        start_time: Set(None),
        end_time: Set(None),
        level_emily: Set(None),
        level_agent: Set(None),
        death_count_emily: Set(None),
        death_count_agent: Set(None),
        clip_link: Set(None),
        order_index: Set(order_index),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to seed boss")
}

/// Insert a finished boss with levels, deaths, times and a clip
pub async fn seed_defeated_boss(
    db: &DatabaseConnection,
    name: &str,
    order_index: i32,
    deaths: (i32, i32),
    levels: (i32, i32),
) -> boss::Model {
    let now = Utc::now();
    boss::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        status: Set(Some(BossStatus::Completed)),
        start_time: Set(Some("0:45:20".to_string())),
        end_time: Set(Some("2:06:36".to_string())),
        level_emily: Set(Some(levels.0)),
        level_agent: Set(Some(levels.1)),
        death_count_emily: Set(Some(deaths.0)),
        death_count_agent: Set(Some(deaths.1)),
        clip_link: Set(Some("https://clips.twitch.tv/AbCd123".to_string())),
        order_index: Set(order_index),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to seed boss")
}

/// Create the default admin account
pub async fn create_admin(state: &AppState) {
    state
        .sessions
        .ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("Failed to create admin");
}

/// Build a GET request
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

/// Build a JSON request with an optional session cookie
pub fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Sign in as the default admin and return the `name=value` cookie pair
pub async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "admin login must succeed");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a cookie")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}
