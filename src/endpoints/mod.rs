pub mod admin;
pub mod auth;
pub mod bosses;
pub mod clips;
pub mod extractors;
pub mod live;

use axum::{middleware as axum_middleware, routing::get, Router};

use crate::config::CONFIG;
use crate::middleware::{require_admin, security_headers};
use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/version", get(get_version))
        .nest("/api", public_api_routes(state.clone()))
        .nest("/auth", auth::auth_routes(state.clone()));

    // Admin routes (session required)
    let admin_routes = Router::new()
        .nest("/api/admin", admin::admin_routes(state.clone()))
        .layer(axum_middleware::from_fn_with_state(state, require_admin));

    public_routes
        .merge(admin_routes)
        .layer(axum_middleware::from_fn(security_headers))
}

/// Read-only API used by the tracker page and the stream overlays
fn public_api_routes(state: AppState) -> Router {
    Router::new()
        .merge(bosses::bosses_routes(state.clone()))
        .nest("/clips", clips::clips_routes(state.clone()))
        .nest("/live", live::live_routes(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Version info endpoint
async fn get_version() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "version": CONFIG.version,
        "commit_hash": CONFIG.commit_hash,
        "build_time": CONFIG.build_time,
    }))
}
