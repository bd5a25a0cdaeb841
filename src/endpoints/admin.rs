use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::endpoints::extractors::CurrentAdmin;
use crate::error::Result;
use crate::models::boss;
use crate::schemas::BossForm;
use crate::services::AdminRow;
use crate::state::AppState;

/// Create admin routes. Mounted behind the session middleware.
pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/bosses", get(list_admin_bosses))
        .route("/bosses/{id}", put(update_boss))
        .with_state(state)
}

/// Table rows plus the raw records the edit dialog is filled from
#[derive(Debug, Serialize)]
pub struct AdminBossList {
    pub rows: Vec<AdminRow>,
    pub bosses: Vec<boss::Model>,
}

async fn list_admin_bosses(State(state): State<AppState>) -> Result<Json<AdminBossList>> {
    let bosses = state.bosses.list().await?;
    let rows = bosses.iter().map(AdminRow::from).collect();
    Ok(Json(AdminBossList { rows, bosses }))
}

/// Overwrite one boss with the submitted form
async fn update_boss(
    State(state): State<AppState>,
    CurrentAdmin(current): CurrentAdmin,
    Path(id): Path<String>,
    Json(form): Json<BossForm>,
) -> Result<Json<boss::Model>> {
    tracing::info!("Admin {} saving boss {}", current.admin.email, id);
    let updated = state.bosses.update(&id, form).await?;
    Ok(Json(updated))
}
