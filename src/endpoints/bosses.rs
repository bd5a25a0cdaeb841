use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::endpoints::extractors::PageHost;
use crate::error::{AppError, Result};
use crate::models::boss::{self, Player};
use crate::services::{OverlayView, ProgressSummary, TrackerView};
use crate::state::AppState;

/// Create public boss routes
pub fn bosses_routes(state: AppState) -> Router {
    Router::new()
        .route("/bosses", get(list_bosses))
        .route("/tracker", get(get_tracker))
        .route("/summary", get(get_summary))
        .route("/overlay/{player}", get(get_overlay))
        .with_state(state)
}

/// All bosses in battle order
async fn list_bosses(State(state): State<AppState>) -> Result<Json<Vec<boss::Model>>> {
    Ok(Json(state.bosses.list().await?))
}

/// Everything the public tracker page renders
async fn get_tracker(
    State(state): State<AppState>,
    PageHost(host): PageHost,
) -> Result<Json<TrackerView>> {
    let records = state.bosses.list().await?;
    Ok(Json(TrackerView::build(&records, &host)))
}

async fn get_summary(State(state): State<AppState>) -> Result<Json<ProgressSummary>> {
    let records = state.bosses.list().await?;
    Ok(Json(ProgressSummary::build(&records)))
}

/// Stream overlay for one player
async fn get_overlay(
    State(state): State<AppState>,
    Path(player): Path<String>,
) -> Result<Json<OverlayView>> {
    let player: Player = player.parse().map_err(AppError::NotFound)?;
    let records = state.bosses.list().await?;
    Ok(Json(OverlayView::build(&records, player)))
}
