use axum::{
    extract::Query,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::endpoints::extractors::PageHost;
use crate::services::embed_url_or_empty;
use crate::state::AppState;

pub fn clips_routes(state: AppState) -> Router {
    Router::new()
        .route("/embed", get(get_embed_url))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub embed_url: String,
}

/// Resolve a clip link to its embeddable player URL.
/// Links without a clip id come back as an empty string.
async fn get_embed_url(
    PageHost(host): PageHost,
    Query(query): Query<EmbedQuery>,
) -> Json<EmbedResponse> {
    Json(EmbedResponse {
        embed_url: embed_url_or_empty(&query.url, &host),
    })
}
