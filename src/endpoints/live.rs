//! Live views over WebSocket
//!
//! Each connection mounts one [`LiveTracker`]. The client gets a snapshot
//! right away and a fresh one after every change to the boss list; the
//! subscription is released when the socket closes.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::endpoints::extractors::PageHost;
use crate::error::{AppError, Result};
use crate::services::{LiveSnapshot, LiveTracker, LiveViewKind, RecordSource};
use crate::state::AppState;

pub const TRACKER_CHANNEL: &str = "bosses_channel";

pub fn live_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    pub channel: Option<String>,
    pub view: Option<String>,
}

/// Channel used when the client does not name one
fn default_channel(kind: LiveViewKind) -> String {
    match kind {
        LiveViewKind::Tracker => TRACKER_CHANNEL.to_string(),
        LiveViewKind::Overlay(player) => format!("{}-bosses-channel", player),
    }
}

/// WebSocket upgrade handler for live tracker and overlay views
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    PageHost(host): PageHost,
    Query(query): Query<LiveQuery>,
) -> Result<Response> {
    let kind: LiveViewKind = query
        .view
        .as_deref()
        .unwrap_or("tracker")
        .parse()
        .map_err(AppError::BadRequest)?;
    let channel = query
        .channel
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| default_channel(kind));

    tracing::info!("Live view {:?} requested on {}", kind, channel);
    Ok(ws
        .on_upgrade(move |socket| handle_socket(socket, state, channel, kind, host))
        .into_response())
}

/// Handle WebSocket connection
async fn handle_socket(
    socket: WebSocket,
    state: AppState,
    channel: String,
    kind: LiveViewKind,
    host: String,
) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<LiveSnapshot>();

    let source: Arc<dyn RecordSource> = Arc::new(state.bosses.clone());
    let tracker = LiveTracker::mount(source, &state.feed, &channel, kind, host, tx);

    // Forward rendered snapshots to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(snapshot) = rx.recv().await {
            let text = match serde_json::to_string(&snapshot) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to serialize live snapshot: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages (ping/pong, close)
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    debug!("WebSocket client requested close");
                    break;
                }
                Err(e) => {
                    debug!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracker.unmount();
    tracing::info!("Live view client disconnected from {}", channel);
}
