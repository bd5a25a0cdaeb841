//! Keeps one live view fresh for as long as it is mounted.
//!
//! Mounting does an initial fetch and subscribes to the change feed; every
//! change notification triggers a full re-fetch and a freshly rendered
//! snapshot. Unmounting (or dropping the tracker) releases the
//! subscription. Fetch failures are logged and the last snapshot stands.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::models::boss::{self, Player};
use crate::services::boss_store::RecordSource;
use crate::services::change_feed::{ChangeFeed, FeedSignal, Subscription};
use crate::services::view_model::{OverlayView, TrackerView};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LiveViewKind {
    Tracker,
    Overlay(Player),
}

impl FromStr for LiveViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tracker" => Ok(LiveViewKind::Tracker),
            other => match other.strip_prefix("overlay-") {
                Some(player) => player.parse().map(LiveViewKind::Overlay),
                None => Err(format!("Unknown view: {}", other)),
            },
        }
    }
}

impl LiveViewKind {
    pub fn render(&self, records: &[boss::Model], parent_host: &str) -> LiveSnapshot {
        match self {
            LiveViewKind::Tracker => {
                LiveSnapshot::Tracker(TrackerView::build(records, parent_host))
            }
            LiveViewKind::Overlay(player) => {
                LiveSnapshot::Overlay(OverlayView::build(records, *player))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "view", rename_all = "snake_case")]
pub enum LiveSnapshot {
    Tracker(TrackerView),
    Overlay(OverlayView),
}

/// Everything a refresh needs
#[derive(Clone)]
struct Refresher {
    source: Arc<dyn RecordSource>,
    kind: LiveViewKind,
    parent_host: String,
    sink: mpsc::UnboundedSender<LiveSnapshot>,
}

impl Refresher {
    async fn refresh(&self) {
        match self.source.fetch_all().await {
            Ok(records) => {
                let snapshot = self.kind.render(&records, &self.parent_host);
                if self.sink.send(snapshot).is_err() {
                    debug!("Live view sink closed, dropping snapshot");
                }
            }
            Err(e) => error!("Error fetching bosses: {}", e),
        }
    }
}

pub struct LiveTracker {
    subscription: Subscription,
}

impl LiveTracker {
    /// Render the view once and keep re-rendering it into `sink` on every change.
    ///
    /// The first render and every later one run on the listener task in order,
    /// so the newest snapshot is always the last one sent.
    pub fn mount(
        source: Arc<dyn RecordSource>,
        feed: &ChangeFeed,
        channel: &str,
        kind: LiveViewKind,
        parent_host: impl Into<String>,
        sink: mpsc::UnboundedSender<LiveSnapshot>,
    ) -> Self {
        let refresher = Refresher {
            source,
            kind,
            parent_host: parent_host.into(),
            sink,
        };

        let subscription = feed.watch_records(channel, move |signal| {
            let refresher = refresher.clone();
            async move {
                if let FeedSignal::Lagged(skipped) = signal {
                    debug!("Refreshing after {} missed change events", skipped);
                }
                refresher.refresh().await;
            }
        });

        Self { subscription }
    }

    pub fn channel(&self) -> &str {
        self.subscription.channel()
    }

    pub fn unmount(self) {
        self.subscription.unsubscribe();
    }
}
