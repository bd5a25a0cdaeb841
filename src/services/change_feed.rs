//! Realtime change feed for the `bosses` table.
//!
//! Every write through the boss store publishes a [`ChangeEvent`] on a
//! tokio broadcast channel. Consumers register with
//! [`ChangeFeed::on_records_changed`] and get a [`Subscription`] back; the
//! listener task lives exactly as long as that handle.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Buffered events per subscriber before it starts lagging
const FEED_CAPACITY: usize = 64;

pub const BOSSES_TABLE: &str = "bosses";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Notification that something in a table changed. Carries no row data;
/// listeners re-fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub table: String,
    pub record_id: Option<String>,
}

impl ChangeEvent {
    pub fn boss(kind: ChangeKind, record_id: impl Into<String>) -> Self {
        Self {
            kind,
            table: BOSSES_TABLE.to_string(),
            record_id: Some(record_id.into()),
        }
    }
}

/// What a listener was woken for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedSignal {
    /// The listener just started; nothing has been read yet
    Subscribed,
    Changed(ChangeEvent),
    /// The listener fell behind and events were dropped; state must be re-read
    Lagged(u64),
}

#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
    active: Arc<AtomicUsize>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            tx,
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Publish an event to every current listener. Returns how many received it.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => {
                debug!("Change event delivered to {} listeners", receivers);
                receivers
            }
            // No listeners is not an error; nobody is watching
            Err(_) => 0,
        }
    }

    /// Raw receiver for callers that drive their own loop
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Number of live [`Subscription`]s
    pub fn active_subscriptions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Run `callback` for every change until the returned handle is dropped
    /// or [`Subscription::unsubscribe`]d. Events for other tables are skipped.
    pub fn on_records_changed<F, Fut>(&self, channel: &str, callback: F) -> Subscription
    where
        F: FnMut(FeedSignal) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.listen(channel, false, callback)
    }

    /// Like [`ChangeFeed::on_records_changed`], but the listener first runs
    /// `callback(FeedSignal::Subscribed)` before taking any change. Every
    /// callback runs on the same task, one after another, so work started
    /// for a later event never finishes before work for an earlier one.
    pub fn watch_records<F, Fut>(&self, channel: &str, callback: F) -> Subscription
    where
        F: FnMut(FeedSignal) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.listen(channel, true, callback)
    }

    fn listen<F, Fut>(&self, channel: &str, prime: bool, mut callback: F) -> Subscription
    where
        F: FnMut(FeedSignal) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        // Subscribed before the task starts, so events published while the
        // primer runs are queued rather than missed
        let mut rx = self.tx.subscribe();
        let channel_name = channel.to_string();
        let task_channel = channel_name.clone();

        self.active.fetch_add(1, Ordering::SeqCst);
        debug!("Channel {} subscribed to {}", channel_name, BOSSES_TABLE);

        let task = tokio::spawn(async move {
            if prime {
                callback(FeedSignal::Subscribed).await;
            }
            loop {
                match rx.recv().await {
                    Ok(event) if event.table == BOSSES_TABLE => {
                        callback(FeedSignal::Changed(event)).await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(
                            "Channel {} lagged, skipped {} events",
                            task_channel, skipped
                        );
                        callback(FeedSignal::Lagged(skipped)).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Subscription {
            channel: channel_name,
            task: Some(task),
            active: self.active.clone(),
        }
    }
}

/// Handle to a running listener; dropping it stops the listener
pub struct Subscription {
    channel: String,
    task: Option<JoinHandle<()>>,
    active: Arc<AtomicUsize>,
}

impl Subscription {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.active.fetch_sub(1, Ordering::SeqCst);
            debug!("Channel {} unsubscribed", self.channel);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
