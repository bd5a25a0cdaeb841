use crate::config::CONFIG;
use crate::db::DbConn;
use crate::services::{BossStore, ChangeFeed, SessionService};

/// Application state containing all shared resources.
///
/// Built once at startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub feed: ChangeFeed,
    pub bosses: BossStore,
    pub sessions: SessionService,
}

impl AppState {
    pub fn new(db: DbConn) -> Self {
        Self::with_session_ttl(db, CONFIG.auth.session_ttl_secs)
    }

    pub fn with_session_ttl(db: DbConn, session_ttl_secs: i64) -> Self {
        let feed = ChangeFeed::new();
        Self {
            bosses: BossStore::new(db.clone(), feed.clone()),
            sessions: SessionService::new(db, session_ttl_secs),
            feed,
        }
    }
}
