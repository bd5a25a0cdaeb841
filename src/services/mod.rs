pub mod boss_store;
pub mod change_feed;
pub mod clip;
pub mod duration;
pub mod live_tracker;
pub mod security;
pub mod sessions;
pub mod stats;
pub mod view_model;

pub use boss_store::{BossStore, RecordSource};
pub use change_feed::{ChangeEvent, ChangeFeed, ChangeKind, FeedSignal, Subscription};
pub use clip::{embed_url_or_empty, resolve_embed_url, ClipError};
pub use duration::format_duration;
pub use live_tracker::{LiveSnapshot, LiveTracker, LiveViewKind};
pub use security::*;
pub use sessions::{ClientInfo, SessionService};
pub use stats::{compute_stats, DeathScope, ProgressStats};
pub use view_model::*;
