//! View models built from the ordered boss list.
//!
//! These carry no styling, only what each screen shows: boss cards, the
//! hero header, the progress summary, the per-player stream overlay and the
//! admin table.

use serde::Serialize;

use crate::models::boss::{self, BossStatus, Player};
use crate::services::clip::embed_url_or_empty;
use crate::services::duration::format_duration;
use crate::services::stats::{compute_stats, rounded_div, total_deaths, DeathScope, ProgressStats};

/// Card treatment chosen from the boss status
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardVariant {
    /// Trophy card with duration, stats and clip actions
    Victory,
    /// Active battle card with live stats
    Battling,
    /// Placeholder, awaiting challenge
    Awaiting,
}

impl CardVariant {
    pub fn for_status(status: BossStatus) -> Self {
        match status {
            BossStatus::Completed => CardVariant::Victory,
            BossStatus::InProgress => CardVariant::Battling,
            BossStatus::NotStarted => CardVariant::Awaiting,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerLine {
    pub player: Player,
    pub name: &'static str,
    pub level: i32,
    pub deaths: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClipActions {
    /// Original link, opened in a new tab
    pub watch_url: String,
    /// Player URL; empty when the link has no usable clip id
    pub embed_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BossCard {
    pub id: String,
    pub name: String,
    pub order_index: i32,
    pub status: BossStatus,
    pub variant: CardVariant,
    pub duration: Option<String>,
    /// Empty for bosses that have not been fought yet
    pub players: Vec<PlayerLine>,
    pub clip: Option<ClipActions>,
}

impl BossCard {
    pub fn from_record(record: &boss::Model, parent_host: &str) -> Self {
        let status = record.status();
        let variant = CardVariant::for_status(status);

        let players = match variant {
            CardVariant::Awaiting => Vec::new(),
            CardVariant::Victory | CardVariant::Battling => Player::ALL
                .iter()
                .map(|player| PlayerLine {
                    player: *player,
                    name: player.display_name(),
                    level: record.level(*player).unwrap_or(0),
                    deaths: record.deaths(*player),
                })
                .collect(),
        };

        let (duration, clip) = if variant == CardVariant::Victory {
            let duration =
                format_duration(record.start_time.as_deref(), record.end_time.as_deref());
            let clip = record
                .clip_link
                .as_deref()
                .filter(|link| !link.is_empty())
                .map(|link| ClipActions {
                    watch_url: link.to_string(),
                    embed_url: embed_url_or_empty(link, parent_host),
                });
            (duration, clip)
        } else {
            (None, None)
        };

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            order_index: record.order_index,
            status,
            variant,
            duration,
            players,
            clip,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurrentBoss {
    pub id: String,
    pub name: String,
    pub order_index: i32,
}

/// The boss being fought right now: the lowest `order_index` record marked
/// In Progress. More than one such record is tolerated, not corrected.
pub fn current_boss(records: &[boss::Model]) -> Option<&boss::Model> {
    records
        .iter()
        .filter(|r| r.status() == BossStatus::InProgress)
        .min_by_key(|r| r.order_index)
}

fn current_boss_view(records: &[boss::Model]) -> Option<CurrentBoss> {
    current_boss(records).map(|r| CurrentBoss {
        id: r.id.clone(),
        name: r.name.clone(),
        order_index: r.order_index,
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BattleStatus {
    pub conquered: usize,
    pub in_battle: usize,
    pub awaiting: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerDeaths {
    pub player: Player,
    pub deaths: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerLevel {
    pub player: Player,
    pub level: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub completion_percentage: u8,
    pub battle_status: BattleStatus,
    pub combined_deaths: i64,
    pub deaths: Vec<PlayerDeaths>,
    pub levels: Vec<PlayerLevel>,
    /// Rounded mean of the two player averages
    pub overall_level: i64,
}

impl ProgressSummary {
    pub fn build(records: &[boss::Model]) -> Self {
        let stats = compute_stats(records, DeathScope::Combined);

        let deaths = Player::ALL
            .iter()
            .map(|player| PlayerDeaths {
                player: *player,
                deaths: total_deaths(records, *player),
            })
            .collect();
        let levels: Vec<PlayerLevel> = Player::ALL
            .iter()
            .map(|player| PlayerLevel {
                player: *player,
                level: stats.average_level(*player),
            })
            .collect();
        let overall_level = rounded_div(
            levels.iter().map(|l| l.level).sum(),
            levels.len() as i64,
        );

        Self {
            completed: stats.completed,
            total: stats.total,
            completion_percentage: stats.completion_percentage,
            battle_status: BattleStatus {
                conquered: stats.completed,
                in_battle: stats.in_progress,
                awaiting: stats.total - stats.completed - stats.in_progress,
            },
            combined_deaths: stats.total_deaths,
            deaths,
            levels,
            overall_level,
        }
    }
}

/// Landing page: header stats, summary and one card per boss
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrackerView {
    pub stats: ProgressStats,
    pub summary: ProgressSummary,
    pub current_boss: Option<CurrentBoss>,
    pub bosses: Vec<BossCard>,
}

impl TrackerView {
    pub fn build(records: &[boss::Model], parent_host: &str) -> Self {
        Self {
            stats: compute_stats(records, DeathScope::Combined),
            summary: ProgressSummary::build(records),
            current_boss: current_boss_view(records),
            bosses: records
                .iter()
                .map(|r| BossCard::from_record(r, parent_host))
                .collect(),
        }
    }
}

/// Stream overlay for one runner; deaths count only that runner
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub player: Player,
    pub level: i64,
    pub stats: ProgressStats,
    pub current_boss: Option<CurrentBoss>,
}

impl OverlayView {
    pub fn build(records: &[boss::Model], player: Player) -> Self {
        let stats = compute_stats(records, DeathScope::Only(player));
        Self {
            player,
            level: stats.average_level(player),
            stats,
            current_boss: current_boss_view(records),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdminRow {
    pub id: String,
    pub name: String,
    pub order_index: i32,
    pub status: BossStatus,
    /// `start - end`, or `-` until both are known
    pub time_range: String,
    pub deaths_emily: i32,
    pub deaths_agent: i32,
}

impl From<&boss::Model> for AdminRow {
    fn from(record: &boss::Model) -> Self {
        let time_range = match (record.start_time.as_deref(), record.end_time.as_deref()) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
                format!("{} - {}", start, end)
            }
            _ => "-".to_string(),
        };

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            order_index: record.order_index,
            status: record.status(),
            time_range,
            deaths_emily: record.deaths(Player::Emily),
            deaths_agent: record.deaths(Player::Agent),
        }
    }
}
