//! Derived progress statistics over the full boss list.
//!
//! Everything here is a pure function of the records passed in, so views
//! recompute from scratch after every change notification.

use serde::{Deserialize, Serialize};

use crate::models::boss::{self, BossStatus, Player};

/// Which players' deaths a view adds up
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathScope {
    Only(Player),
    Combined,
}

impl DeathScope {
    fn deaths(&self, record: &boss::Model) -> i64 {
        match self {
            DeathScope::Only(player) => record.deaths(*player) as i64,
            DeathScope::Combined => Player::ALL
                .iter()
                .map(|player| record.deaths(*player) as i64)
                .sum(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub total_deaths: i64,
    pub average_level_emily: i64,
    pub average_level_agent: i64,
    pub completion_percentage: u8,
}

impl ProgressStats {
    pub fn average_level(&self, player: Player) -> i64 {
        match player {
            Player::Emily => self.average_level_emily,
            Player::Agent => self.average_level_agent,
        }
    }
}

/// Compute the aggregate stats for `records`, summing deaths over `scope`
pub fn compute_stats(records: &[boss::Model], scope: DeathScope) -> ProgressStats {
    let mut stats = ProgressStats {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.status() {
            BossStatus::Completed => stats.completed += 1,
            BossStatus::InProgress => stats.in_progress += 1,
            BossStatus::NotStarted => stats.not_started += 1,
        }
        stats.total_deaths += scope.deaths(record);
    }

    stats.average_level_emily = average_level(records, Player::Emily);
    stats.average_level_agent = average_level(records, Player::Agent);
    stats.completion_percentage = percentage(stats.completed, stats.total);

    stats
}

/// Sum of one player's deaths across every record
pub fn total_deaths(records: &[boss::Model], player: Player) -> i64 {
    records.iter().map(|r| r.deaths(player) as i64).sum()
}

/// Rounded mean of the player's levels, skipping unset (absent or zero) entries.
/// Zero when no record has a level.
pub fn average_level(records: &[boss::Model], player: Player) -> i64 {
    let (sum, count) = records
        .iter()
        .filter_map(|r| r.level(player))
        .filter(|level| *level > 0)
        .fold((0i64, 0i64), |(sum, count), level| (sum + level as i64, count + 1));

    rounded_div(sum, count)
}

/// `round(100 * part / whole)`, zero for an empty whole
pub fn percentage(part: usize, whole: usize) -> u8 {
    let pct = rounded_div(100 * part as i64, whole as i64);
    pct.clamp(0, 100) as u8
}

/// Integer division rounding halves up; zero divisor yields zero.
/// Inputs are never negative here.
pub(crate) fn rounded_div(numerator: i64, denominator: i64) -> i64 {
    if denominator <= 0 {
        return 0;
    }
    (2 * numerator + denominator) / (2 * denominator)
}
