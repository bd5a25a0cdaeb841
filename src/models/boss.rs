use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bosses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub status: Option<BossStatus>,
    /// `H:MM:SS` offset into the stream
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub level_emily: Option<i32>,
    pub level_agent: Option<i32>,
    pub death_count_emily: Option<i32>,
    pub death_count_agent: Option<i32>,
    pub clip_link: Option<String>,
    pub order_index: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored status, with a missing value read as `Not Started`
    pub fn status(&self) -> BossStatus {
        self.status.unwrap_or_default()
    }

    pub fn level(&self, player: Player) -> Option<i32> {
        match player {
            Player::Emily => self.level_emily,
            Player::Agent => self.level_agent,
        }
    }

    pub fn deaths(&self, player: Player) -> i32 {
        match player {
            Player::Emily => self.death_count_emily,
            Player::Agent => self.death_count_agent,
        }
        .unwrap_or(0)
    }
}

/// Battle state of a single boss. Any state may move to any other.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BossStatus {
    #[default]
    #[sea_orm(string_value = "Not Started")]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[sea_orm(string_value = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sea_orm(string_value = "Completed")]
    #[serde(rename = "Completed")]
    Completed,
}

impl std::fmt::Display for BossStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BossStatus::NotStarted => write!(f, "Not Started"),
            BossStatus::InProgress => write!(f, "In Progress"),
            BossStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// The two runners whose levels and deaths are tracked per boss
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Emily,
    Agent,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Emily, Player::Agent];

    pub fn display_name(&self) -> &'static str {
        match self {
            Player::Emily => "Emily",
            Player::Agent => "Agent",
        }
    }

    /// Lowercase key used in URLs and channel names
    pub fn as_str(&self) -> &'static str {
        match self {
            Player::Emily => "emily",
            Player::Agent => "agent",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "emily" => Ok(Player::Emily),
            "agent" => Ok(Player::Agent),
            other => Err(format!("Unknown player: {}", other)),
        }
    }
}
