//! Test helpers shared by the unit tests.
//!
//! Provides an in-memory database with the real migrations applied and a
//! couple of ways to make boss records.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::models::boss::{self, BossStatus};

/// Create an in-memory SQLite database with all migrations applied
pub async fn create_test_db() -> DatabaseConnection {
    crate::db::connect_with_url("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

/// Insert a boss with empty stats
pub async fn seed_boss(
    db: &DatabaseConnection,
    name: &str,
    order_index: i32,
    status: Option<BossStatus>,
) -> boss::Model {
    let now = Utc::now();
    boss::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        status: Set(status),
        start_time: Set(None),
        end_time: Set(None),
        level_emily: Set(None),
        level_agent: Set(None),
        death_count_emily: Set(None),
        death_count_agent: Set(None),
        clip_link: Set(None),
        order_index: Set(order_index),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to seed boss")
}

/// A boss record that never touches the database
pub fn boss_record(order_index: i32, status: Option<BossStatus>) -> boss::Model {
    let now = Utc::now();
    boss::Model {
        id: format!("boss-{}", order_index),
        name: format!("Boss {}", order_index),
        status,
        start_time: None,
        end_time: None,
        level_emily: None,
        level_agent: None,
        death_count_emily: None,
        death_count_agent: None,
        clip_link: None,
        order_index,
        created_at: now,
        updated_at: now,
    }
}
