//! Data access for boss records.
//!
//! Reads always come back ordered by `order_index`. Writes overwrite the
//! whole editable field set of one record and announce the change on the
//! [`ChangeFeed`].

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::schemas::BossForm;
use crate::services::change_feed::{ChangeEvent, ChangeFeed, ChangeKind};

/// Anything that can hand back the full, ordered boss list
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<boss::Model>>;
}

#[derive(Clone)]
pub struct BossStore {
    db: DbConn,
    feed: ChangeFeed,
}

impl BossStore {
    pub fn new(db: DbConn, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// All bosses in battle order
    pub async fn list(&self) -> Result<Vec<boss::Model>> {
        let bosses = Boss::find()
            .order_by_asc(boss::Column::OrderIndex)
            .order_by_asc(boss::Column::Id)
            .all(&self.db)
            .await?;
        Ok(bosses)
    }

    pub async fn get(&self, id: &str) -> Result<boss::Model> {
        Boss::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Boss {} not found", id)))
    }

    /// Overwrite every editable field of one boss and bump `updated_at`
    pub async fn update(&self, id: &str, form: BossForm) -> Result<boss::Model> {
        let form = form.into_checked()?;
        let existing = self.get(id).await?;

        // Keep updated_at strictly increasing even if the clock has not moved
        let now = Utc::now().max(existing.updated_at + Duration::milliseconds(1));

        let mut model = existing.into_active_model();
        model.name = Set(form.name);
        model.status = Set(Some(form.status));
        model.start_time = Set(form.start_time);
        model.end_time = Set(form.end_time);
        model.level_emily = Set(form.level_emily);
        model.level_agent = Set(form.level_agent);
        model.death_count_emily = Set(form.death_count_emily);
        model.death_count_agent = Set(form.death_count_agent);
        model.clip_link = Set(form.clip_link);
        model.order_index = Set(form.order_index);
        model.updated_at = Set(now);

        let updated = model.update(&self.db).await?;
        tracing::info!("Boss {} ({}) updated to {}", updated.id, updated.name, updated.status());

        self.feed
            .publish(ChangeEvent::boss(ChangeKind::Update, updated.id.clone()));

        Ok(updated)
    }
}

#[async_trait]
impl RecordSource for BossStore {
    async fn fetch_all(&self) -> Result<Vec<boss::Model>> {
        self.list().await
    }
}
