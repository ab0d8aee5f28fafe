use futures::FutureExt;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    clock,
    entity::prelude::*,
    error::{require_patch_text, require_text, RepoError, RepoResult},
    ids::BadgeId,
    live::{Change, ChangeFeed, ChangeKind, LiveQuery, Table, Watch},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBadge {
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    /// Human readable rule shown to learners.
    pub requirement: String,
    pub required_modules: Option<i32>,
    pub required_points: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub requirement: Option<String>,
    pub required_modules: Option<i32>,
    pub required_points: Option<i32>,
}

impl BadgePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone)]
pub struct BadgesService {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl BadgesService {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub async fn get(&self, badge_id: BadgeId) -> RepoResult<Option<BadgeModel>> {
        Ok(Badge::find_by_id(badge_id).one(&self.db).await?)
    }

    /// Badges in the order they were created.
    pub async fn list(&self) -> RepoResult<Vec<BadgeModel>> {
        let badges = Badge::find()
            .order_by_asc(BadgeColumn::CreatedAt)
            .order_by_asc(BadgeColumn::Id)
            .all(&self.db)
            .await?;

        Ok(badges)
    }

    pub async fn create(&self, new: NewBadge) -> RepoResult<BadgeId> {
        require_text(BadgeId::ENTITY, "name", &new.name)?;
        require_text(BadgeId::ENTITY, "description", &new.description)?;
        require_text(BadgeId::ENTITY, "requirement", &new.requirement)?;

        let badge_id = BadgeId::new();
        let badge = BadgeActiveModel {
            id: Set(badge_id),
            name: Set(new.name),
            description: Set(new.description),
            icon: Set(new.icon),
            requirement: Set(new.requirement),
            required_modules: Set(new.required_modules),
            required_points: Set(new.required_points),
            created_at: Set(clock::now_millis()),
        };

        Badge::insert(badge).exec(&self.db).await?;
        debug!(%badge_id, "badge created");

        self.feed
            .publish(Change::new(Table::Badges, ChangeKind::Inserted, badge_id));
        Ok(badge_id)
    }

    pub async fn update(&self, badge_id: BadgeId, patch: BadgePatch) -> RepoResult<BadgeId> {
        require_patch_text(BadgeId::ENTITY, "name", patch.name.as_ref())?;
        require_patch_text(BadgeId::ENTITY, "description", patch.description.as_ref())?;
        require_patch_text(BadgeId::ENTITY, "requirement", patch.requirement.as_ref())?;

        let badge = Badge::find_by_id(badge_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(BadgeId::ENTITY, badge_id))?;

        if patch.is_empty() {
            return Ok(badge_id);
        }

        let mut badge: BadgeActiveModel = badge.into();
        if let Some(name) = patch.name {
            badge.name = Set(name);
        }
        if let Some(description) = patch.description {
            badge.description = Set(description);
        }
        if let Some(icon) = patch.icon {
            badge.icon = Set(Some(icon));
        }
        if let Some(requirement) = patch.requirement {
            badge.requirement = Set(requirement);
        }
        if let Some(required_modules) = patch.required_modules {
            badge.required_modules = Set(Some(required_modules));
        }
        if let Some(required_points) = patch.required_points {
            badge.required_points = Set(Some(required_points));
        }

        badge
            .update(&self.db)
            .await
            .map_err(|e| super::missing_on_update(e, BadgeId::ENTITY, badge_id))?;

        self.feed
            .publish(Change::new(Table::Badges, ChangeKind::Updated, badge_id));
        Ok(badge_id)
    }

    /// Earned-badge rows that reference this badge are kept.
    pub async fn delete(&self, badge_id: BadgeId) -> RepoResult<()> {
        let result = Badge::delete_by_id(badge_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found(BadgeId::ENTITY, badge_id));
        }
        debug!(%badge_id, "badge deleted");

        self.feed
            .publish(Change::new(Table::Badges, ChangeKind::Deleted, badge_id));
        Ok(())
    }

    pub fn watch_list(&self) -> LiveQuery<Vec<BadgeModel>> {
        let service = self.clone();
        self.feed.watch(Watch::Table(Table::Badges), move || {
            let service = service.clone();
            async move { service.list().await }.boxed()
        })
    }

    pub fn watch(&self, badge_id: BadgeId) -> LiveQuery<Option<BadgeModel>> {
        let service = self.clone();
        let watch = Watch::Record {
            table: Table::Badges,
            id: badge_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.get(badge_id).await }.boxed()
        })
    }
}
