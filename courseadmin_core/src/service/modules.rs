use futures::FutureExt;
use sea_orm::{DatabaseConnection, Select};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    clock,
    entity::prelude::*,
    error::{require_patch_text, require_text, RepoError, RepoResult, ValidationError},
    ids::ModuleId,
    live::{Change, ChangeFeed, ChangeKind, LiveQuery, Table, Watch},
};

/// Fields accepted by `createModule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewModule {
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub status: ModuleStatus,
    pub order: i32,
    pub duration: Option<i32>,
    pub category: Option<String>,
    pub badge_icon: Option<String>,
    pub badge_text: Option<String>,
    pub is_published: bool,
}

impl NewModule {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text(ModuleId::ENTITY, "title", &self.title)?;
        require_text(ModuleId::ENTITY, "description", &self.description)?;
        require_text(ModuleId::ENTITY, "content", &self.content)
    }
}

/// Partial update for a module; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<ModuleStatus>,
    pub order: Option<i32>,
    pub duration: Option<i32>,
    pub category: Option<String>,
    pub badge_icon: Option<String>,
    pub badge_text: Option<String>,
    pub is_published: Option<bool>,
}

impl ModulePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        require_patch_text(ModuleId::ENTITY, "title", self.title.as_ref())?;
        require_patch_text(ModuleId::ENTITY, "description", self.description.as_ref())?;
        require_patch_text(ModuleId::ENTITY, "content", self.content.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Child record counts shown on a module's detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContentCounts {
    pub flashcards: u64,
    pub multiple_choice: u64,
    pub quizzes: u64,
}

fn ordered(select: Select<Module>) -> Select<Module> {
    select
        .order_by_asc(ModuleColumn::Order)
        .order_by_asc(ModuleColumn::CreatedAt)
        .order_by_asc(ModuleColumn::Id)
}

#[derive(Clone)]
pub struct ModulesService {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl ModulesService {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub async fn get(&self, module_id: ModuleId) -> RepoResult<Option<ModuleModel>> {
        Ok(Module::find_by_id(module_id).one(&self.db).await?)
    }

    /// All modules by display order.
    pub async fn list(&self) -> RepoResult<Vec<ModuleModel>> {
        Ok(ordered(Module::find()).all(&self.db).await?)
    }

    pub async fn list_published(&self) -> RepoResult<Vec<ModuleModel>> {
        Ok(ordered(Module::find().filter(ModuleColumn::IsPublished.eq(true)))
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_status(&self, status: ModuleStatus) -> RepoResult<Vec<ModuleModel>> {
        Ok(ordered(Module::find().filter(ModuleColumn::Status.eq(status)))
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, new: NewModule) -> RepoResult<ModuleId> {
        new.validate()?;

        let module_id = ModuleId::new();
        let module = ModuleActiveModel {
            id: Set(module_id),
            title: Set(new.title),
            description: Set(new.description),
            content: Set(new.content),
            image_url: Set(new.image_url),
            status: Set(new.status),
            order: Set(new.order),
            duration: Set(new.duration),
            category: Set(new.category),
            badge_icon: Set(new.badge_icon),
            badge_text: Set(new.badge_text),
            is_published: Set(new.is_published),
            created_at: Set(clock::now_millis()),
        };

        Module::insert(module).exec(&self.db).await?;
        debug!(%module_id, "module created");

        self.feed
            .publish(Change::new(Table::Modules, ChangeKind::Inserted, module_id));
        Ok(module_id)
    }

    pub async fn update(&self, module_id: ModuleId, patch: ModulePatch) -> RepoResult<ModuleId> {
        patch.validate()?;

        let module = Module::find_by_id(module_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(ModuleId::ENTITY, module_id))?;

        if patch.is_empty() {
            return Ok(module_id);
        }

        // Only columns set here are written, so concurrent patches to other
        // fields are not clobbered.
        let mut module: ModuleActiveModel = module.into();
        if let Some(title) = patch.title {
            module.title = Set(title);
        }
        if let Some(description) = patch.description {
            module.description = Set(description);
        }
        if let Some(content) = patch.content {
            module.content = Set(content);
        }
        if let Some(image_url) = patch.image_url {
            module.image_url = Set(Some(image_url));
        }
        if let Some(status) = patch.status {
            module.status = Set(status);
        }
        if let Some(order) = patch.order {
            module.order = Set(order);
        }
        if let Some(duration) = patch.duration {
            module.duration = Set(Some(duration));
        }
        if let Some(category) = patch.category {
            module.category = Set(Some(category));
        }
        if let Some(badge_icon) = patch.badge_icon {
            module.badge_icon = Set(Some(badge_icon));
        }
        if let Some(badge_text) = patch.badge_text {
            module.badge_text = Set(Some(badge_text));
        }
        if let Some(is_published) = patch.is_published {
            module.is_published = Set(is_published);
        }

        module
            .update(&self.db)
            .await
            .map_err(|e| super::missing_on_update(e, ModuleId::ENTITY, module_id))?;
        debug!(%module_id, "module updated");

        self.feed
            .publish(Change::new(Table::Modules, ChangeKind::Updated, module_id));
        Ok(module_id)
    }

    /// Removes the module row only. Flashcards, questions and quizzes that
    /// point at it stay where they are; see `IntegrityService::purge_module`.
    pub async fn delete(&self, module_id: ModuleId) -> RepoResult<()> {
        let result = Module::delete_by_id(module_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found(ModuleId::ENTITY, module_id));
        }
        info!(%module_id, "module deleted");

        self.feed
            .publish(Change::new(Table::Modules, ChangeKind::Deleted, module_id));
        Ok(())
    }

    pub async fn content_counts(&self, module_id: ModuleId) -> RepoResult<ModuleContentCounts> {
        let flashcards = Flashcard::find()
            .filter(FlashcardColumn::ModuleId.eq(module_id))
            .count(&self.db)
            .await?;
        let multiple_choice = MultipleChoice::find()
            .filter(MultipleChoiceColumn::ModuleId.eq(module_id))
            .count(&self.db)
            .await?;
        let quizzes = Quiz::find()
            .filter(QuizColumn::ModuleId.eq(module_id))
            .count(&self.db)
            .await?;

        Ok(ModuleContentCounts {
            flashcards,
            multiple_choice,
            quizzes,
        })
    }

    /// Live version of [`Self::list`].
    pub fn watch_list(&self) -> LiveQuery<Vec<ModuleModel>> {
        let service = self.clone();
        self.feed.watch(Watch::Table(Table::Modules), move || {
            let service = service.clone();
            async move { service.list().await }.boxed()
        })
    }

    /// Live version of [`Self::get`].
    pub fn watch(&self, module_id: ModuleId) -> LiveQuery<Option<ModuleModel>> {
        let service = self.clone();
        let watch = Watch::Record {
            table: Table::Modules,
            id: module_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.get(module_id).await }.boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    async fn setup_test_service() -> ModulesService {
        let db = test_utils::setup_test_db().await;
        ModulesService::new(db, ChangeFeed::default())
    }

    #[tokio::test]
    async fn test_create_and_get_round_trips_all_fields() {
        let service = setup_test_service().await;

        let new = NewModule {
            image_url: Some("https://cdn.example/intro.png".to_string()),
            duration: Some(45),
            category: Some("basics".to_string()),
            badge_icon: Some("star".to_string()),
            badge_text: Some("Starter".to_string()),
            ..test_utils::new_module("Intro", 1)
        };
        let module_id = service.create(new.clone()).await.unwrap();

        let module = service.get(module_id).await.unwrap().expect("module exists");
        assert_eq!(module.id, module_id);
        assert_eq!(module.title, new.title);
        assert_eq!(module.description, new.description);
        assert_eq!(module.content, new.content);
        assert_eq!(module.image_url, new.image_url);
        assert_eq!(module.status, ModuleStatus::Published);
        assert_eq!(module.order, 1);
        assert_eq!(module.duration, Some(45));
        assert_eq!(module.category.as_deref(), Some("basics"));
        assert_eq!(module.badge_icon.as_deref(), Some("star"));
        assert_eq!(module.badge_text.as_deref(), Some("Starter"));
        assert!(module.is_published);
    }

    #[tokio::test]
    async fn test_omitted_optionals_stay_absent() {
        let service = setup_test_service().await;

        let module_id = service.create(test_utils::new_module("Bare", 0)).await.unwrap();
        let module = service.get(module_id).await.unwrap().unwrap();

        assert_eq!(module.image_url, None);
        assert_eq!(module.duration, None);
        assert_eq!(module.category, None);
        assert_eq!(module.badge_icon, None);
        assert_eq!(module.badge_text, None);
    }

    #[tokio::test]
    async fn test_creation_timestamps_are_monotonic() {
        let service = setup_test_service().await;

        let mut previous = i64::MIN;
        for i in 0..5 {
            let id = service
                .create(test_utils::new_module(&format!("M{i}"), i))
                .await
                .unwrap();
            let created_at = service.get(id).await.unwrap().unwrap().created_at;
            assert!(created_at >= previous);
            previous = created_at;
        }
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let service = setup_test_service().await;
        assert!(service.get(ModuleId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let service = setup_test_service().await;

        let err = service
            .create(test_utils::new_module("  ", 0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::MissingField { field: "title", .. })
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected() {
        let err = "archived".parse::<ModuleStatus>().unwrap_err();
        assert_eq!(err, ValidationError::InvalidStatus("archived".to_string()));

        let json = serde_json::json!({
            "title": "t", "description": "d", "content": "c",
            "status": "archived", "order": 0, "is_published": false
        });
        assert!(serde_json::from_value::<NewModule>(json).is_err());
    }

    #[tokio::test]
    async fn test_list_orders_by_order_then_insertion() {
        let service = setup_test_service().await;

        let third = service.create(test_utils::new_module("c", 5)).await.unwrap();
        let first = service.create(test_utils::new_module("a", 1)).await.unwrap();
        let tie_a = service.create(test_utils::new_module("tie a", 3)).await.unwrap();
        let tie_b = service.create(test_utils::new_module("tie b", 3)).await.unwrap();

        let ids: Vec<_> = service.list().await.unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![first, tie_a, tie_b, third]);
    }

    #[tokio::test]
    async fn test_list_published_and_by_status() {
        let service = setup_test_service().await;

        let live = service.create(test_utils::new_module("live", 0)).await.unwrap();
        let draft = service
            .create(NewModule {
                status: ModuleStatus::ComingSoon,
                is_published: false,
                ..test_utils::new_module("draft", 1)
            })
            .await
            .unwrap();

        let published: Vec<_> = service.list_published().await.unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(published, vec![live]);

        let coming: Vec<_> = service
            .list_by_status(ModuleStatus::ComingSoon)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(coming, vec![draft]);
        assert!(service.list_by_status(ModuleStatus::Locked).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_named_fields() {
        let service = setup_test_service().await;
        let module_id = service.create(test_utils::new_module("Intro", 1)).await.unwrap();
        let before = service.get(module_id).await.unwrap().unwrap();

        service
            .update(
                module_id,
                ModulePatch {
                    title: Some("Intro v2".to_string()),
                    status: Some(ModuleStatus::Locked),
                    category: Some("basics".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let after = service.get(module_id).await.unwrap().unwrap();
        assert_eq!(after.title, "Intro v2");
        assert_eq!(after.status, ModuleStatus::Locked);
        assert_eq!(after.category.as_deref(), Some("basics"));
        assert_eq!(after.description, before.description);
        assert_eq!(after.content, before.content);
        assert_eq!(after.order, before.order);
        assert_eq!(after.is_published, before.is_published);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_concurrent_patches_to_different_fields_both_land() {
        let service = setup_test_service().await;
        let module_id = service.create(test_utils::new_module("T1", 0)).await.unwrap();

        let retitle = ModulePatch {
            title: Some("T2".to_string()),
            ..Default::default()
        };
        let reorder = ModulePatch {
            order: Some(7),
            ..Default::default()
        };
        let (a, b) = tokio::join!(
            service.update(module_id, retitle),
            service.update(module_id, reorder)
        );
        a.unwrap();
        b.unwrap();

        let stored = service.get(module_id).await.unwrap().unwrap();
        assert_eq!(stored.title, "T2");
        assert_eq!(stored.order, 7);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = setup_test_service().await;

        let err = service
            .update(ModuleId::new(), ModulePatch { order: Some(2), ..Default::default() })
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service.update(ModuleId::new(), ModulePatch::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let service = setup_test_service().await;
        let module_id = service.create(test_utils::new_module("Intro", 1)).await.unwrap();

        let err = service
            .update(module_id, ModulePatch { title: Some(String::new()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(service.get(module_id).await.unwrap().unwrap().title, "Intro");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let service = setup_test_service().await;
        let module_id = service.create(test_utils::new_module("Gone", 0)).await.unwrap();

        service.delete(module_id).await.unwrap();

        assert!(service.get(module_id).await.unwrap().is_none());
        assert!(service.delete(module_id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_watch_list_sees_writes() {
        let service = setup_test_service().await;
        let mut live = service.watch_list();

        assert!(live.next().await.unwrap().unwrap().is_empty());

        let module_id = service.create(test_utils::new_module("Intro", 0)).await.unwrap();
        let modules = live.next().await.unwrap().unwrap();
        assert_eq!(modules.len(), 1);

        service
            .update(module_id, ModulePatch { order: Some(9), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(live.next().await.unwrap().unwrap()[0].order, 9);

        service.delete(module_id).await.unwrap();
        assert!(live.next().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watch_record_sees_delete() {
        let service = setup_test_service().await;
        let module_id = service.create(test_utils::new_module("Intro", 0)).await.unwrap();
        let mut live = service.watch(module_id);

        assert!(live.next().await.unwrap().unwrap().is_some());
        service.delete(module_id).await.unwrap();
        assert!(live.next().await.unwrap().unwrap().is_none());
    }
}
