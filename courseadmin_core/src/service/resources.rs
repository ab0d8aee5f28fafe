use futures::FutureExt;
use sea_orm::{DatabaseConnection, Select};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    clock,
    entity::prelude::*,
    error::{require_patch_text, require_text, RepoError, RepoResult},
    ids::ResourceId,
    live::{Change, ChangeFeed, ChangeKind, LiveQuery, Table, Watch},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

impl ResourcePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn ordered(select: Select<Resource>) -> Select<Resource> {
    select
        .order_by_asc(ResourceColumn::Order)
        .order_by_asc(ResourceColumn::CreatedAt)
        .order_by_asc(ResourceColumn::Id)
}

#[derive(Clone)]
pub struct ResourcesService {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl ResourcesService {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub async fn get(&self, resource_id: ResourceId) -> RepoResult<Option<ResourceModel>> {
        Ok(Resource::find_by_id(resource_id).one(&self.db).await?)
    }

    /// Every resource, active or not.
    pub async fn list(&self) -> RepoResult<Vec<ResourceModel>> {
        Ok(ordered(Resource::find()).all(&self.db).await?)
    }

    pub async fn list_active(&self) -> RepoResult<Vec<ResourceModel>> {
        Ok(ordered(Resource::find().filter(ResourceColumn::IsActive.eq(true)))
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_type(&self, kind: &str) -> RepoResult<Vec<ResourceModel>> {
        Ok(ordered(Resource::find().filter(ResourceColumn::Kind.eq(kind)))
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, new: NewResource) -> RepoResult<ResourceId> {
        require_text(ResourceId::ENTITY, "title", &new.title)?;
        require_text(ResourceId::ENTITY, "type", &new.kind)?;

        let resource_id = ResourceId::new();
        let resource = ResourceActiveModel {
            id: Set(resource_id),
            title: Set(new.title),
            description: Set(new.description),
            url: Set(new.url),
            kind: Set(new.kind),
            category: Set(new.category),
            order: Set(new.order),
            is_active: Set(new.is_active),
            created_at: Set(clock::now_millis()),
        };

        Resource::insert(resource).exec(&self.db).await?;
        debug!(%resource_id, "resource created");

        self.feed
            .publish(Change::new(Table::Resources, ChangeKind::Inserted, resource_id));
        Ok(resource_id)
    }

    pub async fn update(
        &self,
        resource_id: ResourceId,
        patch: ResourcePatch,
    ) -> RepoResult<ResourceId> {
        require_patch_text(ResourceId::ENTITY, "title", patch.title.as_ref())?;
        require_patch_text(ResourceId::ENTITY, "type", patch.kind.as_ref())?;

        let resource = Resource::find_by_id(resource_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(ResourceId::ENTITY, resource_id))?;

        if patch.is_empty() {
            return Ok(resource_id);
        }

        let mut resource: ResourceActiveModel = resource.into();
        if let Some(title) = patch.title {
            resource.title = Set(title);
        }
        if let Some(description) = patch.description {
            resource.description = Set(Some(description));
        }
        if let Some(url) = patch.url {
            resource.url = Set(Some(url));
        }
        if let Some(kind) = patch.kind {
            resource.kind = Set(kind);
        }
        if let Some(category) = patch.category {
            resource.category = Set(Some(category));
        }
        if let Some(order) = patch.order {
            resource.order = Set(order);
        }
        if let Some(is_active) = patch.is_active {
            resource.is_active = Set(is_active);
        }

        resource
            .update(&self.db)
            .await
            .map_err(|e| super::missing_on_update(e, ResourceId::ENTITY, resource_id))?;

        self.feed
            .publish(Change::new(Table::Resources, ChangeKind::Updated, resource_id));
        Ok(resource_id)
    }

    pub async fn delete(&self, resource_id: ResourceId) -> RepoResult<()> {
        let result = Resource::delete_by_id(resource_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found(ResourceId::ENTITY, resource_id));
        }
        debug!(%resource_id, "resource deleted");

        self.feed
            .publish(Change::new(Table::Resources, ChangeKind::Deleted, resource_id));
        Ok(())
    }

    pub fn watch_list(&self) -> LiveQuery<Vec<ResourceModel>> {
        let service = self.clone();
        self.feed.watch(Watch::Table(Table::Resources), move || {
            let service = service.clone();
            async move { service.list().await }.boxed()
        })
    }

    pub fn watch(&self, resource_id: ResourceId) -> LiveQuery<Option<ResourceModel>> {
        let service = self.clone();
        let watch = Watch::Record {
            table: Table::Resources,
            id: resource_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.get(resource_id).await }.boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::test_utils;

    async fn setup_test_service() -> ResourcesService {
        let db = test_utils::setup_test_db().await;
        ResourcesService::new(db, ChangeFeed::default())
    }

    fn resource(title: &str, kind: &str, order: i32, is_active: bool) -> NewResource {
        NewResource {
            title: title.to_string(),
            description: None,
            url: Some(format!("https://example.org/{title}")),
            kind: kind.to_string(),
            category: None,
            order,
            is_active,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = setup_test_service().await;
        let id = service.create(resource("Guide", "article", 0, true)).await.unwrap();

        let stored = service.get(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Guide");
        assert_eq!(stored.kind, "article");
        assert_eq!(stored.url.as_deref(), Some("https://example.org/Guide"));
        assert_eq!(stored.description, None);
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn test_type_field_serializes_as_type() {
        let service = setup_test_service().await;
        let id = service.create(resource("Clip", "video", 0, true)).await.unwrap();
        let stored = service.get(id).await.unwrap().unwrap();

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["type"], "video");
        assert!(json.get("kind").is_none());
    }

    #[tokio::test]
    async fn test_filtered_lists() {
        let service = setup_test_service().await;
        let video = service.create(resource("Clip", "video", 2, true)).await.unwrap();
        let hidden = service.create(resource("Old", "article", 1, false)).await.unwrap();
        let article = service.create(resource("Guide", "article", 0, true)).await.unwrap();

        let ids = |models: Vec<ResourceModel>| models.into_iter().map(|r| r.id).collect::<Vec<_>>();

        assert_eq!(ids(service.list().await.unwrap()), vec![article, hidden, video]);
        assert_eq!(ids(service.list_active().await.unwrap()), vec![article, video]);
        assert_eq!(ids(service.list_by_type("article").await.unwrap()), vec![article, hidden]);
        assert!(service.list_by_type("podcast").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deactivate_keeps_other_fields() {
        let service = setup_test_service().await;
        let id = service.create(resource("Guide", "article", 3, true)).await.unwrap();

        service
            .update(id, ResourcePatch { is_active: Some(false), ..Default::default() })
            .await
            .unwrap();

        let stored = service.get(id).await.unwrap().unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.order, 3);
        assert_eq!(stored.title, "Guide");
        assert!(service.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_type_is_rejected() {
        let service = setup_test_service().await;
        let err = service.create(resource("Guide", "  ", 0, true)).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::MissingField { field: "type", .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_and_watch() {
        let service = setup_test_service().await;
        let id = service.create(resource("Guide", "article", 0, true)).await.unwrap();

        let mut live = service.watch(id);
        assert!(live.next().await.unwrap().unwrap().is_some());

        service.delete(id).await.unwrap();
        assert!(live.next().await.unwrap().unwrap().is_none());
        assert!(service.delete(id).await.unwrap_err().is_not_found());
    }
}
