use futures::FutureExt;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    clock,
    entity::prelude::*,
    error::{require_patch_text, require_text, RepoError, RepoResult, ValidationError},
    ids::{FlashcardId, ModuleId},
    live::{Change, ChangeFeed, ChangeKind, LiveQuery, Table, Watch},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlashcard {
    pub module_id: ModuleId,
    pub question: String,
    pub answer: String,
    pub order: i32,
}

/// The owning module cannot be changed after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub order: Option<i32>,
}

impl FlashcardPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone)]
pub struct FlashcardsService {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl FlashcardsService {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub async fn get(&self, flashcard_id: FlashcardId) -> RepoResult<Option<FlashcardModel>> {
        Ok(Flashcard::find_by_id(flashcard_id).one(&self.db).await?)
    }

    /// Cards of one module, ascending by `order`, ties in insertion order.
    pub async fn list(&self, module_id: ModuleId) -> RepoResult<Vec<FlashcardModel>> {
        let cards = Flashcard::find()
            .filter(FlashcardColumn::ModuleId.eq(module_id))
            .order_by_asc(FlashcardColumn::Order)
            .order_by_asc(FlashcardColumn::CreatedAt)
            .order_by_asc(FlashcardColumn::Id)
            .all(&self.db)
            .await?;

        Ok(cards)
    }

    pub async fn create(&self, new: NewFlashcard) -> RepoResult<FlashcardId> {
        require_text(FlashcardId::ENTITY, "question", &new.question)?;
        require_text(FlashcardId::ENTITY, "answer", &new.answer)?;

        // The parent is checked here only; deleting it later orphans the card.
        let module_exists = Module::find_by_id(new.module_id)
            .one(&self.db)
            .await?
            .is_some();

        if !module_exists {
            return Err(ValidationError::MissingParent {
                entity: ModuleId::ENTITY,
                id: new.module_id.to_string(),
            }
            .into());
        }

        let flashcard_id = FlashcardId::new();
        let flashcard = FlashcardActiveModel {
            id: Set(flashcard_id),
            module_id: Set(new.module_id),
            question: Set(new.question),
            answer: Set(new.answer),
            order: Set(new.order),
            created_at: Set(clock::now_millis()),
        };

        Flashcard::insert(flashcard).exec(&self.db).await?;
        debug!(%flashcard_id, module_id = %new.module_id, "flashcard created");

        self.feed.publish(
            Change::new(Table::Flashcards, ChangeKind::Inserted, flashcard_id).under(new.module_id),
        );
        Ok(flashcard_id)
    }

    pub async fn update(
        &self,
        flashcard_id: FlashcardId,
        patch: FlashcardPatch,
    ) -> RepoResult<FlashcardId> {
        require_patch_text(FlashcardId::ENTITY, "question", patch.question.as_ref())?;
        require_patch_text(FlashcardId::ENTITY, "answer", patch.answer.as_ref())?;

        let flashcard = Flashcard::find_by_id(flashcard_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(FlashcardId::ENTITY, flashcard_id))?;

        if patch.is_empty() {
            return Ok(flashcard_id);
        }

        let module_id = flashcard.module_id;
        let mut flashcard: FlashcardActiveModel = flashcard.into();

        if let Some(question) = patch.question {
            flashcard.question = Set(question);
        }
        if let Some(answer) = patch.answer {
            flashcard.answer = Set(answer);
        }
        if let Some(order) = patch.order {
            flashcard.order = Set(order);
        }

        flashcard
            .update(&self.db)
            .await
            .map_err(|e| super::missing_on_update(e, FlashcardId::ENTITY, flashcard_id))?;

        self.feed.publish(
            Change::new(Table::Flashcards, ChangeKind::Updated, flashcard_id).under(module_id),
        );
        Ok(flashcard_id)
    }

    pub async fn delete(&self, flashcard_id: FlashcardId) -> RepoResult<()> {
        let flashcard = Flashcard::find_by_id(flashcard_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(FlashcardId::ENTITY, flashcard_id))?;

        let result = Flashcard::delete_by_id(flashcard_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            // Deleted by someone else since the lookup.
            return Err(RepoError::not_found(FlashcardId::ENTITY, flashcard_id));
        }
        debug!(%flashcard_id, "flashcard deleted");

        self.feed.publish(
            Change::new(Table::Flashcards, ChangeKind::Deleted, flashcard_id)
                .under(flashcard.module_id),
        );
        Ok(())
    }

    pub fn watch_list(&self, module_id: ModuleId) -> LiveQuery<Vec<FlashcardModel>> {
        let service = self.clone();
        let watch = Watch::Children {
            table: Table::Flashcards,
            parent: module_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.list(module_id).await }.boxed()
        })
    }

    pub fn watch(&self, flashcard_id: FlashcardId) -> LiveQuery<Option<FlashcardModel>> {
        let service = self.clone();
        let watch = Watch::Record {
            table: Table::Flashcards,
            id: flashcard_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.get(flashcard_id).await }.boxed()
        })
    }
}
