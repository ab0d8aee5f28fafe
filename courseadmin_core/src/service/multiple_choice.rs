use futures::FutureExt;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    choices::AnswerOptions,
    clock,
    entity::prelude::*,
    error::{require_patch_text, require_text, RepoError, RepoResult, ValidationError},
    ids::{ModuleId, MultipleChoiceId},
    live::{Change, ChangeFeed, ChangeKind, LiveQuery, Table, Watch},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMultipleChoice {
    pub module_id: ModuleId,
    pub question: String,
    pub options: AnswerOptions,
    /// Index into `options`; out of range values are stored as given.
    pub correct_answer: i32,
    pub explanation: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoicePatch {
    pub question: Option<String>,
    pub options: Option<AnswerOptions>,
    pub correct_answer: Option<i32>,
    pub explanation: Option<String>,
    pub order: Option<i32>,
}

impl MultipleChoicePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone)]
pub struct MultipleChoiceService {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl MultipleChoiceService {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub async fn get(
        &self,
        question_id: MultipleChoiceId,
    ) -> RepoResult<Option<MultipleChoiceModel>> {
        Ok(MultipleChoice::find_by_id(question_id).one(&self.db).await?)
    }

    pub async fn list(&self, module_id: ModuleId) -> RepoResult<Vec<MultipleChoiceModel>> {
        let questions = MultipleChoice::find()
            .filter(MultipleChoiceColumn::ModuleId.eq(module_id))
            .order_by_asc(MultipleChoiceColumn::Order)
            .order_by_asc(MultipleChoiceColumn::CreatedAt)
            .order_by_asc(MultipleChoiceColumn::Id)
            .all(&self.db)
            .await?;

        Ok(questions)
    }

    pub async fn create(&self, new: NewMultipleChoice) -> RepoResult<MultipleChoiceId> {
        require_text(MultipleChoiceId::ENTITY, "question", &new.question)?;

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

        let question_id = MultipleChoiceId::new();
        let question = MultipleChoiceActiveModel {
            id: Set(question_id),
            module_id: Set(new.module_id),
            question: Set(new.question),
            options: Set(new.options),
            correct_answer: Set(new.correct_answer),
            explanation: Set(new.explanation),
            order: Set(new.order),
            created_at: Set(clock::now_millis()),
        };

        MultipleChoice::insert(question).exec(&self.db).await?;
        debug!(%question_id, module_id = %new.module_id, "multiple choice question created");

        self.feed.publish(
            Change::new(Table::MultipleChoiceQuestions, ChangeKind::Inserted, question_id)
                .under(new.module_id),
        );
        Ok(question_id)
    }

    pub async fn update(
        &self,
        question_id: MultipleChoiceId,
        patch: MultipleChoicePatch,
    ) -> RepoResult<MultipleChoiceId> {
        require_patch_text(MultipleChoiceId::ENTITY, "question", patch.question.as_ref())?;

        let question = MultipleChoice::find_by_id(question_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(MultipleChoiceId::ENTITY, question_id))?;

        if patch.is_empty() {
            return Ok(question_id);
        }

        let module_id = question.module_id;
        let mut question: MultipleChoiceActiveModel = question.into();

        if let Some(text) = patch.question {
            question.question = Set(text);
        }
        if let Some(options) = patch.options {
            question.options = Set(options);
        }
        if let Some(correct_answer) = patch.correct_answer {
            question.correct_answer = Set(correct_answer);
        }
        if let Some(explanation) = patch.explanation {
            question.explanation = Set(Some(explanation));
        }
        if let Some(order) = patch.order {
            question.order = Set(order);
        }

        question
            .update(&self.db)
            .await
            .map_err(|e| super::missing_on_update(e, MultipleChoiceId::ENTITY, question_id))?;

        self.feed.publish(
            Change::new(Table::MultipleChoiceQuestions, ChangeKind::Updated, question_id)
                .under(module_id),
        );
        Ok(question_id)
    }

    pub async fn delete(&self, question_id: MultipleChoiceId) -> RepoResult<()> {
        let question = MultipleChoice::find_by_id(question_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(MultipleChoiceId::ENTITY, question_id))?;

        let result = MultipleChoice::delete_by_id(question_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            // Deleted by someone else since the lookup.
            return Err(RepoError::not_found(MultipleChoiceId::ENTITY, question_id));
        }
        debug!(%question_id, "multiple choice question deleted");

        self.feed.publish(
            Change::new(Table::MultipleChoiceQuestions, ChangeKind::Deleted, question_id)
                .under(question.module_id),
        );
        Ok(())
    }

    pub fn watch_list(&self, module_id: ModuleId) -> LiveQuery<Vec<MultipleChoiceModel>> {
        let service = self.clone();
        let watch = Watch::Children {
            table: Table::MultipleChoiceQuestions,
            parent: module_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.list(module_id).await }.boxed()
        })
    }

    pub fn watch(&self, question_id: MultipleChoiceId) -> LiveQuery<Option<MultipleChoiceModel>> {
        let service = self.clone();
        let watch = Watch::Record {
            table: Table::MultipleChoiceQuestions,
            id: question_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.get(question_id).await }.boxed()
        })
    }
}
