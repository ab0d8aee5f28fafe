use futures::FutureExt;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    clock,
    entity::prelude::*,
    error::{require_patch_text, require_text, RepoError, RepoResult, ValidationError},
    ids::{ModuleId, QuizId},
    live::{Change, ChangeFeed, ChangeKind, LiveQuery, Table, Watch},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuiz {
    pub module_id: ModuleId,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: i32,
    /// Minutes.
    pub time_limit: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub passing_score: Option<i32>,
    pub time_limit: Option<i32>,
}

impl QuizPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone)]
pub struct QuizzesService {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl QuizzesService {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub async fn get(&self, quiz_id: QuizId) -> RepoResult<Option<QuizModel>> {
        Ok(Quiz::find_by_id(quiz_id).one(&self.db).await?)
    }

    /// Quizzes have no display order; they list in creation order.
    pub async fn list(&self, module_id: ModuleId) -> RepoResult<Vec<QuizModel>> {
        let quizzes = Quiz::find()
            .filter(QuizColumn::ModuleId.eq(module_id))
            .order_by_asc(QuizColumn::CreatedAt)
            .order_by_asc(QuizColumn::Id)
            .all(&self.db)
            .await?;

        Ok(quizzes)
    }

    pub async fn create(&self, new: NewQuiz) -> RepoResult<QuizId> {
        require_text(QuizId::ENTITY, "title", &new.title)?;

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

        let quiz_id = QuizId::new();
        let quiz = QuizActiveModel {
            id: Set(quiz_id),
            module_id: Set(new.module_id),
            title: Set(new.title),
            description: Set(new.description),
            passing_score: Set(new.passing_score),
            time_limit: Set(new.time_limit),
            created_at: Set(clock::now_millis()),
        };

        Quiz::insert(quiz).exec(&self.db).await?;
        debug!(%quiz_id, module_id = %new.module_id, "quiz created");

        self.feed
            .publish(Change::new(Table::Quizzes, ChangeKind::Inserted, quiz_id).under(new.module_id));
        Ok(quiz_id)
    }

    pub async fn update(&self, quiz_id: QuizId, patch: QuizPatch) -> RepoResult<QuizId> {
        require_patch_text(QuizId::ENTITY, "title", patch.title.as_ref())?;

        let quiz = Quiz::find_by_id(quiz_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(QuizId::ENTITY, quiz_id))?;

        if patch.is_empty() {
            return Ok(quiz_id);
        }

        let module_id = quiz.module_id;
        let mut quiz: QuizActiveModel = quiz.into();

        if let Some(title) = patch.title {
            quiz.title = Set(title);
        }
        if let Some(description) = patch.description {
            quiz.description = Set(Some(description));
        }
        if let Some(passing_score) = patch.passing_score {
            quiz.passing_score = Set(passing_score);
        }
        if let Some(time_limit) = patch.time_limit {
            quiz.time_limit = Set(Some(time_limit));
        }

        quiz.update(&self.db)
            .await
            .map_err(|e| super::missing_on_update(e, QuizId::ENTITY, quiz_id))?;

        self.feed
            .publish(Change::new(Table::Quizzes, ChangeKind::Updated, quiz_id).under(module_id));
        Ok(quiz_id)
    }

    /// Deletes the quiz only; its questions are left in place.
    pub async fn delete(&self, quiz_id: QuizId) -> RepoResult<()> {
        let quiz = Quiz::find_by_id(quiz_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(QuizId::ENTITY, quiz_id))?;

        let result = Quiz::delete_by_id(quiz_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            // Deleted by someone else since the lookup.
            return Err(RepoError::not_found(QuizId::ENTITY, quiz_id));
        }
        debug!(%quiz_id, "quiz deleted");

        self.feed
            .publish(Change::new(Table::Quizzes, ChangeKind::Deleted, quiz_id).under(quiz.module_id));
        Ok(())
    }

    pub fn watch_list(&self, module_id: ModuleId) -> LiveQuery<Vec<QuizModel>> {
        let service = self.clone();
        let watch = Watch::Children {
            table: Table::Quizzes,
            parent: module_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.list(module_id).await }.boxed()
        })
    }

    pub fn watch(&self, quiz_id: QuizId) -> LiveQuery<Option<QuizModel>> {
        let service = self.clone();
        let watch = Watch::Record {
            table: Table::Quizzes,
            id: quiz_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.get(quiz_id).await }.boxed()
        })
    }
}
