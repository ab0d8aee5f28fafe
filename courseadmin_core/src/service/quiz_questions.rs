use futures::FutureExt;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    choices::AnswerOptions,
    entity::prelude::*,
    error::{require_patch_text, require_text, RepoError, RepoResult, ValidationError},
    ids::{QuizId, QuizQuestionId},
    live::{Change, ChangeFeed, ChangeKind, LiveQuery, Table, Watch},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuizQuestion {
    pub quiz_id: QuizId,
    pub question: String,
    pub options: AnswerOptions,
    pub correct_answer: i32,
    /// Weight of the question in the quiz score.
    pub points: i32,
    pub order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestionPatch {
    pub question: Option<String>,
    pub options: Option<AnswerOptions>,
    pub correct_answer: Option<i32>,
    pub points: Option<i32>,
    pub order: Option<i32>,
}

impl QuizQuestionPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone)]
pub struct QuizQuestionsService {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl QuizQuestionsService {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    pub async fn get(
        &self,
        question_id: QuizQuestionId,
    ) -> RepoResult<Option<QuizQuestionModel>> {
        Ok(QuizQuestion::find_by_id(question_id).one(&self.db).await?)
    }

    /// No creation stamp on this table; the v7 id breaks `order` ties.
    pub async fn list(&self, quiz_id: QuizId) -> RepoResult<Vec<QuizQuestionModel>> {
        let questions = QuizQuestion::find()
            .filter(QuizQuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuizQuestionColumn::Order)
            .order_by_asc(QuizQuestionColumn::Id)
            .all(&self.db)
            .await?;

        Ok(questions)
    }

    /// Sum of `points` over a quiz's questions.
    pub async fn total_points(&self, quiz_id: QuizId) -> RepoResult<i64> {
        let questions = self.list(quiz_id).await?;
        Ok(questions.iter().map(|q| i64::from(q.points)).sum())
    }

    pub async fn create(&self, new: NewQuizQuestion) -> RepoResult<QuizQuestionId> {
        require_text(QuizQuestionId::ENTITY, "question", &new.question)?;

        let quiz_exists = Quiz::find_by_id(new.quiz_id)
            .one(&self.db)
            .await?
            .is_some();

        if !quiz_exists {
            return Err(ValidationError::MissingParent {
                entity: QuizId::ENTITY,
                id: new.quiz_id.to_string(),
            }
            .into());
        }

        let question_id = QuizQuestionId::new();
        let question = QuizQuestionActiveModel {
            id: Set(question_id),
            quiz_id: Set(new.quiz_id),
            question: Set(new.question),
            options: Set(new.options),
            correct_answer: Set(new.correct_answer),
            points: Set(new.points),
            order: Set(new.order),
        };

        QuizQuestion::insert(question).exec(&self.db).await?;
        debug!(%question_id, quiz_id = %new.quiz_id, "quiz question created");

        self.feed.publish(
            Change::new(Table::QuizQuestions, ChangeKind::Inserted, question_id).under(new.quiz_id),
        );
        Ok(question_id)
    }

    pub async fn update(
        &self,
        question_id: QuizQuestionId,
        patch: QuizQuestionPatch,
    ) -> RepoResult<QuizQuestionId> {
        require_patch_text(QuizQuestionId::ENTITY, "question", patch.question.as_ref())?;

        let question = QuizQuestion::find_by_id(question_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(QuizQuestionId::ENTITY, question_id))?;

        if patch.is_empty() {
            return Ok(question_id);
        }

        let quiz_id = question.quiz_id;
        let mut question: QuizQuestionActiveModel = question.into();

        if let Some(text) = patch.question {
            question.question = Set(text);
        }
        if let Some(options) = patch.options {
            question.options = Set(options);
        }
        if let Some(correct_answer) = patch.correct_answer {
            question.correct_answer = Set(correct_answer);
        }
        if let Some(points) = patch.points {
            question.points = Set(points);
        }
        if let Some(order) = patch.order {
            question.order = Set(order);
        }

        question
            .update(&self.db)
            .await
            .map_err(|e| super::missing_on_update(e, QuizQuestionId::ENTITY, question_id))?;

        self.feed.publish(
            Change::new(Table::QuizQuestions, ChangeKind::Updated, question_id).under(quiz_id),
        );
        Ok(question_id)
    }

    pub async fn delete(&self, question_id: QuizQuestionId) -> RepoResult<()> {
        let question = QuizQuestion::find_by_id(question_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RepoError::not_found(QuizQuestionId::ENTITY, question_id))?;

        let result = QuizQuestion::delete_by_id(question_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            // Deleted by someone else since the lookup.
            return Err(RepoError::not_found(QuizQuestionId::ENTITY, question_id));
        }
        debug!(%question_id, "quiz question deleted");

        self.feed.publish(
            Change::new(Table::QuizQuestions, ChangeKind::Deleted, question_id)
                .under(question.quiz_id),
        );
        Ok(())
    }

    pub fn watch_list(&self, quiz_id: QuizId) -> LiveQuery<Vec<QuizQuestionModel>> {
        let service = self.clone();
        let watch = Watch::Children {
            table: Table::QuizQuestions,
            parent: quiz_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.list(quiz_id).await }.boxed()
        })
    }

    pub fn watch(&self, question_id: QuizQuestionId) -> LiveQuery<Option<QuizQuestionModel>> {
        let service = self.clone();
        let watch = Watch::Record {
            table: Table::QuizQuestions,
            id: question_id.into_uuid(),
        };
        self.feed.watch(watch, move || {
            let service = service.clone();
            async move { service.get(question_id).await }.boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{modules::ModulesService, quizzes::QuizzesService};
    use crate::test_utils;

    struct Fixture {
        quizzes: QuizzesService,
        questions: QuizQuestionsService,
        quiz_id: QuizId,
    }

    async fn setup() -> Fixture {
        let db = test_utils::setup_test_db().await;
        let feed = ChangeFeed::default();
        let modules = ModulesService::new(db.clone(), feed.clone());
        let quizzes = QuizzesService::new(db.clone(), feed.clone());

        let module_id = modules.create(test_utils::new_module("Intro", 0)).await.unwrap();
        let quiz_id = quizzes
            .create(test_utils::new_quiz(module_id, "Checkpoint"))
            .await
            .unwrap();

        Fixture {
            quizzes,
            questions: QuizQuestionsService::new(db, feed),
            quiz_id,
        }
    }

    fn question(quiz_id: QuizId, text: &str, points: i32, order: i32) -> NewQuizQuestion {
        NewQuizQuestion {
            quiz_id,
            question: text.to_string(),
            options: AnswerOptions::from(vec!["true", "false"]),
            correct_answer: 0,
            points,
            order,
        }
    }

    #[tokio::test]
    async fn test_list_by_order_within_quiz() {
        let fx = setup().await;

        let q2 = fx.questions.create(question(fx.quiz_id, "second", 1, 2)).await.unwrap();
        let q1 = fx.questions.create(question(fx.quiz_id, "first", 1, 1)).await.unwrap();
        let q2b = fx.questions.create(question(fx.quiz_id, "second again", 1, 2)).await.unwrap();

        let ids: Vec<_> = fx.questions.list(fx.quiz_id).await.unwrap().into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![q1, q2, q2b]);
    }

    #[tokio::test]
    async fn test_total_points() {
        let fx = setup().await;
        fx.questions.create(question(fx.quiz_id, "a", 5, 0)).await.unwrap();
        fx.questions.create(question(fx.quiz_id, "b", 10, 1)).await.unwrap();

        assert_eq!(fx.questions.total_points(fx.quiz_id).await.unwrap(), 15);
        assert_eq!(fx.questions.total_points(QuizId::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_patch_points_only() {
        let fx = setup().await;
        let id = fx.questions.create(question(fx.quiz_id, "a", 5, 3)).await.unwrap();

        fx.questions
            .update(id, QuizQuestionPatch { points: Some(8), ..Default::default() })
            .await
            .unwrap();

        let stored = fx.questions.get(id).await.unwrap().unwrap();
        assert_eq!(stored.points, 8);
        assert_eq!(stored.order, 3);
        assert_eq!(stored.question, "a");
        assert_eq!(stored.options.len(), 2);
    }

    #[tokio::test]
    async fn test_question_needs_quiz() {
        let fx = setup().await;
        let err = fx
            .questions
            .create(question(QuizId::new(), "lost", 1, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::MissingParent { entity: "quiz", .. })
        ));
    }

    #[tokio::test]
    async fn test_questions_outlive_quiz() {
        let fx = setup().await;
        let id = fx.questions.create(question(fx.quiz_id, "a", 1, 0)).await.unwrap();

        fx.quizzes.delete(fx.quiz_id).await.unwrap();

        let listed = fx.questions.list(fx.quiz_id).await.unwrap();
        assert_eq!(listed.iter().map(|q| q.id).collect::<Vec<_>>(), vec![id]);
    }

    #[tokio::test]
    async fn test_watch_sees_create() {
        let fx = setup().await;
        let mut live = fx.questions.watch_list(fx.quiz_id);
        assert!(live.next().await.unwrap().unwrap().is_empty());

        fx.questions.create(question(fx.quiz_id, "a", 1, 0)).await.unwrap();
        assert_eq!(live.next().await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_watch_question_sees_delete() {
        let fx = setup().await;
        let id = fx.questions.create(question(fx.quiz_id, "a", 1, 0)).await.unwrap();

        let mut live = fx.questions.watch(id);
        assert!(live.next().await.unwrap().unwrap().is_some());

        fx.questions.delete(id).await.unwrap();
        assert!(live.next().await.unwrap().unwrap().is_none());
    }
}
