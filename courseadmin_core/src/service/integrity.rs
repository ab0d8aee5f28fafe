use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    entity::prelude::*,
    error::RepoResult,
    ids::{FlashcardId, ModuleId, MultipleChoiceId, QuizId, QuizQuestionId},
    live::ChangeFeed,
};

use super::{
    flashcards::FlashcardsService, modules::ModulesService,
    multiple_choice::MultipleChoiceService, quiz_questions::QuizQuestionsService,
    quizzes::QuizzesService,
};

/// Child records whose parent row no longer exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanReport {
    pub flashcards: Vec<FlashcardId>,
    pub multiple_choice: Vec<MultipleChoiceId>,
    pub quizzes: Vec<QuizId>,
    pub quiz_questions: Vec<QuizQuestionId>,
}

impl OrphanReport {
    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
            && self.multiple_choice.is_empty()
            && self.quizzes.is_empty()
            && self.quiz_questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flashcards.len()
            + self.multiple_choice.len()
            + self.quizzes.len()
            + self.quiz_questions.len()
    }
}

/// What a [`IntegrityService::purge_module`] run removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    pub flashcards: usize,
    pub multiple_choice: usize,
    pub quizzes: usize,
    pub quiz_questions: usize,
    pub module_deleted: bool,
    /// Lookups or deletes that failed and were skipped.
    pub failures: usize,
}

/// Cross-table checks and the explicit module fan-out delete.
#[derive(Clone)]
pub struct IntegrityService {
    db: DatabaseConnection,
    modules: ModulesService,
    flashcards: FlashcardsService,
    multiple_choice: MultipleChoiceService,
    quizzes: QuizzesService,
    quiz_questions: QuizQuestionsService,
}

impl IntegrityService {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self {
            modules: ModulesService::new(db.clone(), feed.clone()),
            flashcards: FlashcardsService::new(db.clone(), feed.clone()),
            multiple_choice: MultipleChoiceService::new(db.clone(), feed.clone()),
            quizzes: QuizzesService::new(db.clone(), feed.clone()),
            quiz_questions: QuizQuestionsService::new(db.clone(), feed),
            db,
        }
    }

    pub async fn orphans(&self) -> RepoResult<OrphanReport> {
        let flashcards = Flashcard::find()
            .left_join(Module)
            .filter(ModuleColumn::Id.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|card| card.id)
            .collect();

        let multiple_choice = MultipleChoice::find()
            .left_join(Module)
            .filter(ModuleColumn::Id.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|question| question.id)
            .collect();

        let quizzes = Quiz::find()
            .left_join(Module)
            .filter(ModuleColumn::Id.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|quiz| quiz.id)
            .collect();

        let quiz_questions = QuizQuestion::find()
            .left_join(Quiz)
            .filter(QuizColumn::Id.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|question| question.id)
            .collect();

        let report = OrphanReport {
            flashcards,
            multiple_choice,
            quizzes,
            quiz_questions,
        };

        if !report.is_empty() {
            warn!(orphans = report.len(), "dangling child records found");
        }
        Ok(report)
    }

    /// Deletes a module's quizzes with their questions, its multiple choice
    /// questions and flashcards, then the module.
    ///
    /// Each delete is its own write. A failed delete is logged and counted, and
    /// the run carries on; the rows it leaves behind show up in [`Self::orphans`].
    pub async fn purge_module(&self, module_id: ModuleId) -> RepoResult<PurgeReport> {
        let quizzes = self.quizzes.list(module_id).await?;
        let multiple_choice = self.multiple_choice.list(module_id).await?;
        let flashcards = self.flashcards.list(module_id).await?;

        let mut report = PurgeReport::default();

        for quiz in &quizzes {
            let questions = match self.quiz_questions.list(quiz.id).await {
                Ok(questions) => questions,
                Err(e) => {
                    warn!(quiz_id = %quiz.id, error = %e, "purge: listing questions failed");
                    report.failures += 1;
                    Vec::new()
                }
            };
            for question in questions {
                match self.quiz_questions.delete(question.id).await {
                    Ok(()) => report.quiz_questions += 1,
                    Err(e) => {
                        warn!(quiz_question_id = %question.id, error = %e, "purge: delete failed");
                        report.failures += 1;
                    }
                }
            }
            match self.quizzes.delete(quiz.id).await {
                Ok(()) => report.quizzes += 1,
                Err(e) => {
                    warn!(quiz_id = %quiz.id, error = %e, "purge: delete failed");
                    report.failures += 1;
                }
            }
        }

        for question in &multiple_choice {
            match self.multiple_choice.delete(question.id).await {
                Ok(()) => report.multiple_choice += 1,
                Err(e) => {
                    warn!(question_id = %question.id, error = %e, "purge: delete failed");
                    report.failures += 1;
                }
            }
        }

        for card in &flashcards {
            match self.flashcards.delete(card.id).await {
                Ok(()) => report.flashcards += 1,
                Err(e) => {
                    warn!(flashcard_id = %card.id, error = %e, "purge: delete failed");
                    report.failures += 1;
                }
            }
        }

        match self.modules.delete(module_id).await {
            Ok(()) => report.module_deleted = true,
            Err(e) if e.is_not_found() => {
                if quizzes.is_empty() && multiple_choice.is_empty() && flashcards.is_empty() {
                    return Err(e);
                }
            }
            Err(e) => {
                warn!(%module_id, error = %e, "purge: delete failed");
                report.failures += 1;
            }
        }

        info!(%module_id, ?report, "module purged");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::AnswerOptions;
    use crate::error::RepoError;
    use crate::service::{
        flashcards::NewFlashcard, multiple_choice::NewMultipleChoice,
        quiz_questions::NewQuizQuestion,
    };
    use crate::test_utils;
    use sea_orm::Statement;

    struct Fixture {
        integrity: IntegrityService,
        modules: ModulesService,
        flashcards: FlashcardsService,
        multiple_choice: MultipleChoiceService,
        quizzes: QuizzesService,
        quiz_questions: QuizQuestionsService,
    }

    async fn setup() -> Fixture {
        let db = test_utils::setup_test_db().await;
        let feed = ChangeFeed::default();
        Fixture {
            integrity: IntegrityService::new(db.clone(), feed.clone()),
            modules: ModulesService::new(db.clone(), feed.clone()),
            flashcards: FlashcardsService::new(db.clone(), feed.clone()),
            multiple_choice: MultipleChoiceService::new(db.clone(), feed.clone()),
            quizzes: QuizzesService::new(db.clone(), feed.clone()),
            quiz_questions: QuizQuestionsService::new(db, feed),
        }
    }

    /// A module with one of everything under it.
    async fn populated_module(fx: &Fixture, title: &str) -> (ModuleId, QuizId) {
        let module_id = fx.modules.create(test_utils::new_module(title, 0)).await.unwrap();

        fx.flashcards
            .create(NewFlashcard {
                module_id,
                question: "q".to_string(),
                answer: "a".to_string(),
                order: 0,
            })
            .await
            .unwrap();

        fx.multiple_choice
            .create(NewMultipleChoice {
                module_id,
                question: "pick".to_string(),
                options: AnswerOptions::from(vec!["x", "y"]),
                correct_answer: 1,
                explanation: None,
                order: 0,
            })
            .await
            .unwrap();

        let quiz_id = fx
            .quizzes
            .create(test_utils::new_quiz(module_id, "Checkpoint"))
            .await
            .unwrap();

        fx.quiz_questions
            .create(NewQuizQuestion {
                quiz_id,
                question: "true?".to_string(),
                options: AnswerOptions::from(vec!["true", "false"]),
                correct_answer: 0,
                points: 1,
                order: 0,
            })
            .await
            .unwrap();

        (module_id, quiz_id)
    }

    #[tokio::test]
    async fn test_no_orphans_in_a_consistent_store() {
        let fx = setup().await;
        populated_module(&fx, "Intro").await;

        assert!(fx.integrity.orphans().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plain_delete_leaves_orphans() {
        let fx = setup().await;
        let (module_id, quiz_id) = populated_module(&fx, "Intro").await;
        populated_module(&fx, "Other").await;

        fx.modules.delete(module_id).await.unwrap();

        let report = fx.integrity.orphans().await.unwrap();
        assert_eq!(report.flashcards.len(), 1);
        assert_eq!(report.multiple_choice.len(), 1);
        assert_eq!(report.quizzes, vec![quiz_id]);
        // The quiz still exists, so its questions are not orphaned yet.
        assert!(report.quiz_questions.is_empty());

        fx.quizzes.delete(quiz_id).await.unwrap();
        let report = fx.integrity.orphans().await.unwrap();
        assert_eq!(report.quiz_questions.len(), 1);
        assert!(report.quizzes.is_empty());
    }

    #[tokio::test]
    async fn test_purge_module_removes_everything_under_it() {
        let fx = setup().await;
        let (module_id, quiz_id) = populated_module(&fx, "Intro").await;
        let (other, _) = populated_module(&fx, "Other").await;

        let report = fx.integrity.purge_module(module_id).await.unwrap();
        assert_eq!(
            report,
            PurgeReport {
                flashcards: 1,
                multiple_choice: 1,
                quizzes: 1,
                quiz_questions: 1,
                module_deleted: true,
                failures: 0,
            }
        );

        assert!(fx.modules.get(module_id).await.unwrap().is_none());
        assert!(fx.flashcards.list(module_id).await.unwrap().is_empty());
        assert!(fx.quiz_questions.list(quiz_id).await.unwrap().is_empty());
        assert!(fx.integrity.orphans().await.unwrap().is_empty());

        // The sibling module is untouched.
        let counts = fx.modules.content_counts(other).await.unwrap();
        assert_eq!((counts.flashcards, counts.multiple_choice, counts.quizzes), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_purge_cleans_up_after_plain_delete() {
        let fx = setup().await;
        let (module_id, _) = populated_module(&fx, "Intro").await;
        fx.modules.delete(module_id).await.unwrap();

        let report = fx.integrity.purge_module(module_id).await.unwrap();
        assert!(!report.module_deleted);
        assert_eq!(report.flashcards, 1);
        assert!(fx.integrity.orphans().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purge_unknown_module_is_not_found() {
        let fx = setup().await;
        let err = fx.integrity.purge_module(ModuleId::new()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { entity: "module", .. }));
    }

    #[tokio::test]
    async fn test_purge_carries_on_when_questions_cannot_be_listed() {
        let fx = setup().await;
        let (module_id, quiz_id) = populated_module(&fx, "Intro").await;

        let db = &fx.integrity.db;
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "DROP TABLE quiz_questions",
        ))
        .await
        .unwrap();

        let report = fx.integrity.purge_module(module_id).await.unwrap();
        assert_eq!(report.failures, 1);
        assert_eq!(report.quiz_questions, 0);
        assert_eq!(report.quizzes, 1);
        assert_eq!(report.multiple_choice, 1);
        assert_eq!(report.flashcards, 1);
        assert!(report.module_deleted);

        assert!(fx.quizzes.get(quiz_id).await.unwrap().is_none());
        assert!(fx.modules.get(module_id).await.unwrap().is_none());
    }
}
