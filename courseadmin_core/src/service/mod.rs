use sea_orm::{DatabaseConnection, DbErr};

use crate::{error::RepoError, live::ChangeFeed};

pub mod admin;
pub mod badges;
pub mod flashcards;
pub mod integrity;
pub mod modules;
pub mod multiple_choice;
pub mod progress;
pub mod quiz_questions;
pub mod quizzes;
pub mod resources;

/// A row that vanished between the lookup and the write is reported the same
/// way as one that was never there.
pub(crate) fn missing_on_update(err: DbErr, entity: &'static str, id: impl ToString) -> RepoError {
    match err {
        DbErr::RecordNotUpdated => RepoError::not_found(entity, id),
        err => RepoError::Transport(err),
    }
}

/// Every repository over one connection and one change feed.
#[derive(Clone)]
pub struct Services {
    pub modules: modules::ModulesService,
    pub flashcards: flashcards::FlashcardsService,
    pub multiple_choice: multiple_choice::MultipleChoiceService,
    pub quizzes: quizzes::QuizzesService,
    pub quiz_questions: quiz_questions::QuizQuestionsService,
    pub resources: resources::ResourcesService,
    pub badges: badges::BadgesService,
    pub progress: progress::ProgressService,
    pub integrity: integrity::IntegrityService,
    pub feed: ChangeFeed,
}

impl Services {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self {
            modules: modules::ModulesService::new(db.clone(), feed.clone()),
            flashcards: flashcards::FlashcardsService::new(db.clone(), feed.clone()),
            multiple_choice: multiple_choice::MultipleChoiceService::new(db.clone(), feed.clone()),
            quizzes: quizzes::QuizzesService::new(db.clone(), feed.clone()),
            quiz_questions: quiz_questions::QuizQuestionsService::new(db.clone(), feed.clone()),
            resources: resources::ResourcesService::new(db.clone(), feed.clone()),
            badges: badges::BadgesService::new(db.clone(), feed.clone()),
            progress: progress::ProgressService::new(db.clone()),
            integrity: integrity::IntegrityService::new(db, feed.clone()),
            feed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_updated_is_not_found() {
        let err = missing_on_update(DbErr::RecordNotUpdated, "module", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "module not found: abc");
    }

    #[test]
    fn test_other_errors_are_transport() {
        let err = missing_on_update(DbErr::Custom("boom".to_string()), "module", "abc");
        assert!(matches!(err, RepoError::Transport(_)));
    }
}
