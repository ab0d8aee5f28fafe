// SeaORM entities, one per table.
//
// Content tables are owned by the admin repositories in `service`. The
// per-user tables are written by the learner-facing app and only read here.

pub mod badge;
pub mod flashcard;
pub mod module;
pub mod multiple_choice;
pub mod quiz;
pub mod quiz_question;
pub mod resource;

pub mod profile;
pub mod recent_activity;
pub mod user_badge;
pub mod user_module_progress;
pub mod user_question_progress;
pub mod user_quiz_attempt;


pub mod prelude {
    pub use super::badge::{
        ActiveModel as BadgeActiveModel, Column as BadgeColumn, Entity as Badge,
        Model as BadgeModel,
    };
    pub use super::flashcard::{
        ActiveModel as FlashcardActiveModel, Column as FlashcardColumn, Entity as Flashcard,
        Model as FlashcardModel,
    };
    pub use super::module::{
        ActiveModel as ModuleActiveModel, Column as ModuleColumn, Entity as Module,
        Model as ModuleModel, ModuleStatus,
    };
    pub use super::multiple_choice::{
        ActiveModel as MultipleChoiceActiveModel, Column as MultipleChoiceColumn,
        Entity as MultipleChoice, Model as MultipleChoiceModel,
    };
    pub use super::quiz::{
        ActiveModel as QuizActiveModel, Column as QuizColumn, Entity as Quiz, Model as QuizModel,
    };
    pub use super::quiz_question::{
        ActiveModel as QuizQuestionActiveModel, Column as QuizQuestionColumn,
        Entity as QuizQuestion, Model as QuizQuestionModel,
    };
    pub use super::resource::{
        ActiveModel as ResourceActiveModel, Column as ResourceColumn, Entity as Resource,
        Model as ResourceModel,
    };

    pub use super::profile::{
        ActiveModel as ProfileActiveModel, Column as ProfileColumn, Entity as Profile,
        Model as ProfileModel,
    };
    pub use super::recent_activity::{
        ActiveModel as RecentActivityActiveModel, Column as RecentActivityColumn,
        Entity as RecentActivity, Model as RecentActivityModel,
    };
    pub use super::user_badge::{
        ActiveModel as UserBadgeActiveModel, Column as UserBadgeColumn, Entity as UserBadge,
        Model as UserBadgeModel,
    };
    pub use super::user_module_progress::{
        ActiveModel as UserModuleProgressActiveModel, Column as UserModuleProgressColumn,
        Entity as UserModuleProgress, Model as UserModuleProgressModel,
    };
    pub use super::user_question_progress::{
        ActiveModel as UserQuestionProgressActiveModel, Column as UserQuestionProgressColumn,
        Entity as UserQuestionProgress, Model as UserQuestionProgressModel, QuestionType,
    };
    pub use super::user_quiz_attempt::{
        ActiveModel as UserQuizAttemptActiveModel, Column as UserQuizAttemptColumn,
        Entity as UserQuizAttempt, Model as UserQuizAttemptModel,
    };

    pub use sea_orm::{
        ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, Database,
        DatabaseConnection, DbConn, DbErr, EntityTrait, ModelTrait, NotSet, PaginatorTrait,
        QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, Unchanged,
    };
}
