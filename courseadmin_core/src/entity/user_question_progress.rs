use crate::ids::{ModuleId, QuestionProgressId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[sea_orm(string_value = "flashcard")]
    Flashcard,
    #[sea_orm(string_value = "multiple_choice")]
    MultipleChoice,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_question_progress")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: QuestionProgressId,
    pub user_id: String,
    pub module_id: ModuleId,
    /// A `FlashcardId` or `MultipleChoiceId`, depending on `question_type`.
    pub question_id: Uuid,
    pub question_type: QuestionType,
    pub completed: bool,
    pub correct: Option<bool>,
    pub answered_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
