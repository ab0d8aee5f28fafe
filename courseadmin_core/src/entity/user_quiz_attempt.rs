use crate::ids::{QuizAttemptId, QuizId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_quiz_attempts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: QuizAttemptId,
    pub user_id: String,
    pub quiz_id: QuizId,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub passed: bool,
    pub completed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
