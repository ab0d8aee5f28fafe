use crate::{
    choices::AnswerOptions,
    ids::{QuizId, QuizQuestionId},
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// No created_at: quiz questions are ordered by `order` then id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: QuizQuestionId,
    pub quiz_id: QuizId,
    pub question: String,
    #[sea_orm(column_type = "Json")]
    pub options: AnswerOptions,
    pub correct_answer: i32,
    pub points: i32,
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz::Entity",
        from = "Column::QuizId",
        to = "super::quiz::Column::Id"
    )]
    Quiz,
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
