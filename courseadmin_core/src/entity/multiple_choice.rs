use crate::{
    choices::AnswerOptions,
    ids::{ModuleId, MultipleChoiceId},
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "multiple_choice_questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: MultipleChoiceId,
    pub module_id: ModuleId,
    pub question: String,
    #[sea_orm(column_type = "Json")]
    pub options: AnswerOptions,
    /// Zero-based index into `options`. Not bounds checked.
    pub correct_answer: i32,
    pub explanation: Option<String>,
    pub order: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::module::Entity",
        from = "Column::ModuleId",
        to = "super::module::Column::Id"
    )]
    Module,
}

impl Related<super::module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
