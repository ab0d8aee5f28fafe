use crate::ids::{ModuleId, ModuleProgressId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_module_progress")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ModuleProgressId,
    pub user_id: String,
    pub module_id: ModuleId,
    pub completed: bool,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub progress: f64,
    pub current_question_index: i32,
    pub flashcards_completed: i32,
    pub multiple_choice_completed: i32,
    pub total_flashcards: i32,
    pub total_multiple_choice: i32,
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

impl ActiveModelBehavior for ActiveModel {}
