use crate::ids::ProfileId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ProfileId,
    /// External identity provider subject.
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub points: i64,
    pub rank: Option<String>,
    pub modules_completed: i32,
    pub total_modules: i32,
    pub badges_earned: i32,
    pub progress_percentage: f64,
    pub last_active: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
