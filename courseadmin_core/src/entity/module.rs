use std::{fmt, str::FromStr};

use crate::{error::ValidationError, ids::ModuleId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "coming_soon")]
    ComingSoon,
    #[sea_orm(string_value = "locked")]
    Locked,
}

impl ModuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::ComingSoon => "coming_soon",
            Self::Locked => "locked",
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(Self::Published),
            "coming_soon" => Ok(Self::ComingSoon),
            "locked" => Ok(Self::Locked),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "modules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub status: ModuleStatus,
    pub order: i32,
    /// Minutes.
    pub duration: Option<i32>,
    pub category: Option<String>,
    pub badge_icon: Option<String>,
    pub badge_text: Option<String>,
    pub is_published: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flashcard::Entity")]
    Flashcard,
    #[sea_orm(has_many = "super::multiple_choice::Entity")]
    MultipleChoice,
    #[sea_orm(has_many = "super::quiz::Entity")]
    Quiz,
}

impl Related<super::flashcard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flashcard.def()
    }
}

impl Related<super::multiple_choice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MultipleChoice.def()
    }
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
