use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::{
    entity::prelude::ModuleStatus,
    ids::ModuleId,
    models::migrator::Migrator,
    service::{modules::NewModule, quizzes::NewQuiz},
};

/// Fresh in-memory database with every migration applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// A published module with only the required fields filled in.
pub fn new_module(title: &str, order: i32) -> NewModule {
    NewModule {
        title: title.to_string(),
        description: format!("About {title}"),
        content: format!("# {title}"),
        image_url: None,
        status: ModuleStatus::Published,
        order,
        duration: None,
        category: None,
        badge_icon: None,
        badge_text: None,
        is_published: true,
    }
}

/// Passing score 70, no time limit.
pub fn new_quiz(module_id: ModuleId, title: &str) -> NewQuiz {
    NewQuiz {
        module_id,
        title: title.to_string(),
        description: None,
        passing_score: 70,
        time_limit: None,
    }
}
