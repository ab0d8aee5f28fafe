use sea_orm_migration::prelude::*;

mod m20260301_000001_create_modules_table;
mod m20260301_000002_create_flashcards_table;
mod m20260301_000003_create_multiple_choice_questions_table;
mod m20260301_000004_create_quizzes_table;
mod m20260301_000005_create_quiz_questions_table;
mod m20260301_000006_create_resources_table;
mod m20260301_000007_create_badges_table;
mod m20260301_000008_create_profile_table;
mod m20260301_000009_create_user_module_progress_table;
mod m20260301_000010_create_user_badges_table;
mod m20260301_000011_create_user_question_progress_table;
mod m20260301_000012_create_user_quiz_attempts_table;
mod m20260301_000013_create_recent_activity_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_modules_table::Migration),
            Box::new(m20260301_000002_create_flashcards_table::Migration),
            Box::new(m20260301_000003_create_multiple_choice_questions_table::Migration),
            Box::new(m20260301_000004_create_quizzes_table::Migration),
            Box::new(m20260301_000005_create_quiz_questions_table::Migration),
            Box::new(m20260301_000006_create_resources_table::Migration),
            Box::new(m20260301_000007_create_badges_table::Migration),
            Box::new(m20260301_000008_create_profile_table::Migration),
            Box::new(m20260301_000009_create_user_module_progress_table::Migration),
            Box::new(m20260301_000010_create_user_badges_table::Migration),
            Box::new(m20260301_000011_create_user_question_progress_table::Migration),
            Box::new(m20260301_000012_create_user_quiz_attempts_table::Migration),
            Box::new(m20260301_000013_create_recent_activity_table::Migration),
        ]
    }
}

#[cfg(test)]
use sea_orm::{Database, DbErr};

#[tokio::test]
async fn test_migrations_okay() -> Result<(), DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let schema_manager = SchemaManager::new(&db);

    Migrator::refresh(&db).await?;

    for table in [
        "modules",
        "flashcards",
        "multiple_choice_questions",
        "quizzes",
        "quiz_questions",
        "resources",
        "badges",
        "profile",
        "user_module_progress",
        "user_badges",
        "user_question_progress",
        "user_quiz_attempts",
        "recent_activity",
    ] {
        assert!(schema_manager.has_table(table).await?, "missing table {table}");
    }

    assert!(schema_manager.has_index("flashcards", "idx_flashcards_by_module_id_and_order").await?);
    assert!(schema_manager.has_index("resources", "idx_resources_by_type").await?);

    Ok(())
}

#[tokio::test]
async fn test_migrations_roll_back() -> Result<(), DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let schema_manager = SchemaManager::new(&db);

    Migrator::up(&db, None).await?;
    Migrator::down(&db, None).await?;

    assert!(!schema_manager.has_table("modules").await?);
    assert!(!schema_manager.has_table("recent_activity").await?);

    Ok(())
}
