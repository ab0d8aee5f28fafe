use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000009_create_user_module_progress_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserModuleProgress::Table)
                    .col(
                        ColumnDef::new(UserModuleProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserModuleProgress::UserId).string().not_null())
                    .col(ColumnDef::new(UserModuleProgress::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(UserModuleProgress::Completed).boolean().not_null())
                    .col(ColumnDef::new(UserModuleProgress::StartedAt).big_integer().null())
                    .col(ColumnDef::new(UserModuleProgress::CompletedAt).big_integer().null())
                    .col(ColumnDef::new(UserModuleProgress::Progress).double().not_null())
                    .col(ColumnDef::new(UserModuleProgress::CurrentQuestionIndex).integer().not_null())
                    .col(ColumnDef::new(UserModuleProgress::FlashcardsCompleted).integer().not_null())
                    .col(ColumnDef::new(UserModuleProgress::MultipleChoiceCompleted).integer().not_null())
                    .col(ColumnDef::new(UserModuleProgress::TotalFlashcards).integer().not_null())
                    .col(ColumnDef::new(UserModuleProgress::TotalMultipleChoice).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_module_progress_by_user_id")
                    .table(UserModuleProgress::Table)
                    .col(UserModuleProgress::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_module_progress_by_module_id")
                    .table(UserModuleProgress::Table)
                    .col(UserModuleProgress::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_module_progress_by_user_id_and_module_id")
                    .table(UserModuleProgress::Table)
                    .col(UserModuleProgress::UserId)
                    .col(UserModuleProgress::ModuleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserModuleProgress::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserModuleProgress {
    Table,
    Id,
    UserId,
    ModuleId,
    Completed,
    StartedAt,
    CompletedAt,
    Progress,
    CurrentQuestionIndex,
    FlashcardsCompleted,
    MultipleChoiceCompleted,
    TotalFlashcards,
    TotalMultipleChoice,
}
