use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000011_create_user_question_progress_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserQuestionProgress::Table)
                    .col(
                        ColumnDef::new(UserQuestionProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserQuestionProgress::UserId).string().not_null())
                    .col(ColumnDef::new(UserQuestionProgress::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(UserQuestionProgress::QuestionId).uuid().not_null())
                    .col(ColumnDef::new(UserQuestionProgress::QuestionType).string().not_null())
                    .col(ColumnDef::new(UserQuestionProgress::Completed).boolean().not_null())
                    .col(ColumnDef::new(UserQuestionProgress::Correct).boolean().null())
                    .col(ColumnDef::new(UserQuestionProgress::AnsweredAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_question_progress_by_user_id")
                    .table(UserQuestionProgress::Table)
                    .col(UserQuestionProgress::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_question_progress_by_module_id")
                    .table(UserQuestionProgress::Table)
                    .col(UserQuestionProgress::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_question_progress_by_user_id_and_module_id")
                    .table(UserQuestionProgress::Table)
                    .col(UserQuestionProgress::UserId)
                    .col(UserQuestionProgress::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_question_progress_by_question_id")
                    .table(UserQuestionProgress::Table)
                    .col(UserQuestionProgress::QuestionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserQuestionProgress::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserQuestionProgress {
    Table,
    Id,
    UserId,
    ModuleId,
    QuestionId,
    QuestionType,
    Completed,
    Correct,
    AnsweredAt,
}
