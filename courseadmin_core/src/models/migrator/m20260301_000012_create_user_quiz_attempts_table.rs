use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000012_create_user_quiz_attempts_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserQuizAttempts::Table)
                    .col(
                        ColumnDef::new(UserQuizAttempts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserQuizAttempts::UserId).string().not_null())
                    .col(ColumnDef::new(UserQuizAttempts::QuizId).uuid().not_null())
                    .col(ColumnDef::new(UserQuizAttempts::Score).integer().not_null())
                    .col(ColumnDef::new(UserQuizAttempts::TotalQuestions).integer().not_null())
                    .col(ColumnDef::new(UserQuizAttempts::CorrectAnswers).integer().not_null())
                    .col(ColumnDef::new(UserQuizAttempts::Passed).boolean().not_null())
                    .col(ColumnDef::new(UserQuizAttempts::CompletedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_quiz_attempts_by_user_id")
                    .table(UserQuizAttempts::Table)
                    .col(UserQuizAttempts::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_quiz_attempts_by_quiz_id")
                    .table(UserQuizAttempts::Table)
                    .col(UserQuizAttempts::QuizId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_quiz_attempts_by_user_id_and_quiz_id")
                    .table(UserQuizAttempts::Table)
                    .col(UserQuizAttempts::UserId)
                    .col(UserQuizAttempts::QuizId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserQuizAttempts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserQuizAttempts {
    Table,
    Id,
    UserId,
    QuizId,
    Score,
    TotalQuestions,
    CorrectAnswers,
    Passed,
    CompletedAt,
}
