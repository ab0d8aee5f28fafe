use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000005_create_quiz_questions_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key on quiz_id, same as the module children.
        manager
            .create_table(
                Table::create()
                    .table(QuizQuestions::Table)
                    .col(
                        ColumnDef::new(QuizQuestions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizQuestions::QuizId).uuid().not_null())
                    .col(ColumnDef::new(QuizQuestions::Question).text().not_null())
                    .col(ColumnDef::new(QuizQuestions::Options).json().not_null())
                    .col(ColumnDef::new(QuizQuestions::CorrectAnswer).integer().not_null())
                    .col(ColumnDef::new(QuizQuestions::Points).integer().not_null())
                    .col(ColumnDef::new(QuizQuestions::Order).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quiz_questions_by_quiz_id")
                    .table(QuizQuestions::Table)
                    .col(QuizQuestions::QuizId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quiz_questions_by_order")
                    .table(QuizQuestions::Table)
                    .col(QuizQuestions::Order)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuizQuestions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum QuizQuestions {
    Table,
    Id,
    QuizId,
    Question,
    Options,
    CorrectAnswer,
    Points,
    Order,
}
