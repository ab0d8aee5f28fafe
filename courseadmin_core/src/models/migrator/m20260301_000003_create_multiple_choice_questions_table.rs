use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000003_create_multiple_choice_questions_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MultipleChoiceQuestions::Table)
                    .col(
                        ColumnDef::new(MultipleChoiceQuestions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MultipleChoiceQuestions::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(MultipleChoiceQuestions::Question).text().not_null())
                    .col(ColumnDef::new(MultipleChoiceQuestions::Options).json().not_null())
                    .col(ColumnDef::new(MultipleChoiceQuestions::CorrectAnswer).integer().not_null())
                    .col(ColumnDef::new(MultipleChoiceQuestions::Explanation).text().null())
                    .col(ColumnDef::new(MultipleChoiceQuestions::Order).integer().not_null())
                    .col(ColumnDef::new(MultipleChoiceQuestions::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_multiple_choice_questions_by_module_id")
                    .table(MultipleChoiceQuestions::Table)
                    .col(MultipleChoiceQuestions::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_multiple_choice_questions_by_module_id_and_order")
                    .table(MultipleChoiceQuestions::Table)
                    .col(MultipleChoiceQuestions::ModuleId)
                    .col(MultipleChoiceQuestions::Order)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MultipleChoiceQuestions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum MultipleChoiceQuestions {
    Table,
    Id,
    ModuleId,
    Question,
    Options,
    CorrectAnswer,
    Explanation,
    Order,
    CreatedAt,
}
