use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000002_create_flashcards_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key on module_id: children outlive their module.
        manager
            .create_table(
                Table::create()
                    .table(Flashcards::Table)
                    .col(
                        ColumnDef::new(Flashcards::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Flashcards::ModuleId).uuid().not_null())
                    .col(ColumnDef::new(Flashcards::Question).text().not_null())
                    .col(ColumnDef::new(Flashcards::Answer).text().not_null())
                    .col(ColumnDef::new(Flashcards::Order).integer().not_null())
                    .col(ColumnDef::new(Flashcards::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flashcards_by_module_id")
                    .table(Flashcards::Table)
                    .col(Flashcards::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flashcards_by_module_id_and_order")
                    .table(Flashcards::Table)
                    .col(Flashcards::ModuleId)
                    .col(Flashcards::Order)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flashcards::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Flashcards {
    Table,
    Id,
    ModuleId,
    Question,
    Answer,
    Order,
    CreatedAt,
}
