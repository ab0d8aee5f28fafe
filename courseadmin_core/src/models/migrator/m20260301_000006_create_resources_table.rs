use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000006_create_resources_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .col(
                        ColumnDef::new(Resources::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::Title).string().not_null())
                    .col(ColumnDef::new(Resources::Description).text().null())
                    .col(ColumnDef::new(Resources::Url).string().null())
                    .col(ColumnDef::new(Resources::Type).string().not_null())
                    .col(ColumnDef::new(Resources::Category).string().null())
                    .col(ColumnDef::new(Resources::Order).integer().not_null())
                    .col(ColumnDef::new(Resources::IsActive).boolean().not_null())
                    .col(ColumnDef::new(Resources::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_by_order")
                    .table(Resources::Table)
                    .col(Resources::Order)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_by_type")
                    .table(Resources::Table)
                    .col(Resources::Type)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_by_active")
                    .table(Resources::Table)
                    .col(Resources::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Resources {
    Table,
    Id,
    Title,
    Description,
    Url,
    Type,
    Category,
    Order,
    IsActive,
    CreatedAt,
}
