use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000001_create_modules_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .col(
                        ColumnDef::new(Modules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Modules::Title).string().not_null())
                    .col(ColumnDef::new(Modules::Description).string().not_null())
                    .col(ColumnDef::new(Modules::Content).text().not_null())
                    .col(ColumnDef::new(Modules::ImageUrl).string().null())
                    .col(ColumnDef::new(Modules::Status).string().not_null())
                    .col(ColumnDef::new(Modules::Order).integer().not_null())
                    .col(ColumnDef::new(Modules::Duration).integer().null())
                    .col(ColumnDef::new(Modules::Category).string().null())
                    .col(ColumnDef::new(Modules::BadgeIcon).string().null())
                    .col(ColumnDef::new(Modules::BadgeText).string().null())
                    .col(ColumnDef::new(Modules::IsPublished).boolean().not_null())
                    .col(ColumnDef::new(Modules::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_modules_by_order")
                    .table(Modules::Table)
                    .col(Modules::Order)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_modules_by_published")
                    .table(Modules::Table)
                    .col(Modules::IsPublished)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_modules_by_status")
                    .table(Modules::Table)
                    .col(Modules::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Modules {
    Table,
    Id,
    Title,
    Description,
    Content,
    ImageUrl,
    Status,
    Order,
    Duration,
    Category,
    BadgeIcon,
    BadgeText,
    IsPublished,
    CreatedAt,
}
