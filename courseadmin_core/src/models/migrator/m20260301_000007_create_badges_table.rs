use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000007_create_badges_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Badges::Table)
                    .col(
                        ColumnDef::new(Badges::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Badges::Name).string().not_null())
                    .col(ColumnDef::new(Badges::Description).text().not_null())
                    .col(ColumnDef::new(Badges::Icon).string().null())
                    .col(ColumnDef::new(Badges::Requirement).string().not_null())
                    .col(ColumnDef::new(Badges::RequiredModules).integer().null())
                    .col(ColumnDef::new(Badges::RequiredPoints).integer().null())
                    .col(ColumnDef::new(Badges::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Badges::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Badges {
    Table,
    Id,
    Name,
    Description,
    Icon,
    Requirement,
    RequiredModules,
    RequiredPoints,
    CreatedAt,
}
