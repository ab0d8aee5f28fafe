use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000008_create_profile_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .col(
                        ColumnDef::new(Profile::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profile::UserId).string().not_null())
                    .col(ColumnDef::new(Profile::Name).string().not_null())
                    .col(ColumnDef::new(Profile::Email).string().not_null())
                    .col(ColumnDef::new(Profile::Points).big_integer().not_null())
                    .col(ColumnDef::new(Profile::Rank).string().null())
                    .col(ColumnDef::new(Profile::ModulesCompleted).integer().not_null())
                    .col(ColumnDef::new(Profile::TotalModules).integer().not_null())
                    .col(ColumnDef::new(Profile::BadgesEarned).integer().not_null())
                    .col(ColumnDef::new(Profile::ProgressPercentage).double().not_null())
                    .col(ColumnDef::new(Profile::LastActive).big_integer().not_null())
                    .col(ColumnDef::new(Profile::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_profile_by_user_id")
                    .table(Profile::Table)
                    .col(Profile::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_profile_by_points")
                    .table(Profile::Table)
                    .col(Profile::Points)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Profile {
    Table,
    Id,
    UserId,
    Name,
    Email,
    Points,
    Rank,
    ModulesCompleted,
    TotalModules,
    BadgesEarned,
    ProgressPercentage,
    LastActive,
    CreatedAt,
}
