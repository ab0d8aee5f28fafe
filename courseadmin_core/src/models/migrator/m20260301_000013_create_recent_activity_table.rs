use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000013_create_recent_activity_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecentActivity::Table)
                    .col(
                        ColumnDef::new(RecentActivity::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecentActivity::UserId).string().not_null())
                    .col(ColumnDef::new(RecentActivity::ActivityType).string().not_null())
                    .col(ColumnDef::new(RecentActivity::ModuleId).uuid().null())
                    .col(ColumnDef::new(RecentActivity::BadgeId).uuid().null())
                    .col(ColumnDef::new(RecentActivity::Description).text().not_null())
                    .col(ColumnDef::new(RecentActivity::Timestamp).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recent_activity_by_user_id")
                    .table(RecentActivity::Table)
                    .col(RecentActivity::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recent_activity_by_timestamp")
                    .table(RecentActivity::Table)
                    .col(RecentActivity::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recent_activity_by_user_id_and_timestamp")
                    .table(RecentActivity::Table)
                    .col(RecentActivity::UserId)
                    .col(RecentActivity::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecentActivity::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RecentActivity {
    Table,
    Id,
    UserId,
    ActivityType,
    ModuleId,
    BadgeId,
    Description,
    Timestamp,
}
