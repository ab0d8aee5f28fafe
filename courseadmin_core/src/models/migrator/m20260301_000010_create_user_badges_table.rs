use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260301_000010_create_user_badges_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserBadges::Table)
                    .col(
                        ColumnDef::new(UserBadges::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserBadges::UserId).string().not_null())
                    .col(ColumnDef::new(UserBadges::BadgeId).uuid().not_null())
                    .col(ColumnDef::new(UserBadges::EarnedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_badges_by_user_id")
                    .table(UserBadges::Table)
                    .col(UserBadges::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_badges_by_badge_id")
                    .table(UserBadges::Table)
                    .col(UserBadges::BadgeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_badges_by_user_id_and_badge_id")
                    .table(UserBadges::Table)
                    .col(UserBadges::UserId)
                    .col(UserBadges::BadgeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserBadges::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserBadges {
    Table,
    Id,
    UserId,
    BadgeId,
    EarnedAt,
}
