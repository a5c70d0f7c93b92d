//! Create ratings table

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_horses::Horses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ratings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ratings::HorseId).integer().not_null())
                    .col(ColumnDef::new(Ratings::Value).integer().not_null())
                    .col(
                        ColumnDef::new(Ratings::RatingDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Ratings::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_horse")
                            .from(Ratings::Table, Ratings::HorseId)
                            .to(Horses::Table, Horses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_horse")
                    .table(Ratings::Table)
                    .col(Ratings::HorseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Ratings {
    Table,
    Id,
    HorseId,
    Value,
    RatingDate,
    Description,
}
