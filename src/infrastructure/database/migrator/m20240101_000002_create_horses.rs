//! Create horses table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_stables::Stables;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Horses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Horses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Horses::StableId).integer().not_null())
                    .col(ColumnDef::new(Horses::Name).string().not_null())
                    .col(ColumnDef::new(Horses::Breed).string().not_null())
                    .col(ColumnDef::new(Horses::NameKey).string().not_null())
                    .col(ColumnDef::new(Horses::BreedKey).string().not_null())
                    .col(ColumnDef::new(Horses::HorseType).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Horses::Status)
                            .string_len(20)
                            .not_null()
                            .default("ZDROWY"),
                    )
                    .col(ColumnDef::new(Horses::Age).integer().not_null())
                    .col(ColumnDef::new(Horses::Price).double().not_null())
                    .col(ColumnDef::new(Horses::WeightKg).double().not_null())
                    .col(ColumnDef::new(Horses::HeightCm).double().not_null())
                    .col(
                        ColumnDef::new(Horses::MicrochipId)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Horses::AcquisitionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_horses_stable")
                            .from(Horses::Table, Horses::StableId)
                            .to(Stables::Table, Stables::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_horses_stable")
                    .table(Horses::Table)
                    .col(Horses::StableId)
                    .to_owned(),
            )
            .await?;

        // Per-stable duplicate rule: lowercased name and breed plus age
        manager
            .create_index(
                Index::create()
                    .name("idx_horses_duplicate_key")
                    .table(Horses::Table)
                    .col(Horses::StableId)
                    .col(Horses::NameKey)
                    .col(Horses::BreedKey)
                    .col(Horses::Age)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Horses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Horses {
    Table,
    Id,
    StableId,
    Name,
    Breed,
    NameKey,
    BreedKey,
    HorseType,
    Status,
    Age,
    Price,
    WeightKg,
    HeightCm,
    MicrochipId,
    AcquisitionDate,
}
