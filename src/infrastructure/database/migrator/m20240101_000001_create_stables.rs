//! Create stables table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stables::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stables::Name).string().not_null())
                    .col(ColumnDef::new(Stables::NameKey).string().not_null())
                    .col(ColumnDef::new(Stables::MaxCapacity).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // name_key is lowercased in Rust; SQLite's lower() and NOCASE fold ASCII only
        manager
            .create_index(
                Index::create()
                    .name("idx_stables_name_key")
                    .table(Stables::Table)
                    .col(Stables::NameKey)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stables::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Stables {
    Table,
    Id,
    Name,
    NameKey,
    MaxCapacity,
}
