use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

use crate::SONGS_ALBUM_FK;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create()
            .table("songs")
            .if_not_exists()
            .col(
                ColumnDef::new("id")
                    .string_len(50)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new("albumId").string_len(50).null())
            .col(ColumnDef::new("title").text().not_null())
            .col(ColumnDef::new("year").integer().not_null())
            .col(ColumnDef::new("performer").text().not_null())
            .col(ColumnDef::new("genre").text().not_null())
            .col(ColumnDef::new("duration").integer().not_null())
            .to_owned();

        // SQLite can't add constraints to an existing table, so the foreign key
        // the next migration adds elsewhere has to be declared up front here.
        if manager.get_database_backend() == DatabaseBackend::Sqlite {
            table.foreign_key(
                ForeignKey::create()
                    .name(SONGS_ALBUM_FK)
                    .from("songs", "albumId")
                    .to("albums", "id")
                    .on_delete(ForeignKeyAction::Cascade),
            );
        }

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table("songs").to_owned())
            .await
    }
}
