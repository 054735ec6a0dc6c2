use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

use crate::SONGS_ALBUM_FK;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Already declared inline on SQLite
        if manager.get_database_backend() == DatabaseBackend::Sqlite {
            return Ok(());
        }

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(SONGS_ALBUM_FK)
                    .from("songs", "albumId")
                    .to("albums", "id")
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() == DatabaseBackend::Sqlite {
            return Ok(());
        }

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(SONGS_ALBUM_FK)
                    .table("songs")
                    .to_owned(),
            )
            .await
    }
}
