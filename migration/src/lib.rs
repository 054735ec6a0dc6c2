pub use sea_orm_migration::prelude::*;

mod m20230518_041500_create_table_albums;
mod m20230518_042659_create_table_songs;
mod m20230518_042700_alter_table_songs;

/// Name of the foreign key tying `songs."albumId"` to `albums.id`.
pub const SONGS_ALBUM_FK: &str = "fk_songs.album_id_albums.id";

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230518_041500_create_table_albums::Migration),
            Box::new(m20230518_042659_create_table_songs::Migration),
            Box::new(m20230518_042700_alter_table_songs::Migration),
        ]
    }
}
