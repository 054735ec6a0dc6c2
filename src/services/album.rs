use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Select, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::database::Database;
use crate::entities;
use crate::id::generate_id;
use crate::services::mapping::{AlbumSongRow, map_album_songs};
use crate::services::{ServiceError, ServiceResult};

/// An album together with the songs that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub songs: Vec<AlbumSong>,
}

/// The part of a song shown inside its album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumSong {
    pub id: String,
    pub title: String,
    pub performer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAlbum {
    pub name: String,
    pub year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumUpdate {
    pub name: String,
    pub year: i32,
}

pub struct AlbumService {
    db: Arc<Database>,
}

impl AlbumService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// `albums LEFT JOIN songs`, projected onto [`AlbumSongRow`]
    fn album_song_rows() -> Select<entities::album::Entity> {
        entities::album::Entity::find()
            .select_only()
            .column(entities::album::Column::Id)
            .column(entities::album::Column::Name)
            .column(entities::album::Column::Year)
            .column_as(entities::song::Column::Id, "song_id")
            .column_as(entities::song::Column::Title, "song_title")
            .column_as(entities::song::Column::Performer, "song_performer")
            .left_join(entities::song::Entity)
    }

    #[instrument(skip(self))]
    pub async fn get_albums(&self) -> ServiceResult<Vec<Album>> {
        let rows = Self::album_song_rows()
            .into_model::<AlbumSongRow>()
            .all(&self.db.conn)
            .await?;

        log::debug!("Fetched {} album rows", rows.len());
        Ok(map_album_songs(rows))
    }

    #[instrument(skip(self, album))]
    pub async fn add_album(&self, album: NewAlbum) -> ServiceResult<String> {
        let model = entities::album::ActiveModel {
            id: Set(generate_id("album")),
            name: Set(album.name),
            year: Set(album.year),
            ..Default::default()
        };

        let id = entities::album::Entity::insert(model)
            .exec(&self.db.conn)
            .await?
            .last_insert_id;

        if id.is_empty() {
            return Err(ServiceError::InvariantViolation(
                "Album could not be added".to_string(),
            ));
        }

        log::info!("Album created (ID: {})", id);
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get_album_by_id(&self, id: &str) -> ServiceResult<Album> {
        let rows = Self::album_song_rows()
            .filter(entities::album::Column::Id.eq(id))
            .into_model::<AlbumSongRow>()
            .all(&self.db.conn)
            .await?;

        map_album_songs(rows)
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound("Album not found".to_string()))
    }

    #[instrument(skip(self, album))]
    pub async fn edit_album_by_id(&self, id: &str, album: AlbumUpdate) -> ServiceResult<String> {
        let result = entities::album::Entity::update_many()
            .set(entities::album::ActiveModel {
                name: Set(album.name),
                year: Set(album.year),
                ..Default::default()
            })
            .filter(entities::album::Column::Id.eq(id))
            .exec(&self.db.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(
                "Failed to update album. Id not found".to_string(),
            ));
        }

        log::info!("Album updated (ID: {})", id);
        Ok(id.to_string())
    }

    /// Songs of the album go with it through `ON DELETE CASCADE`
    #[instrument(skip(self))]
    pub async fn delete_album_by_id(&self, id: &str) -> ServiceResult<String> {
        let result = entities::album::Entity::delete_by_id(id)
            .exec(&self.db.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(
                "Failed to delete album. Id not found".to_string(),
            ));
        }

        log::info!("Album deleted (ID: {})", id);
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::song::{NewSong, SongService};
    use crate::test_utils::test_db;

    fn viva() -> NewAlbum {
        NewAlbum {
            name: "Viva".into(),
            year: 2020,
        }
    }

    fn song(title: &str, album_id: Option<&str>) -> NewSong {
        NewSong {
            title: title.into(),
            year: 2008,
            performer: "Coldplay".into(),
            genre: "Rock".into(),
            duration: 241,
            album_id: album_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_add_then_get_album() {
        let db = test_db().await;
        let service = AlbumService::new(db);

        let id = service.add_album(viva()).await.unwrap();
        assert!(id.starts_with("album-"));
        assert_eq!(id.len(), "album-".len() + 16);

        let album = service.get_album_by_id(&id).await.unwrap();
        assert_eq!(
            album,
            Album {
                id,
                name: "Viva".into(),
                year: 2020,
                songs: vec![],
            }
        );
    }

    #[tokio::test]
    async fn test_get_album_not_found() {
        let db = test_db().await;
        let service = AlbumService::new(db);

        let result = service.get_album_by_id("album-missing").await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_album_with_songs() {
        let db = test_db().await;
        let albums = AlbumService::new(db.clone());
        let songs = SongService::new(db);

        let album_id = albums.add_album(viva()).await.unwrap();
        let first = songs.add_song(song("Viva la Vida", Some(&album_id))).await.unwrap();
        let second = songs.add_song(song("Violet Hill", Some(&album_id))).await.unwrap();
        songs.add_song(song("Yellow", None)).await.unwrap();

        let album = albums.get_album_by_id(&album_id).await.unwrap();

        let mut ids: Vec<_> = album.songs.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(ids, expected);
        assert!(album.songs.iter().all(|s| s.performer == "Coldplay"));
    }

    #[tokio::test]
    async fn test_get_albums_includes_albums_without_songs() {
        let db = test_db().await;
        let albums = AlbumService::new(db.clone());
        let songs = SongService::new(db);

        let with_songs = albums.add_album(viva()).await.unwrap();
        let without_songs = albums
            .add_album(NewAlbum {
                name: "Parachutes".into(),
                year: 2000,
            })
            .await
            .unwrap();
        songs.add_song(song("Lost!", Some(&with_songs))).await.unwrap();
        songs.add_song(song("42", Some(&with_songs))).await.unwrap();

        let all = albums.get_albums().await.unwrap();
        assert_eq!(all.len(), 2);

        let find = |id: &str| all.iter().find(|a| a.id == id).unwrap();
        assert_eq!(find(&with_songs).songs.len(), 2);
        assert!(find(&without_songs).songs.is_empty());
        assert_eq!(find(&without_songs).name, "Parachutes");
    }

    #[tokio::test]
    async fn test_get_albums_empty() {
        let db = test_db().await;
        let service = AlbumService::new(db);

        assert!(service.get_albums().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_album() {
        let db = test_db().await;
        let service = AlbumService::new(db);

        let id = service.add_album(viva()).await.unwrap();
        let edited = service
            .edit_album_by_id(
                &id,
                AlbumUpdate {
                    name: "Viva la Vida".into(),
                    year: 2008,
                },
            )
            .await
            .unwrap();
        assert_eq!(edited, id);

        let album = service.get_album_by_id(&id).await.unwrap();
        assert_eq!(album.name, "Viva la Vida");
        assert_eq!(album.year, 2008);
    }

    #[tokio::test]
    async fn test_edit_album_not_found() {
        let db = test_db().await;
        let service = AlbumService::new(db);

        let result = service
            .edit_album_by_id(
                "album-missing",
                AlbumUpdate {
                    name: "Ghost Stories".into(),
                    year: 2014,
                },
            )
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_album() {
        let db = test_db().await;
        let service = AlbumService::new(db);

        let id = service.add_album(viva()).await.unwrap();
        assert_eq!(service.delete_album_by_id(&id).await.unwrap(), id);

        let result = service.get_album_by_id(&id).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_album_not_found() {
        let db = test_db().await;
        let service = AlbumService::new(db);

        let result = service.delete_album_by_id("album-missing").await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_album_cascades_to_songs() {
        let db = test_db().await;
        let albums = AlbumService::new(db.clone());
        let songs = SongService::new(db);

        let album_id = albums.add_album(viva()).await.unwrap();
        let linked = songs.add_song(song("Viva la Vida", Some(&album_id))).await.unwrap();
        let loose = songs.add_song(song("Yellow", None)).await.unwrap();

        albums.delete_album_by_id(&album_id).await.unwrap();

        let result = songs.get_song_by_id(&linked).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert_eq!(songs.get_song_by_id(&loose).await.unwrap().title, "Yellow");
    }
}
