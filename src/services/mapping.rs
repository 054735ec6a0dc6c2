use std::collections::HashMap;

use sea_orm::FromQueryResult;

use crate::services::album::{Album, AlbumSong};

/// One row of `albums LEFT JOIN songs`. The song columns are all `None`
/// when the album has no songs.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct AlbumSongRow {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub song_id: Option<String>,
    pub song_title: Option<String>,
    pub song_performer: Option<String>,
}

/// Fold joined rows into albums with nested songs.
///
/// Albums come out in the order their id is first seen, songs in row order.
/// Album columns are read from the first row of each album only.
pub fn map_album_songs(rows: impl IntoIterator<Item = AlbumSongRow>) -> Vec<Album> {
    let mut albums: Vec<Album> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let index = match index_by_id.get(&row.id) {
            Some(&index) => index,
            None => {
                index_by_id.insert(row.id.clone(), albums.len());
                albums.push(Album {
                    id: row.id,
                    name: row.name,
                    year: row.year,
                    songs: Vec::new(),
                });
                albums.len() - 1
            }
        };

        if let Some(song_id) = row.song_id {
            albums[index].songs.push(AlbumSong {
                id: song_id,
                title: row.song_title.unwrap_or_default(),
                performer: row.song_performer.unwrap_or_default(),
            });
        }
    }

    albums
}
