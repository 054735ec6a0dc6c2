use std::sync::Arc;

use sea_orm::sea_query::{Expr, Func, IntoCondition, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::database::Database;
use crate::entities;
use crate::id::generate_id;
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: String,
    pub duration: i32,
    pub album_id: Option<String>,
}

impl From<entities::song::Model> for Song {
    fn from(model: entities::song::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year: model.year,
            performer: model.performer,
            genre: model.genre,
            duration: model.duration,
            album_id: model.album_id,
        }
    }
}

/// Listing shape of a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct SongSummary {
    pub id: String,
    pub title: String,
    pub performer: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: String,
    pub duration: i32,
    #[serde(default)]
    pub album_id: Option<String>,
}

/// Full replacement of every song column except the id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongUpdate {
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: String,
    pub duration: i32,
    #[serde(default)]
    pub album_id: Option<String>,
}

/// Case-insensitive substring filters, combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongFilter {
    pub title: Option<String>,
    pub performer: Option<String>,
}

/// Escape `LIKE` metacharacters so `needle` only ever matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(column) LIKE '%needle%' ESCAPE '\'`
///
/// SQLite's `LOWER` only folds ASCII, so non-ASCII case-insensitivity
/// holds on PostgreSQL only.
fn contains_ignore_case(column: entities::song::Column, needle: &str) -> impl IntoCondition {
    use sea_orm::sea_query::ExprTrait;

    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Func::lower(Expr::col(column)).like(LikeExpr::new(pattern).escape('\\'))
}

pub struct SongService {
    db: Arc<Database>,
}

impl SongService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, song))]
    pub async fn add_song(&self, song: NewSong) -> ServiceResult<String> {
        let model = entities::song::ActiveModel {
            id: Set(generate_id("song")),
            album_id: Set(song.album_id),
            title: Set(song.title),
            year: Set(song.year),
            performer: Set(song.performer),
            genre: Set(song.genre),
            duration: Set(song.duration),
            ..Default::default()
        };

        let id = entities::song::Entity::insert(model)
            .exec(&self.db.conn)
            .await?
            .last_insert_id;

        if id.is_empty() {
            return Err(ServiceError::InvariantViolation(
                "Song could not be added".to_string(),
            ));
        }

        log::info!("Song created (ID: {})", id);
        Ok(id)
    }

    #[instrument(skip(self, filter))]
    pub async fn get_songs(&self, filter: SongFilter) -> ServiceResult<Vec<SongSummary>> {
        let mut query = entities::song::Entity::find()
            .select_only()
            .column(entities::song::Column::Id)
            .column(entities::song::Column::Title)
            .column(entities::song::Column::Performer);

        if let Some(title) = filter.title.filter(|t| !t.is_empty()) {
            query = query.filter(contains_ignore_case(entities::song::Column::Title, &title));
        }

        if let Some(performer) = filter.performer.filter(|p| !p.is_empty()) {
            query = query.filter(contains_ignore_case(
                entities::song::Column::Performer,
                &performer,
            ));
        }

        let songs = query
            .into_model::<SongSummary>()
            .all(&self.db.conn)
            .await?;

        log::debug!("Fetched {} songs", songs.len());
        Ok(songs)
    }

    #[instrument(skip(self))]
    pub async fn get_song_by_id(&self, id: &str) -> ServiceResult<Song> {
        entities::song::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .map(Song::from)
            .ok_or_else(|| ServiceError::NotFound("Song not found".to_string()))
    }

    #[instrument(skip(self, song))]
    pub async fn edit_song_by_id(&self, id: &str, song: SongUpdate) -> ServiceResult<String> {
        let result = entities::song::Entity::update_many()
            .set(entities::song::ActiveModel {
                album_id: Set(song.album_id),
                title: Set(song.title),
                year: Set(song.year),
                performer: Set(song.performer),
                genre: Set(song.genre),
                duration: Set(song.duration),
                ..Default::default()
            })
            .filter(entities::song::Column::Id.eq(id))
            .exec(&self.db.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(
                "Failed to update song. Id not found".to_string(),
            ));
        }

        log::info!("Song updated (ID: {})", id);
        Ok(id.to_string())
    }

    #[instrument(skip(self))]
    pub async fn delete_song_by_id(&self, id: &str) -> ServiceResult<String> {
        let result = entities::song::Entity::delete_by_id(id)
            .exec(&self.db.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(
                "Failed to delete song. Id not found".to_string(),
            ));
        }

        log::info!("Song deleted (ID: {})", id);
        Ok(id.to_string())
    }
}
