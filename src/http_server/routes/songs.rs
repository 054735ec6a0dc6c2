use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use super::{success, success_message};
use crate::http_server::error::{ApiError, ApiResult};
use crate::http_server::state::AppState;
use crate::http_server::validation::Validate;
use crate::services::song::{NewSong, SongFilter, SongUpdate};

/// POST /songs
async fn post_song(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<NewSong>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    payload.validate()?;
    let song_id = state.songs.add_song(payload).await?;

    Ok((StatusCode::CREATED, success(json!({ "songId": song_id }))))
}

/// GET /songs?title=&performer=
async fn get_songs(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(filter), _): WithRejection<Query<SongFilter>, ApiError>,
) -> ApiResult<Json<Value>> {
    let songs = state.songs.get_songs(filter).await?;
    Ok(success(json!({ "songs": songs })))
}

/// GET /songs/{id}
async fn get_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let song = state.songs.get_song_by_id(&id).await?;
    Ok(success(json!({ "song": song })))
}

/// PUT /songs/{id}
async fn put_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<SongUpdate>, ApiError>,
) -> ApiResult<Json<Value>> {
    payload.validate()?;
    state.songs.edit_song_by_id(&id, payload).await?;
    Ok(success_message("Song updated"))
}

/// DELETE /songs/{id}
async fn delete_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.songs.delete_song_by_id(&id).await?;
    Ok(success_message("Song deleted"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/songs", get(get_songs).post(post_song))
        .route(
            "/songs/{id}",
            get(get_song).put(put_song).delete(delete_song),
        )
}
