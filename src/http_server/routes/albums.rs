use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use super::{success, success_message};
use crate::http_server::error::{ApiError, ApiResult};
use crate::http_server::state::AppState;
use crate::http_server::validation::Validate;
use crate::services::album::{AlbumUpdate, NewAlbum};

/// POST /albums
async fn post_album(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<NewAlbum>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    payload.validate()?;
    let album_id = state.albums.add_album(payload).await?;

    Ok((StatusCode::CREATED, success(json!({ "albumId": album_id }))))
}

/// GET /albums
async fn get_albums(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let albums = state.albums.get_albums().await?;
    Ok(success(json!({ "albums": albums })))
}

/// GET /albums/{id}
async fn get_album(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let album = state.albums.get_album_by_id(&id).await?;
    Ok(success(json!({ "album": album })))
}

/// PUT /albums/{id}
async fn put_album(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<AlbumUpdate>, ApiError>,
) -> ApiResult<Json<Value>> {
    payload.validate()?;
    state.albums.edit_album_by_id(&id, payload).await?;
    Ok(success_message("Album updated"))
}

/// DELETE /albums/{id}
async fn delete_album(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.albums.delete_album_by_id(&id).await?;
    Ok(success_message("Album deleted"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/albums", get(get_albums).post(post_album))
        .route(
            "/albums/{id}",
            get(get_album).put(put_album).delete(delete_album),
        )
}
