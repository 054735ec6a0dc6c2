use std::sync::Arc;

use axum::{Json, Router};
use serde_json::{Value, json};

use crate::http_server::state::AppState;

pub mod albums;
pub mod songs;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().merge(albums::router()).merge(songs::router())
}

/// `{"status": "success", "data": ...}`
fn success(data: Value) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": data,
    }))
}

/// `{"status": "success", "message": ...}`
fn success_message(message: &str) -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": message,
    }))
}
