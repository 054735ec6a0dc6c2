use std::sync::Arc;

use crate::database::Database;
use crate::services::album::AlbumService;
use crate::services::song::SongService;

pub struct AppState {
    pub albums: AlbumService,
    pub songs: SongService,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            albums: AlbumService::new(db.clone()),
            songs: SongService::new(db),
        }
    }
}
