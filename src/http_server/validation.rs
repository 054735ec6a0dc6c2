use chrono::{Datelike, Utc};

use crate::http_server::error::ApiError;
use crate::services::album::{AlbumUpdate, NewAlbum};
use crate::services::song::{NewSong, SongUpdate};

const MIN_YEAR: i32 = 1900;

/// Checks a request payload before it reaches a service.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("\"{}\" must not be empty", field)));
    }
    Ok(())
}

fn require_year(year: i32) -> Result<(), ApiError> {
    let current = Utc::now().year();
    if !(MIN_YEAR..=current).contains(&year) {
        return Err(ApiError::Validation(format!(
            "\"year\" must be between {} and {}",
            MIN_YEAR, current
        )));
    }
    Ok(())
}

fn require_duration(duration: i32) -> Result<(), ApiError> {
    if duration < 0 {
        return Err(ApiError::Validation(
            "\"duration\" must not be negative".to_string(),
        ));
    }
    Ok(())
}

impl Validate for NewAlbum {
    fn validate(&self) -> Result<(), ApiError> {
        require_text("name", &self.name)?;
        require_year(self.year)
    }
}

impl Validate for AlbumUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        require_text("name", &self.name)?;
        require_year(self.year)
    }
}

impl Validate for NewSong {
    fn validate(&self) -> Result<(), ApiError> {
        require_text("title", &self.title)?;
        require_text("performer", &self.performer)?;
        require_text("genre", &self.genre)?;
        require_year(self.year)?;
        require_duration(self.duration)
    }
}

impl Validate for SongUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        require_text("title", &self.title)?;
        require_text("performer", &self.performer)?;
        require_text("genre", &self.genre)?;
        require_year(self.year)?;
        require_duration(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song() -> NewSong {
        NewSong {
            title: "Fix You".into(),
            year: 2005,
            performer: "Coldplay".into(),
            genre: "Rock".into(),
            duration: 295,
            album_id: None,
        }
    }

    #[test]
    fn test_valid_album() {
        let album = NewAlbum {
            name: "X&Y".into(),
            year: 2005,
        };
        assert!(album.validate().is_ok());
    }

    #[test]
    fn test_blank_album_name() {
        let album = NewAlbum {
            name: "   ".into(),
            year: 2005,
        };
        assert!(matches!(album.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_album_year_out_of_range() {
        let too_old = AlbumUpdate {
            name: "X&Y".into(),
            year: 1899,
        };
        let future = AlbumUpdate {
            name: "X&Y".into(),
            year: Utc::now().year() + 1,
        };
        assert!(too_old.validate().is_err());
        assert!(future.validate().is_err());
    }

    #[test]
    fn test_valid_song() {
        assert!(song().validate().is_ok());
    }

    #[test]
    fn test_song_missing_genre() {
        let mut song = song();
        song.genre = String::new();
        let err = song.validate().unwrap_err();
        assert_eq!(err.to_string(), "\"genre\" must not be empty");
    }

    #[test]
    fn test_song_negative_duration() {
        let mut song = song();
        song.duration = -1;
        assert!(song.validate().is_err());
    }
}
