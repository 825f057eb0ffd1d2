//! Test fixtures and data factories
//!
//! Factories build real domain values with fixed timestamps so assertions
//! can compare whole structs.

use chrono::{DateTime, TimeZone, Utc};
use mediagraph::core::models::{Gallery, Movie, Performer, Scene, Studio, Tag, VideoFile};

/// Timestamp shared by all fixtures
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

/// Factory for creating test scenes
pub struct SceneFactory;

impl SceneFactory {
    pub fn create(id: i32) -> Scene {
        Scene {
            id,
            title: Some(format!("Scene {id}")),
            details: None,
            date: Some("2024-01-15".to_string()),
            rating: None,
            organized: false,
            studio_id: None,
            primary_file_id: None,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        }
    }

    pub fn with_studio(id: i32, studio_id: i32) -> Scene {
        Scene {
            studio_id: Some(studio_id),
            ..Self::create(id)
        }
    }
}

/// Factory for creating test performers
pub struct PerformerFactory;

impl PerformerFactory {
    pub fn create(id: i32) -> Performer {
        Performer {
            id,
            name: format!("Performer {id}"),
            disambiguation: None,
            gender: None,
            favorite: false,
        }
    }
}

pub fn studio(id: i32, name: &str) -> Studio {
    Studio {
        id,
        name: name.to_string(),
        url: None,
        parent_id: None,
    }
}

pub fn tag(id: i32, name: &str) -> Tag {
    Tag {
        id,
        name: name.to_string(),
        description: None,
    }
}

pub fn gallery(id: i32) -> Gallery {
    Gallery {
        id,
        title: Some(format!("Gallery {id}")),
        date: None,
    }
}

pub fn movie(id: i32) -> Movie {
    Movie {
        id,
        name: format!("Movie {id}"),
        duration: Some(5400),
    }
}

pub fn video_file(id: i32) -> VideoFile {
    VideoFile {
        id,
        path: format!("/library/videos/{id}.mp4"),
        size: 1_048_576 * i64::from(id),
        duration: 600.5,
        width: 1920,
        height: 1080,
        video_codec: Some("h264".to_string()),
        mod_time: fixed_time(),
    }
}
