//! Core data models for the media library
//!
//! Plain domain structs handed between the repository, the loaders and the
//! HTTP layer. Identifiers are the relational store's integer keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SceneId = i32;
pub type PerformerId = i32;
pub type TagId = i32;
pub type StudioId = i32;
pub type GalleryId = i32;
pub type MovieId = i32;
pub type FileId = i32;

/// A video scene in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub title: Option<String>,
    pub details: Option<String>,
    pub date: Option<String>,
    /// Rating on a 1-100 scale
    pub rating: Option<i32>,
    pub organized: bool,
    pub studio_id: Option<StudioId>,
    pub primary_file_id: Option<FileId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A performer appearing in scenes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    pub id: PerformerId,
    pub name: String,
    pub disambiguation: Option<String>,
    pub gender: Option<String>,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    pub id: StudioId,
    pub name: String,
    pub url: Option<String>,
    pub parent_id: Option<StudioId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    pub id: GalleryId,
    pub title: Option<String>,
    pub date: Option<String>,
}

/// A movie (group) a scene belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
    /// Duration in seconds
    pub duration: Option<i32>,
}

/// A video file backing a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFile {
    pub id: FileId,
    pub path: String,
    pub size: i64,
    /// Duration in seconds
    pub duration: f64,
    pub width: i32,
    pub height: i32,
    pub video_codec: Option<String>,
    pub mod_time: DateTime<Utc>,
}
