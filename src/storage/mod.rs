//! Storage layer for the media library
//!
//! Relationship loaders only ever talk to storage through [`MediaRepository`]:
//! many-key lookups whose results are positionally aligned with the ids they
//! were given. A missing entity is `None` at its position, never a shorter
//! result.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;

use crate::core::models::{
    FileId, Gallery, GalleryId, Movie, MovieId, Performer, PerformerId, Scene, SceneId, Studio,
    StudioId, Tag, TagId, VideoFile,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use database::SeaOrmRepository;
pub use memory::InMemoryRepository;

/// Batched read access to the media library
#[async_trait]
pub trait MediaRepository: Send + Sync + 'static {
    async fn find_scenes(&self, ids: &[SceneId]) -> Result<Vec<Option<Scene>>>;

    async fn find_performers(&self, ids: &[PerformerId]) -> Result<Vec<Option<Performer>>>;

    async fn find_tags(&self, ids: &[TagId]) -> Result<Vec<Option<Tag>>>;

    async fn find_studios(&self, ids: &[StudioId]) -> Result<Vec<Option<Studio>>>;

    async fn find_galleries(&self, ids: &[GalleryId]) -> Result<Vec<Option<Gallery>>>;

    async fn find_movies(&self, ids: &[MovieId]) -> Result<Vec<Option<Movie>>>;

    async fn find_files(&self, ids: &[FileId]) -> Result<Vec<Option<VideoFile>>>;

    /// File ids of each scene, primary file first
    async fn scene_file_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<FileId>>>;

    async fn scene_performer_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<PerformerId>>>;

    async fn scene_tag_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<TagId>>>;

    async fn scene_gallery_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<GalleryId>>>;

    async fn scene_movie_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<MovieId>>>;

    async fn scene_o_counts(&self, scene_ids: &[SceneId]) -> Result<Vec<i64>>;

    async fn scene_play_counts(&self, scene_ids: &[SceneId]) -> Result<Vec<i64>>;

    async fn scene_last_played(&self, scene_ids: &[SceneId])
    -> Result<Vec<Option<DateTime<Utc>>>>;

    /// Lightweight connectivity check
    async fn health_check(&self) -> Result<()>;
}
