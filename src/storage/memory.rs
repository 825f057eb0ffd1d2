//! In-memory repository
//!
//! Holds the library in hash maps and records every many-key call it serves,
//! so tests can assert how many fetches a request issued and with which ids.
//! Individual methods can be switched into a failing mode.

use super::MediaRepository;
use crate::core::models::{
    FileId, Gallery, GalleryId, Movie, MovieId, Performer, PerformerId, Scene, SceneId, Studio,
    StudioId, Tag, TagId, VideoFile,
};
use crate::utils::error::{MediaError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryData {
    scenes: HashMap<SceneId, Scene>,
    performers: HashMap<PerformerId, Performer>,
    tags: HashMap<TagId, Tag>,
    studios: HashMap<StudioId, Studio>,
    galleries: HashMap<GalleryId, Gallery>,
    movies: HashMap<MovieId, Movie>,
    files: HashMap<FileId, VideoFile>,
    scene_files: HashMap<SceneId, Vec<FileId>>,
    scene_performers: HashMap<SceneId, Vec<PerformerId>>,
    scene_tags: HashMap<SceneId, Vec<TagId>>,
    scene_galleries: HashMap<SceneId, Vec<GalleryId>>,
    scene_movies: HashMap<SceneId, Vec<MovieId>>,
    o_counts: HashMap<SceneId, i64>,
    play_counts: HashMap<SceneId, i64>,
    last_played: HashMap<SceneId, DateTime<Utc>>,
}

/// In-memory implementation of [`MediaRepository`]
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    data: RwLock<MemoryData>,
    /// Ids passed to each method, one entry per call
    calls: DashMap<&'static str, Vec<Vec<i32>>>,
    /// Methods that currently fail, with their error message
    failing: DashMap<&'static str, String>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn insert_scene(&self, scene: Scene) {
        self.data.write().scenes.insert(scene.id, scene);
    }

    pub fn insert_performer(&self, performer: Performer) {
        self.data.write().performers.insert(performer.id, performer);
    }

    pub fn insert_tag(&self, tag: Tag) {
        self.data.write().tags.insert(tag.id, tag);
    }

    pub fn insert_studio(&self, studio: Studio) {
        self.data.write().studios.insert(studio.id, studio);
    }

    pub fn insert_gallery(&self, gallery: Gallery) {
        self.data.write().galleries.insert(gallery.id, gallery);
    }

    pub fn insert_movie(&self, movie: Movie) {
        self.data.write().movies.insert(movie.id, movie);
    }

    pub fn insert_file(&self, file: VideoFile) {
        self.data.write().files.insert(file.id, file);
    }

    pub fn link_files(&self, scene_id: SceneId, file_ids: Vec<FileId>) {
        self.data.write().scene_files.insert(scene_id, file_ids);
    }

    pub fn link_performers(&self, scene_id: SceneId, performer_ids: Vec<PerformerId>) {
        self.data
            .write()
            .scene_performers
            .insert(scene_id, performer_ids);
    }

    pub fn link_tags(&self, scene_id: SceneId, tag_ids: Vec<TagId>) {
        self.data.write().scene_tags.insert(scene_id, tag_ids);
    }

    pub fn link_galleries(&self, scene_id: SceneId, gallery_ids: Vec<GalleryId>) {
        self.data
            .write()
            .scene_galleries
            .insert(scene_id, gallery_ids);
    }

    pub fn link_movies(&self, scene_id: SceneId, movie_ids: Vec<MovieId>) {
        self.data.write().scene_movies.insert(scene_id, movie_ids);
    }

    pub fn set_o_count(&self, scene_id: SceneId, count: i64) {
        self.data.write().o_counts.insert(scene_id, count);
    }

    pub fn set_play_count(&self, scene_id: SceneId, count: i64) {
        self.data.write().play_counts.insert(scene_id, count);
    }

    pub fn set_last_played(&self, scene_id: SceneId, at: DateTime<Utc>) {
        self.data.write().last_played.insert(scene_id, at);
    }

    /// Ids passed to `method`, one entry per call
    pub fn calls(&self, method: &str) -> Vec<Vec<i32>> {
        self.calls
            .get(method)
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of times `method` was called
    pub fn call_count(&self, method: &str) -> usize {
        self.calls.get(method).map(|calls| calls.len()).unwrap_or(0)
    }

    /// Make `method` fail with `message` until [`Self::recover`] is called
    pub fn fail(&self, method: &'static str, message: impl Into<String>) {
        self.failing.insert(method, message.into());
    }

    pub fn recover(&self, method: &str) {
        self.failing.remove(method);
    }

    fn record(&self, method: &'static str, ids: &[i32]) -> Result<()> {
        self.calls.entry(method).or_default().push(ids.to_vec());
        match self.failing.get(method) {
            Some(message) => Err(MediaError::internal(message.clone())),
            None => Ok(()),
        }
    }
}

fn lookup<T: Clone>(map: &HashMap<i32, T>, ids: &[i32]) -> Vec<Option<T>> {
    ids.iter().map(|id| map.get(id).cloned()).collect()
}

fn lists(map: &HashMap<i32, Vec<i32>>, ids: &[i32]) -> Vec<Vec<i32>> {
    ids.iter()
        .map(|id| map.get(id).cloned().unwrap_or_default())
        .collect()
}

fn counts(map: &HashMap<i32, i64>, ids: &[i32]) -> Vec<i64> {
    ids.iter()
        .map(|id| map.get(id).copied().unwrap_or(0))
        .collect()
}

#[async_trait]
impl MediaRepository for InMemoryRepository {
    async fn find_scenes(&self, ids: &[SceneId]) -> Result<Vec<Option<Scene>>> {
        self.record("find_scenes", ids)?;
        Ok(lookup(&self.data.read().scenes, ids))
    }

    async fn find_performers(&self, ids: &[PerformerId]) -> Result<Vec<Option<Performer>>> {
        self.record("find_performers", ids)?;
        Ok(lookup(&self.data.read().performers, ids))
    }

    async fn find_tags(&self, ids: &[TagId]) -> Result<Vec<Option<Tag>>> {
        self.record("find_tags", ids)?;
        Ok(lookup(&self.data.read().tags, ids))
    }

    async fn find_studios(&self, ids: &[StudioId]) -> Result<Vec<Option<Studio>>> {
        self.record("find_studios", ids)?;
        Ok(lookup(&self.data.read().studios, ids))
    }

    async fn find_galleries(&self, ids: &[GalleryId]) -> Result<Vec<Option<Gallery>>> {
        self.record("find_galleries", ids)?;
        Ok(lookup(&self.data.read().galleries, ids))
    }

    async fn find_movies(&self, ids: &[MovieId]) -> Result<Vec<Option<Movie>>> {
        self.record("find_movies", ids)?;
        Ok(lookup(&self.data.read().movies, ids))
    }

    async fn find_files(&self, ids: &[FileId]) -> Result<Vec<Option<VideoFile>>> {
        self.record("find_files", ids)?;
        Ok(lookup(&self.data.read().files, ids))
    }

    async fn scene_file_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<FileId>>> {
        self.record("scene_file_ids", scene_ids)?;
        Ok(lists(&self.data.read().scene_files, scene_ids))
    }

    async fn scene_performer_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<PerformerId>>> {
        self.record("scene_performer_ids", scene_ids)?;
        Ok(lists(&self.data.read().scene_performers, scene_ids))
    }

    async fn scene_tag_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<TagId>>> {
        self.record("scene_tag_ids", scene_ids)?;
        Ok(lists(&self.data.read().scene_tags, scene_ids))
    }

    async fn scene_gallery_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<GalleryId>>> {
        self.record("scene_gallery_ids", scene_ids)?;
        Ok(lists(&self.data.read().scene_galleries, scene_ids))
    }

    async fn scene_movie_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<MovieId>>> {
        self.record("scene_movie_ids", scene_ids)?;
        Ok(lists(&self.data.read().scene_movies, scene_ids))
    }

    async fn scene_o_counts(&self, scene_ids: &[SceneId]) -> Result<Vec<i64>> {
        self.record("scene_o_counts", scene_ids)?;
        Ok(counts(&self.data.read().o_counts, scene_ids))
    }

    async fn scene_play_counts(&self, scene_ids: &[SceneId]) -> Result<Vec<i64>> {
        self.record("scene_play_counts", scene_ids)?;
        Ok(counts(&self.data.read().play_counts, scene_ids))
    }

    async fn scene_last_played(
        &self,
        scene_ids: &[SceneId],
    ) -> Result<Vec<Option<DateTime<Utc>>>> {
        self.record("scene_last_played", scene_ids)?;
        let data = self.data.read();
        Ok(scene_ids
            .iter()
            .map(|id| data.last_played.get(id).copied())
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
