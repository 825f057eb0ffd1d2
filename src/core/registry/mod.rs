//! Per-request loader registry
//!
//! A [`LoaderRegistry`] bundles one [`BatchLoader`] per relationship the API
//! resolves, each bound to the matching many-key lookup of a
//! [`MediaRepository`]. A registry is built for every request and dropped with
//! it, so nothing cached here outlives the request.

use crate::config::LoaderSettings;
use crate::core::loader::{BatchLoader, FetchOutput, LoaderKey, LoaderValue, fetch_fn};
use crate::core::models::{
    FileId, Gallery, GalleryId, Movie, MovieId, Performer, PerformerId, Scene, SceneId, Studio,
    StudioId, Tag, TagId, VideoFile,
};
use crate::storage::MediaRepository;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;


pub const SCENE_BY_ID: &str = "scene_by_id";
pub const PERFORMER_BY_ID: &str = "performer_by_id";
pub const TAG_BY_ID: &str = "tag_by_id";
pub const STUDIO_BY_ID: &str = "studio_by_id";
pub const GALLERY_BY_ID: &str = "gallery_by_id";
pub const MOVIE_BY_ID: &str = "movie_by_id";
pub const FILE_BY_ID: &str = "file_by_id";
pub const SCENE_FILES: &str = "scene_files";
pub const SCENE_PERFORMER_IDS: &str = "scene_performer_ids";
pub const SCENE_TAG_IDS: &str = "scene_tag_ids";
pub const SCENE_GALLERY_IDS: &str = "scene_gallery_ids";
pub const SCENE_MOVIE_IDS: &str = "scene_movie_ids";
pub const SCENE_O_COUNT: &str = "scene_o_count";
pub const SCENE_PLAY_COUNT: &str = "scene_play_count";
pub const SCENE_LAST_PLAYED: &str = "scene_last_played";

/// Names of every loader in a registry
pub const LOADER_NAMES: [&str; 15] = [
    SCENE_BY_ID,
    PERFORMER_BY_ID,
    TAG_BY_ID,
    STUDIO_BY_ID,
    GALLERY_BY_ID,
    MOVIE_BY_ID,
    FILE_BY_ID,
    SCENE_FILES,
    SCENE_PERFORMER_IDS,
    SCENE_TAG_IDS,
    SCENE_GALLERY_IDS,
    SCENE_MOVIE_IDS,
    SCENE_O_COUNT,
    SCENE_PLAY_COUNT,
    SCENE_LAST_PLAYED,
];

/// Loaders for a single request
pub struct LoaderRegistry {
    scene_by_id: BatchLoader<SceneId, Option<Scene>>,
    performer_by_id: BatchLoader<PerformerId, Option<Performer>>,
    tag_by_id: BatchLoader<TagId, Option<Tag>>,
    studio_by_id: BatchLoader<StudioId, Option<Studio>>,
    gallery_by_id: BatchLoader<GalleryId, Option<Gallery>>,
    movie_by_id: BatchLoader<MovieId, Option<Movie>>,
    file_by_id: BatchLoader<FileId, Option<VideoFile>>,
    scene_files: BatchLoader<SceneId, Vec<FileId>>,
    scene_performer_ids: BatchLoader<SceneId, Vec<PerformerId>>,
    scene_tag_ids: BatchLoader<SceneId, Vec<TagId>>,
    scene_gallery_ids: BatchLoader<SceneId, Vec<GalleryId>>,
    scene_movie_ids: BatchLoader<SceneId, Vec<MovieId>>,
    scene_o_count: BatchLoader<SceneId, i64>,
    scene_play_count: BatchLoader<SceneId, i64>,
    scene_last_played: BatchLoader<SceneId, Option<DateTime<Utc>>>,
}

/// Build a loader whose fetch forwards the batch keys to one repository call
fn bind<K, V, F, Fut>(
    name: &'static str,
    repository: &Arc<dyn MediaRepository>,
    settings: &LoaderSettings,
    lookup: F,
) -> BatchLoader<K, V>
where
    K: LoaderKey,
    V: LoaderValue,
    F: Fn(Arc<dyn MediaRepository>, Vec<K>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<V>>> + Send + 'static,
{
    let repository = Arc::clone(repository);
    let fetch = fetch_fn(move |keys: Vec<K>| {
        let lookup = lookup(Arc::clone(&repository), keys);
        async move { FetchOutput::from_result(lookup.await) }
    });
    BatchLoader::new(name, Arc::new(fetch), settings.config_for(name))
}

impl LoaderRegistry {
    /// Bind a fresh set of loaders to `repository`
    pub fn new(repository: Arc<dyn MediaRepository>, settings: &LoaderSettings) -> Self {
        debug!("Creating loader registry");
        let repo = &repository;

        Self {
            scene_by_id: bind(SCENE_BY_ID, repo, settings, |r, ids| async move {
                r.find_scenes(&ids).await
            }),
            performer_by_id: bind(PERFORMER_BY_ID, repo, settings, |r, ids| async move {
                r.find_performers(&ids).await
            }),
            tag_by_id: bind(TAG_BY_ID, repo, settings, |r, ids| async move {
                r.find_tags(&ids).await
            }),
            studio_by_id: bind(STUDIO_BY_ID, repo, settings, |r, ids| async move {
                r.find_studios(&ids).await
            }),
            gallery_by_id: bind(GALLERY_BY_ID, repo, settings, |r, ids| async move {
                r.find_galleries(&ids).await
            }),
            movie_by_id: bind(MOVIE_BY_ID, repo, settings, |r, ids| async move {
                r.find_movies(&ids).await
            }),
            file_by_id: bind(FILE_BY_ID, repo, settings, |r, ids| async move {
                r.find_files(&ids).await
            }),
            scene_files: bind(SCENE_FILES, repo, settings, |r, ids| async move {
                r.scene_file_ids(&ids).await
            }),
            scene_performer_ids: bind(SCENE_PERFORMER_IDS, repo, settings, |r, ids| async move {
                r.scene_performer_ids(&ids).await
            }),
            scene_tag_ids: bind(SCENE_TAG_IDS, repo, settings, |r, ids| async move {
                r.scene_tag_ids(&ids).await
            }),
            scene_gallery_ids: bind(SCENE_GALLERY_IDS, repo, settings, |r, ids| async move {
                r.scene_gallery_ids(&ids).await
            }),
            scene_movie_ids: bind(SCENE_MOVIE_IDS, repo, settings, |r, ids| async move {
                r.scene_movie_ids(&ids).await
            }),
            scene_o_count: bind(SCENE_O_COUNT, repo, settings, |r, ids| async move {
                r.scene_o_counts(&ids).await
            }),
            scene_play_count: bind(SCENE_PLAY_COUNT, repo, settings, |r, ids| async move {
                r.scene_play_counts(&ids).await
            }),
            scene_last_played: bind(SCENE_LAST_PLAYED, repo, settings, |r, ids| async move {
                r.scene_last_played(&ids).await
            }),
        }
    }

    pub fn scene_by_id(&self) -> &BatchLoader<SceneId, Option<Scene>> {
        &self.scene_by_id
    }

    pub fn performer_by_id(&self) -> &BatchLoader<PerformerId, Option<Performer>> {
        &self.performer_by_id
    }

    pub fn tag_by_id(&self) -> &BatchLoader<TagId, Option<Tag>> {
        &self.tag_by_id
    }

    pub fn studio_by_id(&self) -> &BatchLoader<StudioId, Option<Studio>> {
        &self.studio_by_id
    }

    pub fn gallery_by_id(&self) -> &BatchLoader<GalleryId, Option<Gallery>> {
        &self.gallery_by_id
    }

    pub fn movie_by_id(&self) -> &BatchLoader<MovieId, Option<Movie>> {
        &self.movie_by_id
    }

    pub fn file_by_id(&self) -> &BatchLoader<FileId, Option<VideoFile>> {
        &self.file_by_id
    }

    /// File ids of a scene, primary file first
    pub fn scene_files(&self) -> &BatchLoader<SceneId, Vec<FileId>> {
        &self.scene_files
    }

    pub fn scene_performer_ids(&self) -> &BatchLoader<SceneId, Vec<PerformerId>> {
        &self.scene_performer_ids
    }

    pub fn scene_tag_ids(&self) -> &BatchLoader<SceneId, Vec<TagId>> {
        &self.scene_tag_ids
    }

    pub fn scene_gallery_ids(&self) -> &BatchLoader<SceneId, Vec<GalleryId>> {
        &self.scene_gallery_ids
    }

    pub fn scene_movie_ids(&self) -> &BatchLoader<SceneId, Vec<MovieId>> {
        &self.scene_movie_ids
    }

    pub fn scene_o_count(&self) -> &BatchLoader<SceneId, i64> {
        &self.scene_o_count
    }

    pub fn scene_play_count(&self) -> &BatchLoader<SceneId, i64> {
        &self.scene_play_count
    }

    pub fn scene_last_played(&self) -> &BatchLoader<SceneId, Option<DateTime<Utc>>> {
        &self.scene_last_played
    }

    /// Drop every cached value, e.g. between pages of a long-running scan
    pub fn reset(&self) {
        self.scene_by_id.clear_all();
        self.performer_by_id.clear_all();
        self.tag_by_id.clear_all();
        self.studio_by_id.clear_all();
        self.gallery_by_id.clear_all();
        self.movie_by_id.clear_all();
        self.file_by_id.clear_all();
        self.scene_files.clear_all();
        self.scene_performer_ids.clear_all();
        self.scene_tag_ids.clear_all();
        self.scene_gallery_ids.clear_all();
        self.scene_movie_ids.clear_all();
        self.scene_o_count.clear_all();
        self.scene_play_count.clear_all();
        self.scene_last_played.clear_all();
    }
}
