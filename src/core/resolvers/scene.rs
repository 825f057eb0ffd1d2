use crate::core::loader::{BatchLoader, LoaderError};
use crate::core::models::{Gallery, Movie, Performer, Scene, SceneId, Studio, Tag, VideoFile};
use crate::core::registry::LoaderRegistry;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;

/// A scene with its relationships resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneView {
    #[serde(flatten)]
    pub scene: Scene,
    pub studio: Option<Studio>,
    pub performers: Vec<Performer>,
    pub tags: Vec<Tag>,
    pub galleries: Vec<Gallery>,
    pub movies: Vec<Movie>,
    /// Files of the scene, primary file first
    pub files: Vec<VideoFile>,
    pub o_counter: i64,
    pub play_count: i64,
    pub last_played_at: Option<DateTime<Utc>>,
}

/// Load every entity of a list, skipping ids that no longer resolve
async fn present<T: Clone + Send + Sync + 'static>(
    loader: &BatchLoader<i32, Option<T>>,
    ids: Vec<i32>,
) -> std::result::Result<Vec<T>, LoaderError> {
    Ok(loader
        .try_load_many(ids)
        .await?
        .into_iter()
        .flatten()
        .collect())
}

async fn studio(
    loaders: &LoaderRegistry,
    scene: &Scene,
) -> std::result::Result<Option<Studio>, LoaderError> {
    match scene.studio_id {
        Some(id) => loaders.studio_by_id().load(id).await,
        None => Ok(None),
    }
}

async fn performers(
    loaders: &LoaderRegistry,
    scene_id: SceneId,
) -> std::result::Result<Vec<Performer>, LoaderError> {
    let ids = loaders.scene_performer_ids().load(scene_id).await?;
    present(loaders.performer_by_id(), ids).await
}

async fn tags(
    loaders: &LoaderRegistry,
    scene_id: SceneId,
) -> std::result::Result<Vec<Tag>, LoaderError> {
    let ids = loaders.scene_tag_ids().load(scene_id).await?;
    present(loaders.tag_by_id(), ids).await
}

async fn galleries(
    loaders: &LoaderRegistry,
    scene_id: SceneId,
) -> std::result::Result<Vec<Gallery>, LoaderError> {
    let ids = loaders.scene_gallery_ids().load(scene_id).await?;
    present(loaders.gallery_by_id(), ids).await
}

async fn movies(
    loaders: &LoaderRegistry,
    scene_id: SceneId,
) -> std::result::Result<Vec<Movie>, LoaderError> {
    let ids = loaders.scene_movie_ids().load(scene_id).await?;
    present(loaders.movie_by_id(), ids).await
}

async fn files(
    loaders: &LoaderRegistry,
    scene_id: SceneId,
) -> std::result::Result<Vec<VideoFile>, LoaderError> {
    let ids = loaders.scene_files().load(scene_id).await?;
    present(loaders.file_by_id(), ids).await
}

/// Resolve every relationship of `scene`
pub async fn resolve_scene(loaders: &LoaderRegistry, scene: Scene) -> Result<SceneView> {
    let id = scene.id;
    let (studio, performers, tags, galleries, movies, files, o_counter, play_count, last_played_at) =
        tokio::try_join!(
            studio(loaders, &scene),
            performers(loaders, id),
            tags(loaders, id),
            galleries(loaders, id),
            movies(loaders, id),
            files(loaders, id),
            loaders.scene_o_count().load(id),
            loaders.scene_play_count().load(id),
            loaders.scene_last_played().load(id),
        )?;

    Ok(SceneView {
        scene,
        studio,
        performers,
        tags,
        galleries,
        movies,
        files,
        o_counter,
        play_count,
        last_played_at,
    })
}

/// Resolve the scenes with the given ids, `None` for unknown ids
///
/// All scenes are resolved concurrently, so each relationship is fetched once
/// for the whole list rather than once per scene.
pub async fn resolve_scenes(
    loaders: &LoaderRegistry,
    ids: Vec<SceneId>,
) -> Result<Vec<Option<SceneView>>> {
    let scenes = loaders.scene_by_id().try_load_many(ids).await?;
    try_join_all(scenes.into_iter().map(|scene| async move {
        match scene {
            Some(scene) => resolve_scene(loaders, scene).await.map(Some),
            None => Ok(None),
        }
    }))
    .await
}
