use crate::core::models::{
    FileId, Gallery, GalleryId, Movie, MovieId, Performer, PerformerId, Scene, SceneId, Studio,
    StudioId, Tag, TagId, VideoFile,
};
use crate::storage::MediaRepository;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;
use std::collections::HashMap;
use tracing::debug;

use super::super::entities::{
    self, gallery, movie, performer, scene, scene_file, scene_gallery, scene_movie,
    scene_performer, scene_tag, studio, tag, video_file,
};
use super::align::{find_aligned, group, rows_in};
use super::types::SeaOrmRepository;

impl SeaOrmRepository {
    /// Primary file of each scene that has one
    async fn primary_files(&self, scene_ids: &[SceneId]) -> Result<HashMap<SceneId, FileId>> {
        if scene_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = entities::SceneFile::find()
            .filter(scene_file::Column::SceneId.is_in(scene_ids.iter().copied()))
            .filter(scene_file::Column::IsPrimary.eq(true))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|row| (row.scene_id, row.file_id)).collect())
    }

    /// One scene-level counter per id, zero for unknown scenes
    async fn scene_counters(
        &self,
        scene_ids: &[SceneId],
        counter: fn(&scene::Model) -> i64,
    ) -> Result<Vec<i64>> {
        let counts = find_aligned::<entities::Scene, _, _>(
            &self.db,
            scene::Column::Id,
            scene_ids,
            |model| (model.id, counter(model)),
        )
        .await?;
        Ok(counts.into_iter().map(|count| count.unwrap_or(0)).collect())
    }
}

#[async_trait]
impl MediaRepository for SeaOrmRepository {
    async fn find_scenes(&self, ids: &[SceneId]) -> Result<Vec<Option<Scene>>> {
        debug!(count = ids.len(), "Finding scenes");
        let primary = self.primary_files(ids).await?;
        find_aligned::<entities::Scene, _, _>(&self.db, scene::Column::Id, ids, |model| {
            let mut scene = model.to_domain();
            scene.primary_file_id = primary.get(&model.id).copied();
            (model.id, scene)
        })
        .await
    }

    async fn find_performers(&self, ids: &[PerformerId]) -> Result<Vec<Option<Performer>>> {
        debug!(count = ids.len(), "Finding performers");
        find_aligned::<entities::Performer, _, _>(
            &self.db,
            performer::Column::Id,
            ids,
            |model| (model.id, model.to_domain()),
        )
        .await
    }

    async fn find_tags(&self, ids: &[TagId]) -> Result<Vec<Option<Tag>>> {
        debug!(count = ids.len(), "Finding tags");
        find_aligned::<entities::Tag, _, _>(&self.db, tag::Column::Id, ids, |model| {
            (model.id, model.to_domain())
        })
        .await
    }

    async fn find_studios(&self, ids: &[StudioId]) -> Result<Vec<Option<Studio>>> {
        debug!(count = ids.len(), "Finding studios");
        find_aligned::<entities::Studio, _, _>(&self.db, studio::Column::Id, ids, |model| {
            (model.id, model.to_domain())
        })
        .await
    }

    async fn find_galleries(&self, ids: &[GalleryId]) -> Result<Vec<Option<Gallery>>> {
        debug!(count = ids.len(), "Finding galleries");
        find_aligned::<entities::Gallery, _, _>(&self.db, gallery::Column::Id, ids, |model| {
            (model.id, model.to_domain())
        })
        .await
    }

    async fn find_movies(&self, ids: &[MovieId]) -> Result<Vec<Option<Movie>>> {
        debug!(count = ids.len(), "Finding movies");
        find_aligned::<entities::Movie, _, _>(&self.db, movie::Column::Id, ids, |model| {
            (model.id, model.to_domain())
        })
        .await
    }

    async fn find_files(&self, ids: &[FileId]) -> Result<Vec<Option<VideoFile>>> {
        debug!(count = ids.len(), "Finding files");
        find_aligned::<entities::VideoFile, _, _>(
            &self.db,
            video_file::Column::Id,
            ids,
            |model| (model.id, model.to_domain()),
        )
        .await
    }

    async fn scene_file_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<FileId>>> {
        if scene_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = entities::SceneFile::find()
            .filter(scene_file::Column::SceneId.is_in(scene_ids.iter().copied()))
            .order_by_desc(scene_file::Column::IsPrimary)
            .order_by_asc(scene_file::Column::FileId)
            .all(&self.db)
            .await?;
        Ok(group(
            scene_ids,
            rows.into_iter().map(|row| (row.scene_id, row.file_id)),
        ))
    }

    async fn scene_performer_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<PerformerId>>> {
        let mut rows = rows_in::<entities::ScenePerformer>(
            &self.db,
            scene_performer::Column::SceneId,
            scene_ids,
        )
        .await?;
        rows.sort_by_key(|row| row.performer_id);
        Ok(group(
            scene_ids,
            rows.into_iter().map(|row| (row.scene_id, row.performer_id)),
        ))
    }

    async fn scene_tag_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<TagId>>> {
        let mut rows =
            rows_in::<entities::SceneTag>(&self.db, scene_tag::Column::SceneId, scene_ids).await?;
        rows.sort_by_key(|row| row.tag_id);
        Ok(group(
            scene_ids,
            rows.into_iter().map(|row| (row.scene_id, row.tag_id)),
        ))
    }

    async fn scene_gallery_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<GalleryId>>> {
        let mut rows = rows_in::<entities::SceneGallery>(
            &self.db,
            scene_gallery::Column::SceneId,
            scene_ids,
        )
        .await?;
        rows.sort_by_key(|row| row.gallery_id);
        Ok(group(
            scene_ids,
            rows.into_iter().map(|row| (row.scene_id, row.gallery_id)),
        ))
    }

    async fn scene_movie_ids(&self, scene_ids: &[SceneId]) -> Result<Vec<Vec<MovieId>>> {
        let mut rows =
            rows_in::<entities::SceneMovie>(&self.db, scene_movie::Column::SceneId, scene_ids)
                .await?;
        rows.sort_by_key(|row| (row.scene_index.unwrap_or(i32::MAX), row.movie_id));
        Ok(group(
            scene_ids,
            rows.into_iter().map(|row| (row.scene_id, row.movie_id)),
        ))
    }

    async fn scene_o_counts(&self, scene_ids: &[SceneId]) -> Result<Vec<i64>> {
        self.scene_counters(scene_ids, |model| i64::from(model.o_counter))
            .await
    }

    async fn scene_play_counts(&self, scene_ids: &[SceneId]) -> Result<Vec<i64>> {
        self.scene_counters(scene_ids, |model| i64::from(model.play_count))
            .await
    }

    async fn scene_last_played(
        &self,
        scene_ids: &[SceneId],
    ) -> Result<Vec<Option<DateTime<Utc>>>> {
        let played = find_aligned::<entities::Scene, _, _>(
            &self.db,
            scene::Column::Id,
            scene_ids,
            |model| {
                (
                    model.id,
                    model.last_played_at.map(|at| at.with_timezone(&Utc)),
                )
            },
        )
        .await?;
        Ok(played.into_iter().map(Option::flatten).collect())
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}
