//! Test database utilities
//!
//! Provides in-memory SQLite databases for testing without external
//! dependencies. Each test gets an isolated database with the schema migrated.

use super::fixtures::{self, PerformerFactory, SceneFactory};
use chrono::{DateTime, Utc};
use mediagraph::config::DatabaseConfig;
use mediagraph::storage::SeaOrmRepository;
use mediagraph::storage::database::entities::{
    gallery, movie, performer, scene, scene_file, scene_gallery, scene_movie, scene_performer,
    scene_tag, studio, tag, video_file,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<SeaOrmRepository>,
}

impl TestDatabase {
    /// Create a new, migrated in-memory test database
    pub async fn new() -> Self {
        let repository = SeaOrmRepository::connect(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        repository
            .migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(repository),
        }
    }

    /// Create a test database with the sample library
    ///
    /// - studio 1 "North"; performers 1-4; tags 1-2; galleries 1-2; movie 1; files 1-3
    /// - scene 1: studio 1, performers [1, 2], tags [2, 1], files [2 (primary), 1],
    ///   gallery 1, movie 1, o_counter 3, play_count 7, played
    /// - scene 2: studio 1, performers [2, 3], tag 1, file 3 (primary)
    /// - scene 3: no studio and no relationships
    pub async fn seeded() -> Self {
        let db = Self::new().await;
        db.seed_test_data().await;
        db
    }

    pub fn repository(&self) -> Arc<SeaOrmRepository> {
        Arc::clone(&self.inner)
    }

    pub fn connection(&self) -> &DatabaseConnection {
        self.inner.connection()
    }

    async fn seed_test_data(&self) {
        let db = self.connection();

        insert(db, studio::Model::from_domain(&fixtures::studio(1, "North"))).await;
        for id in 1..=4 {
            insert(db, performer::Model::from_domain(&PerformerFactory::create(id))).await;
        }
        insert(db, tag::Model::from_domain(&fixtures::tag(1, "outdoor"))).await;
        insert(db, tag::Model::from_domain(&fixtures::tag(2, "interview"))).await;
        insert(db, gallery::Model::from_domain(&fixtures::gallery(1))).await;
        insert(db, gallery::Model::from_domain(&fixtures::gallery(2))).await;
        insert(db, movie::Model::from_domain(&fixtures::movie(1))).await;
        for id in 1..=3 {
            insert(db, video_file::Model::from_domain(&fixtures::video_file(id))).await;
        }

        insert(db, scene::Model::from_domain(&SceneFactory::with_studio(1, 1))).await;
        insert(db, scene::Model::from_domain(&SceneFactory::with_studio(2, 1))).await;
        insert(db, scene::Model::from_domain(&SceneFactory::create(3))).await;

        for (scene_id, performer_id) in [(1, 1), (1, 2), (2, 2), (2, 3)] {
            insert(
                db,
                scene_performer::ActiveModel {
                    scene_id: Set(scene_id),
                    performer_id: Set(performer_id),
                },
            )
            .await;
        }
        for (scene_id, tag_id) in [(1, 2), (1, 1), (2, 1)] {
            insert(
                db,
                scene_tag::ActiveModel {
                    scene_id: Set(scene_id),
                    tag_id: Set(tag_id),
                },
            )
            .await;
        }
        for (scene_id, file_id, is_primary) in [(1, 1, false), (1, 2, true), (2, 3, true)] {
            insert(
                db,
                scene_file::ActiveModel {
                    scene_id: Set(scene_id),
                    file_id: Set(file_id),
                    is_primary: Set(is_primary),
                },
            )
            .await;
        }
        insert(
            db,
            scene_gallery::ActiveModel {
                scene_id: Set(1),
                gallery_id: Set(1),
            },
        )
        .await;
        insert(
            db,
            scene_movie::ActiveModel {
                scene_id: Set(1),
                movie_id: Set(1),
                scene_index: Set(Some(2)),
            },
        )
        .await;

        self.set_counters(1, 3, 7, Some(fixtures::fixed_time())).await;
    }

    /// Overwrite a scene's counters
    pub async fn set_counters(
        &self,
        scene_id: i32,
        o_counter: i32,
        play_count: i32,
        last_played_at: Option<DateTime<Utc>>,
    ) {
        let model = scene::ActiveModel {
            id: Set(scene_id),
            o_counter: Set(o_counter),
            play_count: Set(play_count),
            last_played_at: Set(last_played_at.map(Into::into)),
            ..Default::default()
        };
        model
            .update(self.connection())
            .await
            .expect("Failed to update scene counters");
    }
}

async fn insert<A>(db: &DatabaseConnection, model: A)
where
    A: ActiveModelTrait + sea_orm::ActiveModelBehavior + Send,
    <A::Entity as sea_orm::EntityTrait>::Model: sea_orm::IntoActiveModel<A>,
{
    model.insert(db).await.expect("Failed to insert fixture row");
}

/// Helper to create a simple test database config
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
        run_migrations: true,
    }
}
