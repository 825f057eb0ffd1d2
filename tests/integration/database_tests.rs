//! Database integration tests
//!
//! Tests the SeaORM repository against a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{SceneFactory, TestDatabase, database::test_db_config, fixtures};
    use mediagraph::storage::{MediaRepository, SeaOrmRepository};

    /// Test basic database connection and health check
    #[tokio::test]
    async fn test_database_health_check() {
        let repository = SeaOrmRepository::connect(&test_db_config()).await;
        assert!(
            repository.is_ok(),
            "Failed to create database: {:?}",
            repository.err()
        );
        let repository = repository.unwrap();

        let migrate_result = repository.migrate().await;
        assert!(
            migrate_result.is_ok(),
            "Migration failed: {:?}",
            migrate_result.err()
        );

        let health = repository.health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
    }

    /// Migrations can run again on an up-to-date schema
    #[tokio::test]
    async fn test_migration_is_idempotent() {
        let db = TestDatabase::new().await;
        let result = db.repository().migrate().await;
        assert!(result.is_ok(), "Second migration failed: {:?}", result.err());
    }

    #[tokio::test]
    async fn test_find_scenes_aligned_with_ids() {
        let db = TestDatabase::seeded().await;
        let repository = db.repository();

        let scenes = repository.find_scenes(&[3, 99, 1, 3]).await.unwrap();

        assert_eq!(scenes.len(), 4);
        assert_eq!(scenes[0].as_ref().unwrap().id, 3);
        assert!(scenes[1].is_none());
        assert_eq!(scenes[2].as_ref().unwrap().id, 1);
        assert_eq!(scenes[3].as_ref().unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_scene_round_trips_with_primary_file() {
        let db = TestDatabase::seeded().await;
        let scenes = db.repository().find_scenes(&[1, 3]).await.unwrap();

        let expected = mediagraph::core::models::Scene {
            primary_file_id: Some(2),
            ..SceneFactory::with_studio(1, 1)
        };
        assert_eq!(scenes[0].as_ref(), Some(&expected));
        assert_eq!(scenes[1].as_ref().unwrap().primary_file_id, None);
    }

    #[tokio::test]
    async fn test_entities_round_trip() {
        let db = TestDatabase::seeded().await;
        let repository = db.repository();

        assert_eq!(
            repository.find_files(&[1]).await.unwrap(),
            vec![Some(fixtures::video_file(1))]
        );
        assert_eq!(
            repository.find_studios(&[1, 2]).await.unwrap(),
            vec![Some(fixtures::studio(1, "North")), None]
        );
        assert_eq!(
            repository.find_movies(&[1]).await.unwrap(),
            vec![Some(fixtures::movie(1))]
        );
        assert_eq!(
            repository.find_galleries(&[2]).await.unwrap(),
            vec![Some(fixtures::gallery(2))]
        );
    }

    #[tokio::test]
    async fn test_relationship_lists() {
        let db = TestDatabase::seeded().await;
        let repository = db.repository();

        assert_eq!(
            repository.scene_file_ids(&[1, 2, 3]).await.unwrap(),
            vec![vec![2, 1], vec![3], vec![]]
        );
        assert_eq!(
            repository.scene_performer_ids(&[2, 1]).await.unwrap(),
            vec![vec![2, 3], vec![1, 2]]
        );
        assert_eq!(
            repository.scene_tag_ids(&[1, 3]).await.unwrap(),
            vec![vec![1, 2], vec![]]
        );
        assert_eq!(
            repository.scene_gallery_ids(&[1, 2]).await.unwrap(),
            vec![vec![1], vec![]]
        );
        assert_eq!(
            repository.scene_movie_ids(&[1, 2]).await.unwrap(),
            vec![vec![1], vec![]]
        );
    }

    #[tokio::test]
    async fn test_counters_default_to_zero() {
        let db = TestDatabase::seeded().await;
        let repository = db.repository();

        assert_eq!(repository.scene_o_counts(&[1, 2, 99]).await.unwrap(), vec![3, 0, 0]);
        assert_eq!(repository.scene_play_counts(&[99, 1]).await.unwrap(), vec![0, 7]);
        assert_eq!(
            repository.scene_last_played(&[1, 2]).await.unwrap(),
            vec![Some(fixtures::fixed_time()), None]
        );
    }

    #[tokio::test]
    async fn test_empty_id_lists() {
        let db = TestDatabase::seeded().await;
        let repository = db.repository();

        assert!(repository.find_scenes(&[]).await.unwrap().is_empty());
        assert!(repository.scene_tag_ids(&[]).await.unwrap().is_empty());
        assert!(repository.scene_o_counts(&[]).await.unwrap().is_empty());
    }
}
