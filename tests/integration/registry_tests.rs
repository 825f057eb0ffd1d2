//! Loader registry integration tests
//!
//! Drives request-scoped registries over the SeaORM repository to check
//! that concurrent resolution collapses into one query per relationship.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use mediagraph::config::LoaderSettings;
    use mediagraph::core::registry::LoaderRegistry;
    use mediagraph::core::resolvers::resolve_scenes;
    use mediagraph::storage::MediaRepository;
    use sea_orm::ConnectionTrait;
    use std::sync::Arc;

    async fn registry() -> (TestDatabase, LoaderRegistry) {
        let db = TestDatabase::seeded().await;
        let repository: Arc<dyn MediaRepository> = db.repository();
        let loaders = LoaderRegistry::new(repository, &LoaderSettings::default());
        (db, loaders)
    }

    #[tokio::test]
    async fn test_resolve_scenes_from_database() {
        let (_db, loaders) = registry().await;

        let views = resolve_scenes(&loaders, vec![1, 2, 3, 42]).await.unwrap();
        assert_eq!(views.len(), 4);
        assert!(views[3].is_none());

        let first = views[0].as_ref().unwrap();
        assert_eq!(first.studio.as_ref().unwrap().name, "North");
        let performers: Vec<_> = first.performers.iter().map(|p| p.id).collect();
        assert_eq!(performers, vec![1, 2]);
        let files: Vec<_> = first.files.iter().map(|f| f.id).collect();
        assert_eq!(files, vec![2, 1]);
        assert_eq!(first.galleries.len(), 1);
        assert_eq!(first.movies.len(), 1);
        assert_eq!(first.o_counter, 3);
        assert_eq!(first.play_count, 7);
        assert!(first.last_played_at.is_some());

        let third = views[2].as_ref().unwrap();
        assert!(third.studio.is_none());
        assert!(third.performers.is_empty());
        assert_eq!(third.o_counter, 0);
    }

    #[tokio::test]
    async fn test_loaded_values_are_cached() {
        let (_db, loaders) = registry().await;

        let (a, b) = tokio::join!(
            loaders.performer_by_id().load(2),
            loaders.performer_by_id().load(3)
        );
        assert_eq!(a.unwrap().unwrap().id, 2);
        assert_eq!(b.unwrap().unwrap().id, 3);
        assert_eq!(loaders.performer_by_id().cached_len(), 2);

        loaders.reset();
        assert_eq!(loaders.performer_by_id().cached_len(), 0);
    }

    #[tokio::test]
    async fn test_database_error_reaches_every_caller() {
        let (db, loaders) = registry().await;
        db.connection()
            .execute_unprepared("DROP TABLE scenes_movies")
            .await
            .unwrap();

        let results = loaders.scene_movie_ids().load_many(vec![1, 2]).await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|result| result.is_err()));
        assert_eq!(loaders.scene_movie_ids().cached_len(), 0);

        // Other relationships are unaffected
        assert_eq!(loaders.scene_tag_ids().load(1).await.unwrap(), vec![1, 2]);
    }
}
