use sea_orm::DatabaseConnection;

/// SeaORM-backed media repository
#[derive(Debug, Clone)]
pub struct SeaOrmRepository {
    pub(super) db: DatabaseConnection,
}
