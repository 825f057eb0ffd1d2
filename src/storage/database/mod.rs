//! Database storage implementation using SeaORM
//!
//! Entities for the media tables, the schema migrator, and
//! [`SeaOrmRepository`], the relational implementation of
//! [`super::MediaRepository`].

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM repository implementation module
pub mod seaorm_db;

pub use seaorm_db::SeaOrmRepository;
