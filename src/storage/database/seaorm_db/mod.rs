// Module declarations
mod align;
mod connection;
mod repository;
mod types;

// Re-export public types
pub use types::SeaOrmRepository;
