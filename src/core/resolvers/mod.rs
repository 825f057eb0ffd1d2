//! Field resolvers
//!
//! Resolvers turn stored objects into API views by following relationships
//! through the request's [`crate::core::registry::LoaderRegistry`]. The
//! registry is always passed in explicitly; resolvers for many objects run
//! concurrently so their loads coalesce into shared batches.

mod scene;

pub use scene::{SceneView, resolve_scene, resolve_scenes};
