/// Gallery entity module
pub mod gallery;
/// Movie entity module
pub mod movie;
/// Performer entity module
pub mod performer;
/// Scene entity module
pub mod scene;
/// Scene/file join entity module
pub mod scene_file;
/// Scene/gallery join entity module
pub mod scene_gallery;
/// Scene/movie join entity module
pub mod scene_movie;
/// Scene/performer join entity module
pub mod scene_performer;
/// Scene/tag join entity module
pub mod scene_tag;
/// Studio entity module
pub mod studio;
/// Tag entity module
pub mod tag;
/// Video file entity module
pub mod video_file;

pub use gallery::Entity as Gallery;
pub use movie::Entity as Movie;
pub use performer::Entity as Performer;
pub use scene::Entity as Scene;
pub use scene_file::Entity as SceneFile;
pub use scene_gallery::Entity as SceneGallery;
pub use scene_movie::Entity as SceneMovie;
pub use scene_performer::Entity as ScenePerformer;
pub use scene_tag::Entity as SceneTag;
pub use studio::Entity as Studio;
pub use tag::Entity as Tag;
pub use video_file::Entity as VideoFile;
