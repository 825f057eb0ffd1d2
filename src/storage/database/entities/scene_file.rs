use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scene/file join model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "scenes_files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub scene_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub file_id: i32,

    /// Whether this is the scene's primary file
    pub is_primary: bool,
}

/// Scene/file join relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scene::Entity",
        from = "Column::SceneId",
        to = "super::scene::Column::Id"
    )]
    Scene,
}

impl Related<super::scene::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scene.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
