use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scene/gallery join model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "scenes_galleries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub scene_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub gallery_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
