use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scene/movie join model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "scenes_movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub scene_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub movie_id: i32,

    /// Position of the scene within the movie
    pub scene_index: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
