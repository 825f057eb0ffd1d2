use crate::core::models;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Movie database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Duration in seconds
    pub duration: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(&self) -> models::Movie {
        models::Movie {
            id: self.id,
            name: self.name.clone(),
            duration: self.duration,
        }
    }

    pub fn from_domain(movie: &models::Movie) -> ActiveModel {
        ActiveModel {
            id: Set(movie.id),
            name: Set(movie.name.clone()),
            duration: Set(movie.duration),
        }
    }
}
