use crate::core::models;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Performer database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "performers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Distinguishes performers sharing a name
    pub disambiguation: Option<String>,

    pub gender: Option<String>,

    pub favorite: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(&self) -> models::Performer {
        models::Performer {
            id: self.id,
            name: self.name.clone(),
            disambiguation: self.disambiguation.clone(),
            gender: self.gender.clone(),
            favorite: self.favorite,
        }
    }

    pub fn from_domain(performer: &models::Performer) -> ActiveModel {
        ActiveModel {
            id: Set(performer.id),
            name: Set(performer.name.clone()),
            disambiguation: Set(performer.disambiguation.clone()),
            gender: Set(performer.gender.clone()),
            favorite: Set(performer.favorite),
        }
    }
}
