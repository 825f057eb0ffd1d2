use crate::core::models;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Studio database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "studios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub url: Option<String>,

    /// Parent studio, for networks
    pub parent_id: Option<i32>,
}

/// Studio entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::scene::Entity")]
    Scenes,
}

impl Related<super::scene::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scenes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(&self) -> models::Studio {
        models::Studio {
            id: self.id,
            name: self.name.clone(),
            url: self.url.clone(),
            parent_id: self.parent_id,
        }
    }

    pub fn from_domain(studio: &models::Studio) -> ActiveModel {
        ActiveModel {
            id: Set(studio.id),
            name: Set(studio.name.clone()),
            url: Set(studio.url.clone()),
            parent_id: Set(studio.parent_id),
        }
    }
}
