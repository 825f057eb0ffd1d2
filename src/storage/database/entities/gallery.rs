use crate::core::models;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gallery database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "galleries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: Option<String>,

    pub date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(&self) -> models::Gallery {
        models::Gallery {
            id: self.id,
            title: self.title.clone(),
            date: self.date.clone(),
        }
    }

    pub fn from_domain(gallery: &models::Gallery) -> ActiveModel {
        ActiveModel {
            id: Set(gallery.id),
            title: Set(gallery.title.clone()),
            date: Set(gallery.date.clone()),
        }
    }
}
