use crate::core::models;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tag database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(&self) -> models::Tag {
        models::Tag {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    pub fn from_domain(tag: &models::Tag) -> ActiveModel {
        ActiveModel {
            id: Set(tag.id),
            name: Set(tag.name.clone()),
            description: Set(tag.description.clone()),
        }
    }
}
