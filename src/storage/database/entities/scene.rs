use crate::core::models;
use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scene database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "scenes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,

    /// Release date as `YYYY-MM-DD`
    pub date: Option<String>,

    /// Rating on a 1-100 scale
    pub rating: Option<i32>,

    pub organized: bool,

    pub studio_id: Option<i32>,

    /// Number of recorded O events
    pub o_counter: i32,

    pub play_count: i32,

    pub last_played_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

/// Scene entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::studio::Entity",
        from = "Column::StudioId",
        to = "super::studio::Column::Id"
    )]
    Studio,

    #[sea_orm(has_many = "super::scene_file::Entity")]
    Files,
}

impl Related<super::studio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Studio.def()
    }
}

impl Related<super::scene_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain scene; the primary file is resolved separately
    pub fn to_domain(&self) -> models::Scene {
        models::Scene {
            id: self.id,
            title: self.title.clone(),
            details: self.details.clone(),
            date: self.date.clone(),
            rating: self.rating,
            organized: self.organized,
            studio_id: self.studio_id,
            primary_file_id: None,
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
        }
    }

    /// Active model for inserting a domain scene with zeroed counters
    pub fn from_domain(scene: &models::Scene) -> ActiveModel {
        ActiveModel {
            id: Set(scene.id),
            title: Set(scene.title.clone()),
            details: Set(scene.details.clone()),
            date: Set(scene.date.clone()),
            rating: Set(scene.rating),
            organized: Set(scene.organized),
            studio_id: Set(scene.studio_id),
            o_counter: Set(0),
            play_count: Set(0),
            last_played_at: Set(None),
            created_at: Set(scene.created_at.into()),
            updated_at: Set(scene.updated_at.into()),
        }
    }
}
