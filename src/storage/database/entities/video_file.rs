use crate::core::models;
use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Video file database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub path: String,

    /// Size in bytes
    pub size: i64,

    /// Duration in seconds
    pub duration: f64,

    pub width: i32,

    pub height: i32,

    pub video_codec: Option<String>,

    pub mod_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(&self) -> models::VideoFile {
        models::VideoFile {
            id: self.id,
            path: self.path.clone(),
            size: self.size,
            duration: self.duration,
            width: self.width,
            height: self.height,
            video_codec: self.video_codec.clone(),
            mod_time: self.mod_time.with_timezone(&Utc),
        }
    }

    pub fn from_domain(file: &models::VideoFile) -> ActiveModel {
        ActiveModel {
            id: Set(file.id),
            path: Set(file.path.clone()),
            size: Set(file.size),
            duration: Set(file.duration),
            width: Set(file.width),
            height: Set(file.height),
            video_codec: Set(file.video_codec.clone()),
            mod_time: Set(file.mod_time.into()),
        }
    }
}
