//! Scene endpoints

use crate::core::models::SceneId;
use crate::core::resolvers::resolve_scenes;
use crate::server::middleware::RequestLoaders;
use crate::server::routes::ApiResponse;
use crate::utils::error::{MediaError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::debug;

/// Most scenes a single list request may ask for
pub const MAX_SCENE_IDS: usize = 1000;

/// Configure scene routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/scenes")
            .route("", web::get().to(list_scenes))
            .route("/{id}", web::get().to(get_scene)),
    );
}

/// Query of the scene list endpoint
#[derive(Debug, Deserialize)]
pub struct SceneListQuery {
    /// Comma separated scene ids
    pub ids: String,
}

impl SceneListQuery {
    /// Parse the id list, keeping request order
    pub fn scene_ids(&self) -> Result<Vec<SceneId>> {
        let ids = self
            .ids
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<SceneId>()
                    .map_err(|_| MediaError::bad_request(format!("Invalid scene id: {part}")))
            })
            .collect::<Result<Vec<_>>>()?;

        if ids.is_empty() {
            return Err(MediaError::bad_request("At least one scene id is required"));
        }
        if ids.len() > MAX_SCENE_IDS {
            return Err(MediaError::bad_request(format!(
                "At most {MAX_SCENE_IDS} scene ids may be requested"
            )));
        }
        Ok(ids)
    }
}

/// `GET /api/scenes/{id}`
pub async fn get_scene(
    path: web::Path<SceneId>,
    loaders: RequestLoaders,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    debug!(scene = id, "Resolving scene");

    let view = resolve_scenes(&loaders, vec![id])
        .await?
        .into_iter()
        .flatten()
        .next()
        .ok_or_else(|| MediaError::not_found(format!("Scene {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

/// `GET /api/scenes?ids=1,2,3`
///
/// Unknown ids are skipped and reported in `meta.missing`.
pub async fn list_scenes(
    query: web::Query<SceneListQuery>,
    loaders: RequestLoaders,
) -> Result<HttpResponse> {
    let ids = query.scene_ids()?;
    debug!(count = ids.len(), "Resolving scene list");

    let views = resolve_scenes(&loaders, ids.clone()).await?;
    let missing: Vec<SceneId> = ids
        .iter()
        .zip(&views)
        .filter(|(_, view)| view.is_none())
        .map(|(id, _)| *id)
        .collect();
    let scenes: Vec<_> = views.into_iter().flatten().collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(
        scenes,
        serde_json::json!({ "missing": missing }),
    )))
}
