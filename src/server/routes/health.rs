//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health status response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Overall status
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    /// Storage status
    pub storage: ComponentHealth,
}

/// Component health status
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Report service and storage health
///
/// Answers 503 when the repository cannot be reached.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let storage = match state.repository.health_check().await {
        Ok(()) => ComponentHealth {
            status: Cow::Borrowed("healthy"),
            message: None,
        },
        Err(e) => {
            warn!("Storage health check failed: {}", e);
            ComponentHealth {
                status: Cow::Borrowed("unhealthy"),
                message: Some(e.to_string()),
            }
        }
    };
    let healthy = storage.message.is_none();

    let health_status = HealthStatus {
        status: Cow::Borrowed(if healthy { "healthy" } else { "unhealthy" }),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        storage,
    };

    let response = ApiResponse::success(health_status);
    if healthy {
        Ok(HttpResponse::Ok().json(response))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(response))
    }
}
