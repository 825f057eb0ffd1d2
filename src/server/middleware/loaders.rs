//! Per-request loader binding
//!
//! [`LoaderMiddleware`] builds a fresh [`LoaderRegistry`] for every request
//! and attaches it to the request extensions before any handler runs.
//! Handlers receive it through the [`RequestLoaders`] extractor and pass it
//! down to resolvers.

use super::request_id::RequestId;
use crate::config::LoaderSettings;
use crate::core::registry::LoaderRegistry;
use crate::server::state::AppState;
use crate::storage::MediaRepository;
use actix_web::dev::{
    Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready,
};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{Ready, ready};
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{Instrument, debug_span};

/// Middleware attaching a request-scoped [`LoaderRegistry`]
#[derive(Clone)]
pub struct LoaderMiddleware {
    repository: Arc<dyn MediaRepository>,
    settings: Arc<LoaderSettings>,
}

impl LoaderMiddleware {
    pub fn new(repository: Arc<dyn MediaRepository>, settings: LoaderSettings) -> Self {
        Self {
            repository,
            settings: Arc::new(settings),
        }
    }

    /// Bind registries to the state's repository and loader settings
    pub fn from_state(state: &AppState) -> Self {
        Self::new(Arc::clone(&state.repository), state.config.loaders.clone())
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoaderMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = LoaderMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoaderMiddlewareService {
            service,
            binder: self.clone(),
        }))
    }
}

/// Service implementation for loader middleware
pub struct LoaderMiddlewareService<S> {
    service: S,
    binder: LoaderMiddleware,
}

impl<S, B> Service<ServiceRequest> for LoaderMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let registry = Arc::new(LoaderRegistry::new(
            Arc::clone(&self.binder.repository),
            &self.binder.settings,
        ));

        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_default();
        req.extensions_mut().insert(registry);

        let span = debug_span!("request_loaders", request_id = %request_id);
        let fut = self.service.call(req);
        Box::pin(async move { fut.await }.instrument(span))
    }
}

/// Extractor for the registry attached by [`LoaderMiddleware`]
///
/// # Panics
///
/// Extraction panics when the route is not wrapped in [`LoaderMiddleware`].
/// That is a wiring mistake, not a condition a client can trigger.
#[derive(Clone)]
pub struct RequestLoaders(Arc<LoaderRegistry>);

impl RequestLoaders {
    pub fn into_inner(self) -> Arc<LoaderRegistry> {
        self.0
    }
}

impl Deref for RequestLoaders {
    type Target = LoaderRegistry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for RequestLoaders {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let registry = req.extensions().get::<Arc<LoaderRegistry>>().cloned();
        match registry {
            Some(registry) => ready(Ok(Self(registry))),
            None => panic!(
                "no loader registry attached to {} {}: wrap the app in LoaderMiddleware",
                req.method(),
                req.path()
            ),
        }
    }
}
