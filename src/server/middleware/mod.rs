//! HTTP middleware implementations
//!
//! - Request ID tracking
//! - Per-request loader registry binding

mod loaders;
mod request_id;

pub use loaders::{LoaderMiddleware, LoaderMiddlewareService, RequestLoaders};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdMiddleware, RequestIdMiddlewareService};
