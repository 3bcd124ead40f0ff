//! Router assembly.

pub mod admin;
pub mod common;
pub mod site;

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub use admin::admin_routes;
pub use common::common_routes;
pub use site::site_routes;

/// The whole application: site, admin API and operational routes.
pub fn app(state: AppState) -> Router {
    let body_limit = state.settings.body_limit_bytes;
    Router::new()
        .merge(site_routes())
        .merge(admin_routes(state.clone()))
        .merge(common_routes())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
