//! Admin API routes. Every route requires a logged-in user.

use crate::extractors::require_user;
use crate::handlers::admin::{create, delete, index, link_category, list, read, unlink_category, update};
use crate::state::AppState;
use axum::{middleware, routing::get, routing::post, Router};

pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(index))
        .route("/admin/:path_segment", get(list).post(create))
        .route("/admin/:path_segment/:id", get(read).patch(update).delete(delete))
        .route(
            "/admin/:path_segment/:id/categories/:category_id",
            post(link_category).delete(unlink_category),
        )
        .route_layer(middleware::from_fn_with_state(state, require_user))
}
