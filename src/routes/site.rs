//! Server-rendered site: listing, catalogue, auth and post management.

use crate::handlers::{auth, pages, posts};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/home", get(pages::index))
        .route("/categories", get(pages::categories))
        .route("/shop", get(pages::shop))
        .route("/product", get(pages::product))
        .route("/product/:id", get(pages::product_detail))
        .route("/product/:id/delete", post(posts::delete_post))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/create_post", get(posts::create_post_form).post(posts::create_post))
}
