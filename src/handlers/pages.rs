//! Read-only site pages: post listing, post detail and the shop catalogue.

use crate::error::AppError;
use crate::extractors::Session;
use crate::service::{PostService, ShopService};
use crate::state::AppState;
use crate::view::Page;
use axum::extract::{Path, State};

pub async fn index(State(state): State<AppState>, session: Session) -> Result<Page, AppError> {
    let posts = PostService::list(&state.pool).await?;
    Page::new("index.html", "Home", &session).data(&posts)
}

/// Post category labels with how many posts carry each.
pub async fn categories(State(state): State<AppState>, session: Session) -> Result<Page, AppError> {
    let counts = PostService::category_counts(&state.pool).await?;
    Page::new("shop.html", "About", &session).data(&counts)
}

pub async fn shop(State(state): State<AppState>, session: Session) -> Result<Page, AppError> {
    let categories = ShopService::categories_with_shops(&state.pool).await?;
    Page::new("shop.html", "Shop", &session).data(&categories)
}

pub async fn product(State(state): State<AppState>, session: Session) -> Result<Page, AppError> {
    let shops = ShopService::shops_with_categories(&state.pool).await?;
    Page::new("product.html", "Products", &session).data(&shops)
}

pub async fn product_detail(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Page, AppError> {
    let detail = PostService::detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;
    Page::new("product-details.html", "Product", &session).data(&detail)
}
