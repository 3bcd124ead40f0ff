use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub price: Option<i64>,
    pub icon: Option<String>,
}

/// Catalogue category, linked to shops many-to-many. Unrelated to post categories.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopWithCategories {
    #[serde(flatten)]
    pub shop: Shop,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithShops {
    #[serde(flatten)]
    pub category: Category,
    pub shops: Vec<Shop>,
}
