//! Shop and catalogue category persistence, including the many-to-many link.

use crate::error::AppError;
use crate::models::{Category, CategoryWithShops, Shop, ShopWithCategories};
use sqlx::SqlitePool;
use std::collections::HashMap;

pub struct ShopService;

impl ShopService {
    pub async fn shops(pool: &SqlitePool) -> Result<Vec<Shop>, AppError> {
        let rows = sqlx::query_as::<_, Shop>(
            r#"SELECT "id", "name", "description", "url", "price", "icon" FROM "shops" ORDER BY "id""#,
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn categories(pool: &SqlitePool) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>(
            r#"SELECT "id", "name", "icon" FROM "categories" ORDER BY "id""#,
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    async fn links(pool: &SqlitePool) -> Result<Vec<(i64, i64)>, AppError> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"SELECT "shop_id", "category_id" FROM "shop_categories" ORDER BY "shop_id", "category_id""#,
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Every shop with the categories it belongs to.
    pub async fn shops_with_categories(pool: &SqlitePool) -> Result<Vec<ShopWithCategories>, AppError> {
        let shops = Self::shops(pool).await?;
        let categories: HashMap<i64, Category> =
            Self::categories(pool).await?.into_iter().map(|c| (c.id, c)).collect();
        let mut by_shop: HashMap<i64, Vec<Category>> = HashMap::new();
        for (shop_id, category_id) in Self::links(pool).await? {
            if let Some(c) = categories.get(&category_id) {
                by_shop.entry(shop_id).or_default().push(c.clone());
            }
        }
        Ok(shops
            .into_iter()
            .map(|shop| ShopWithCategories {
                categories: by_shop.remove(&shop.id).unwrap_or_default(),
                shop,
            })
            .collect())
    }

    /// Every category with the shops linked to it.
    pub async fn categories_with_shops(pool: &SqlitePool) -> Result<Vec<CategoryWithShops>, AppError> {
        let categories = Self::categories(pool).await?;
        let shops: HashMap<i64, Shop> = Self::shops(pool).await?.into_iter().map(|s| (s.id, s)).collect();
        let mut by_category: HashMap<i64, Vec<Shop>> = HashMap::new();
        for (shop_id, category_id) in Self::links(pool).await? {
            if let Some(s) = shops.get(&shop_id) {
                by_category.entry(category_id).or_default().push(s.clone());
            }
        }
        Ok(categories
            .into_iter()
            .map(|category| CategoryWithShops {
                shops: by_category.remove(&category.id).unwrap_or_default(),
                category,
            })
            .collect())
    }

    /// Link a shop to a category. Linking twice is a no-op; unknown ids fail the foreign key.
    pub async fn link(pool: &SqlitePool, shop_id: i64, category_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO "shop_categories" ("shop_id", "category_id") VALUES (?1, ?2) ON CONFLICT DO NOTHING"#,
        )
        .bind(shop_id)
        .bind(category_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a link. Returns false when the pair was not linked.
    pub async fn unlink(pool: &SqlitePool, shop_id: i64, category_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM "shop_categories" WHERE "shop_id" = ?1 AND "category_id" = ?2"#)
            .bind(shop_id)
            .bind(category_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
