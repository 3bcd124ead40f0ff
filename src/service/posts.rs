//! Post persistence. Categories are written with their post and removed by cascade.

use crate::error::AppError;
use crate::models::{CategoryCount, NewPost, Post, PostCategory, PostDetail};
use sqlx::SqlitePool;

const POST_COLUMNS: &str =
    r#""id", "title", "subtitle", "date", "description", "price", "img_url", "author_id""#;

pub struct PostService;

impl PostService {
    /// All posts in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Post>, AppError> {
        let sql = format!(r#"SELECT {} FROM "posts" ORDER BY "id""#, POST_COLUMNS);
        let posts = sqlx::query_as::<_, Post>(&sql).fetch_all(pool).await?;
        Ok(posts)
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Post>, AppError> {
        let sql = format!(r#"SELECT {} FROM "posts" WHERE "id" = ?1"#, POST_COLUMNS);
        let post = sqlx::query_as::<_, Post>(&sql).bind(id).fetch_optional(pool).await?;
        Ok(post)
    }

    /// Post with author name and category labels, or None when the id is unknown.
    pub async fn detail(pool: &SqlitePool, id: i64) -> Result<Option<PostDetail>, AppError> {
        let Some(post) = Self::find(pool, id).await? else {
            return Ok(None);
        };
        let author_name: String = sqlx::query_scalar(r#"SELECT "name" FROM "users" WHERE "id" = ?1"#)
            .bind(post.author_id)
            .fetch_one(pool)
            .await?;
        let categories = Self::categories(pool, id)
            .await?
            .into_iter()
            .map(|c| c.category)
            .collect();
        Ok(Some(PostDetail {
            post,
            author_name,
            categories,
        }))
    }

    pub async fn categories(pool: &SqlitePool, post_id: i64) -> Result<Vec<PostCategory>, AppError> {
        let rows = sqlx::query_as::<_, PostCategory>(
            r#"SELECT "id", "category", "post_id" FROM "post_categories" WHERE "post_id" = ?1 ORDER BY "id""#,
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Distinct category labels across all posts, alphabetical.
    pub async fn category_counts(pool: &SqlitePool) -> Result<Vec<CategoryCount>, AppError> {
        let rows = sqlx::query_as::<_, CategoryCount>(
            r#"SELECT "category", COUNT(DISTINCT "post_id") AS "posts" FROM "post_categories" GROUP BY "category" ORDER BY "category""#,
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Insert the post and its categories in one transaction. A duplicate title
    /// surfaces as a unique-violation `AppError::Db`.
    pub async fn create(pool: &SqlitePool, new: &NewPost) -> Result<Post, AppError> {
        let sql = format!(
            r#"INSERT INTO "posts" ("title", "subtitle", "description", "price", "img_url", "author_id") VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {}"#,
            POST_COLUMNS
        );
        tracing::debug!(sql = %sql, title = %new.title, "insert post");
        let mut tx = pool.begin().await?;
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(&new.title)
            .bind(&new.subtitle)
            .bind(&new.description)
            .bind(new.price)
            .bind(&new.img_url)
            .bind(new.author_id)
            .fetch_one(&mut *tx)
            .await?;
        for label in &new.categories {
            sqlx::query(r#"INSERT INTO "post_categories" ("category", "post_id") VALUES (?1, ?2)"#)
                .bind(label)
                .bind(post.id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(post)
    }

    /// Delete a post; its categories go with it. Returns false when nothing was deleted.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM "posts" WHERE "id" = ?1"#)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
