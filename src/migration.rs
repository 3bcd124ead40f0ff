//! Schema DDL for every table, applied in foreign-key dependency order.
//! Idempotent: tables and indexes use IF NOT EXISTS.

use crate::error::AppError;
use sqlx::SqlitePool;

/// Table DDL in dependency order (referenced tables first).
pub const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS "users" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL CHECK (length("name") <= 100),
            "email" TEXT NOT NULL UNIQUE CHECK (length("email") <= 100),
            "password" TEXT NOT NULL
        )
        "#,
    ),
    (
        "posts",
        r#"
        CREATE TABLE IF NOT EXISTS "posts" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "title" TEXT NOT NULL UNIQUE CHECK (length("title") <= 250),
            "subtitle" TEXT NOT NULL CHECK (length("subtitle") <= 250),
            "date" DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            "description" TEXT NOT NULL,
            "price" INTEGER,
            "img_url" TEXT NOT NULL CHECK (length("img_url") <= 250),
            "author_id" INTEGER NOT NULL REFERENCES "users" ("id")
        )
        "#,
    ),
    (
        "post_categories",
        r#"
        CREATE TABLE IF NOT EXISTS "post_categories" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "category" TEXT NOT NULL,
            "post_id" INTEGER NOT NULL REFERENCES "posts" ("id") ON DELETE CASCADE
        )
        "#,
    ),
    (
        "shops",
        r#"
        CREATE TABLE IF NOT EXISTS "shops" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL,
            "description" TEXT,
            "url" TEXT,
            "price" INTEGER,
            "icon" TEXT
        )
        "#,
    ),
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS "categories" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL,
            "icon" TEXT
        )
        "#,
    ),
    (
        "shop_categories",
        r#"
        CREATE TABLE IF NOT EXISTS "shop_categories" (
            "shop_id" INTEGER NOT NULL REFERENCES "shops" ("id") ON DELETE CASCADE,
            "category_id" INTEGER NOT NULL REFERENCES "categories" ("id") ON DELETE CASCADE,
            PRIMARY KEY ("shop_id", "category_id")
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    r#"CREATE INDEX IF NOT EXISTS "posts_author_id_idx" ON "posts" ("author_id")"#,
    r#"CREATE INDEX IF NOT EXISTS "post_categories_post_id_idx" ON "post_categories" ("post_id")"#,
    r#"CREATE INDEX IF NOT EXISTS "shop_categories_category_id_idx" ON "shop_categories" ("category_id")"#,
];

/// Create all tables and indexes that do not exist yet.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    for (name, ddl) in TABLES {
        tracing::debug!(table = %name, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(tables = TABLES.len(), "schema ready");
    Ok(())
}
