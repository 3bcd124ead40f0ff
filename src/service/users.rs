//! User persistence: registration, lookup by id (session loader) and by email (login).

use crate::error::AppError;
use crate::models::{NewUser, User};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = r#""id", "name", "email", "password""#;

pub struct UserService;

impl UserService {
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!(r#"SELECT {} FROM "users" WHERE "id" = ?1"#, USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(pool).await?;
        Ok(user)
    }

    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!(r#"SELECT {} FROM "users" WHERE "email" = ?1"#, USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(pool).await?;
        Ok(user)
    }

    pub async fn email_taken(pool: &SqlitePool, email: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "users" WHERE "email" = ?1"#)
            .bind(email)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    /// Insert a user. A duplicate email surfaces as a unique-violation `AppError::Db`.
    pub async fn create(pool: &SqlitePool, new: &NewUser) -> Result<User, AppError> {
        let sql = format!(
            r#"INSERT INTO "users" ("name", "email", "password") VALUES (?1, ?2, ?3) RETURNING {}"#,
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, email = %new.email, "insert user");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.password_hash)
            .fetch_one(pool)
            .await?;
        Ok(user)
    }
}
