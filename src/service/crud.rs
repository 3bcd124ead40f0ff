//! Generic CRUD execution against SQLite for admin entities.

use crate::admin::AdminEntity;
use crate::error::AppError;
use crate::sql::{bind_all, delete, insert, select_by_id, select_list, update, QueryBuf, MAX_LIMIT};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: u32 = 100;

pub struct CrudService;

impl CrudService {
    /// Effective (limit, offset): limit defaults to 100 and is capped at 1000, offset defaults to 0.
    pub fn window(limit: Option<u32>, offset: Option<u32>) -> (u32, u32) {
        (limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT), offset.unwrap_or(0))
    }

    /// List rows matching every filter exactly, within `window` (see `window`).
    pub async fn list(
        pool: &SqlitePool,
        entity: &AdminEntity,
        filters: &[(String, Value)],
        (limit, offset): (u32, u32),
    ) -> Result<Vec<Value>, AppError> {
        let q = select_list(entity, filters, Some(limit), Some(offset));
        let rows = Self::fetch_all(pool, &q).await?;
        Ok(rows.iter().map(|r| row_to_json(r, entity)).collect())
    }

    /// Fetch one row by primary key. Returns JSON object or None.
    pub async fn read(pool: &SqlitePool, entity: &AdminEntity, id: &Value) -> Result<Option<Value>, AppError> {
        let mut q = select_by_id(entity);
        q.params.push(id.clone());
        let row = Self::fetch_optional(pool, &q).await?;
        Ok(row.map(|r| row_to_json(&r, entity)))
    }

    /// Insert one row; PK comes from the database unless provided. Returns created row.
    pub async fn create(
        pool: &SqlitePool,
        entity: &AdminEntity,
        body: &HashMap<String, Value>,
    ) -> Result<Value, AppError> {
        let q = insert(entity, body);
        let row = Self::fetch_optional(pool, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        Ok(row_to_json(&row, entity))
    }

    /// Update one row by id. Returns updated row, or None if the id does not exist.
    pub async fn update(
        pool: &SqlitePool,
        entity: &AdminEntity,
        id: &Value,
        body: &HashMap<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let q = update(entity, id, body);
        let row = Self::fetch_optional(pool, &q).await?;
        Ok(row.map(|r| row_to_json(&r, entity)))
    }

    /// Delete one row by id. Returns deleted row or None. Dependent rows follow the
    /// schema's ON DELETE rules.
    pub async fn delete(pool: &SqlitePool, entity: &AdminEntity, id: &Value) -> Result<Option<Value>, AppError> {
        let mut q = delete(entity);
        q.params.push(id.clone());
        let row = Self::fetch_optional(pool, &q).await?;
        Ok(row.map(|r| row_to_json(&r, entity)))
    }

    async fn fetch_optional(pool: &SqlitePool, q: &QueryBuf) -> Result<Option<SqliteRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params).fetch_optional(pool).await?;
        Ok(row)
    }

    async fn fetch_all(pool: &SqlitePool, q: &QueryBuf) -> Result<Vec<SqliteRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params).fetch_all(pool).await?;
        Ok(rows)
    }
}

/// Row as a JSON object keyed by column name, minus the entity's sensitive columns.
fn row_to_json(row: &SqliteRow, entity: &AdminEntity) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        if entity.sensitive_columns.contains(name) {
            continue;
        }
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

/// Decode by the value's storage class: INTEGER, REAL, then TEXT.
fn cell_to_value(row: &SqliteRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
