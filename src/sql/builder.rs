//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for an admin entity.

use crate::admin::AdminEntity;
use serde_json::Value;
use std::collections::HashMap;

/// Largest page the list query returns.
pub const MAX_LIMIT: u32 = 1000;

/// Quote identifier (safe: only from the admin model).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its numbered placeholder (`?1`, `?2`, ...).
    fn push_param(&mut self, v: Value) -> String {
        self.params.push(v);
        format!("?{}", self.params.len())
    }
}

fn select_column_list(entity: &AdminEntity) -> String {
    entity
        .columns
        .iter()
        .map(|c| quoted(&c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key. Caller adds id as sole param.
pub fn select_by_id(entity: &AdminEntity) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        select_column_list(entity),
        quoted(&entity.table_name),
        quoted(&entity.pk_column)
    );
    q
}

/// SELECT list with optional filters (exact match per column), ORDER BY pk, optional LIMIT/OFFSET.
/// Filters on columns the entity does not have are ignored.
pub fn select_list(
    entity: &AdminEntity,
    filters: &[(String, Value)],
    limit: Option<u32>,
    offset: Option<u32>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in filters {
        if entity.column(col).is_some() {
            let ph = q.push_param(val.clone());
            where_parts.push(format!("{} = {}", quoted(col), ph));
        }
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
    let limit_clause = match (limit, offset) {
        (Some(n), _) => format!(" LIMIT {}", n.min(MAX_LIMIT)),
        (None, Some(_)) => " LIMIT -1".to_string(),
        (None, None) => String::new(),
    };
    let offset_clause = offset.map(|n| format!(" OFFSET {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}{}{}",
        select_column_list(entity),
        quoted(&entity.table_name),
        where_clause,
        quoted(&entity.pk_column),
        limit_clause,
        offset_clause
    );
    q
}

/// INSERT: columns and placeholders from entity; values from body.
/// Omits columns with a DB default when body does not provide a value.
pub fn insert(entity: &AdminEntity, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in &entity.columns {
        let val = body.get(&c.name).cloned();
        if val.is_none() && c.has_default {
            continue;
        }
        let ph = q.push_param(val.unwrap_or(Value::Null));
        cols.push(quoted(&c.name));
        placeholders.push(ph);
    }
    let table = quoted(&entity.table_name);
    let returning = select_column_list(entity);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only columns present in body (and in entity columns).
/// With nothing to set it degrades to a SELECT by id.
pub fn update(entity: &AdminEntity, id: &Value, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = quoted(&entity.table_name);
    let pk = quoted(&entity.pk_column);
    let mut names: Vec<&String> = body
        .keys()
        .filter(|k| **k != entity.pk_column && entity.column(k).is_some())
        .collect();
    names.sort();
    let mut sets = Vec::new();
    for name in names {
        let ph = q.push_param(body[name].clone());
        sets.push(format!("{} = {}", quoted(name), ph));
    }
    let returning = select_column_list(entity);
    let id_ph = q.push_param(id.clone());
    q.sql = if sets.is_empty() {
        format!("SELECT {} FROM {} WHERE {} = {}", returning, table, pk, id_ph)
    } else {
        format!(
            "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
            table,
            sets.join(", "),
            pk,
            id_ph,
            returning
        )
    };
    q
}

/// DELETE by id. Caller adds id as sole param.
pub fn delete(entity: &AdminEntity) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ?1 RETURNING {}",
        quoted(&entity.table_name),
        quoted(&entity.pk_column),
        select_column_list(entity)
    );
    q
}
