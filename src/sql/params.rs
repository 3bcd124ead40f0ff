//! Convert serde_json::Value to types that sqlx can bind on SQLite.

use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A value that can be bound to a SQLite query.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Text(String),
}

impl BindValue {
    /// Arrays and objects are stored as their JSON text.
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => BindValue::Null,
            Value::Bool(b) => BindValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => BindValue::I64(i),
                None => BindValue::F64(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => BindValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => BindValue::Text(v.to_string()),
        }
    }

    pub fn bind_to(self, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        match self {
            BindValue::Null => query.bind(None::<i64>),
            BindValue::Bool(b) => query.bind(b),
            BindValue::I64(n) => query.bind(n),
            BindValue::F64(n) => query.bind(n),
            BindValue::Text(s) => query.bind(s),
        }
    }
}

/// Bind every param of `params` in order.
pub fn bind_all<'q>(mut query: SqliteQuery<'q>, params: &[Value]) -> SqliteQuery<'q> {
    for p in params {
        query = BindValue::from_json(p).bind_to(query);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_keep_integer_precision() {
        assert_eq!(BindValue::from_json(&json!(9007199254740993i64)), BindValue::I64(9007199254740993));
        assert_eq!(BindValue::from_json(&json!(1.5)), BindValue::F64(1.5));
    }

    #[test]
    fn structured_values_become_json_text() {
        assert_eq!(
            BindValue::from_json(&json!({"a": [1]})),
            BindValue::Text(r#"{"a":[1]}"#.into())
        );
        assert_eq!(BindValue::from_json(&Value::Null), BindValue::Null);
    }
}
