//! Admin request validation from per-column rules.

use crate::admin::{AdminEntity, ColumnKind, ValidationRule};
use chrono::NaiveDateTime;
use crate::error::AppError;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Loose email shape check: one `@`, a non-empty local part and a dotted domain.
pub fn is_email(s: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"))
        .is_match(s)
}

pub struct RequestValidator;

impl RequestValidator {
    /// Reject keys that are not columns of the entity.
    pub fn known_columns(body: &HashMap<String, Value>, entity: &AdminEntity) -> Result<(), AppError> {
        let mut unknown: Vec<&str> = body
            .keys()
            .filter(|k| entity.column(k).is_none())
            .map(String::as_str)
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort_unstable();
        Err(AppError::BadRequest(format!(
            "unknown column(s) for {}: {}",
            entity.path_segment,
            unknown.join(", ")
        )))
    }

    /// Reject values the column cannot store as its declared kind. Null is left to
    /// the column's NOT NULL constraint.
    pub fn column_types(body: &HashMap<String, Value>, entity: &AdminEntity) -> Result<(), AppError> {
        let mut cols: Vec<&String> = body.keys().collect();
        cols.sort_unstable();
        for col in cols {
            let Some(info) = entity.column(col) else {
                continue;
            };
            let v = &body[col];
            if v.is_null() {
                continue;
            }
            let ok = match info.kind {
                ColumnKind::Integer => v.as_i64().is_some(),
                ColumnKind::Text => v.is_string(),
                ColumnKind::DateTime => v.as_str().map(is_datetime).unwrap_or(false),
            };
            if !ok {
                let expected = match info.kind {
                    ColumnKind::Integer => "an integer",
                    ColumnKind::Text => "a string",
                    ColumnKind::DateTime => "a date-time like 2024-01-31 12:00:00",
                };
                return Err(AppError::Validation(format!("{} must be {}", col, expected)));
            }
        }
        Ok(())
    }

    /// Validate body against per-column rules. All required fields must be present.
    pub fn validate(
        body: &HashMap<String, Value>,
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<(), AppError> {
        for (col, rule) in rules {
            let val = body.get(col);
            if rule.required == Some(true) && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", col)));
            }
            if let Some(v) = val {
                validate_field(col, v, rule)?;
            }
        }
        Ok(())
    }

    /// Validate only the fields present in body (for PATCH). Required fields may be
    /// absent but not explicitly null.
    pub fn validate_partial(
        body: &HashMap<String, Value>,
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<(), AppError> {
        for (col, v) in body {
            if let Some(rule) = rules.get(col) {
                if rule.required == Some(true) && v.is_null() {
                    return Err(AppError::Validation(format!("{} is required", col)));
                }
                validate_field(col, v, rule)?;
            }
        }
        Ok(())
    }
}

fn validate_field(col: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    if let Some(format) = &rule.format {
        validate_format(col, v, format)?;
    }
    if let Some(s) = v.as_str() {
        let len = s.chars().count();
        if let Some(max) = rule.max_length {
            if len > max as usize {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    col, max
                )));
            }
        }
        if let Some(min) = rule.min_length {
            if len < min as usize {
                return Err(AppError::Validation(format!(
                    "{} must be at least {} characters",
                    col, min
                )));
            }
        }
        if let Some(ref pattern) = rule.pattern {
            let re = Regex::new(pattern).map_err(|_| AppError::Validation(format!("invalid pattern for {}", col)))?;
            if !re.is_match(s) {
                return Err(AppError::Validation(format!("{} does not match required pattern", col)));
            }
        }
    }
    if let Some(n) = v.as_f64() {
        if let Some(min) = rule.minimum {
            if n < min {
                return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
            }
        }
    }
    Ok(())
}

/// The layouts SQLite's `CURRENT_TIMESTAMP` and ISO 8601 clients produce.
fn is_datetime(s: &str) -> bool {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .any(|layout| NaiveDateTime::parse_from_str(s, layout).is_ok())
}

fn validate_format(col: &str, v: &Value, format: &str) -> Result<(), AppError> {
    if format.eq_ignore_ascii_case("email") {
        if let Some(s) = v.as_str() {
            if !is_email(s) {
                return Err(AppError::Validation(format!("{} must be a valid email", col)));
            }
        }
    }
    Ok(())
}
