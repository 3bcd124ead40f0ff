//! Admin model consistency checks.

use crate::admin::model::AdminEntity;
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(entities: &[AdminEntity]) -> Result<(), ConfigError> {
    let mut path_segments = HashSet::new();
    for e in entities {
        if !path_segments.insert(e.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(e.path_segment.clone()));
        }
        let columns: HashSet<&str> = e.columns.iter().map(|c| c.name.as_str()).collect();
        let pk_ok = e
            .column(&e.pk_column)
            .map(|c| c.primary_key)
            .unwrap_or(false);
        if !pk_ok {
            return Err(ConfigError::InvalidPrimaryKey {
                entity: e.path_segment.clone(),
                column: e.pk_column.clone(),
            });
        }
        let referenced = e
            .sensitive_columns
            .iter()
            .chain(e.hashed_columns.iter())
            .chain(e.validation.keys());
        for name in referenced {
            if !columns.contains(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{}: unknown column '{}'",
                    e.path_segment, name
                )));
            }
        }
        for (name, rule) in &e.validation {
            if let Some(pattern) = &rule.pattern {
                regex::Regex::new(pattern).map_err(|err| {
                    ConfigError::Validation(format!("{}.{}: invalid pattern: {}", e.path_segment, name, err))
                })?;
            }
        }
    }
    Ok(())
}
