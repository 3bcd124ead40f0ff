//! Admin entity descriptors, resolved once at startup.

use crate::error::ConfigError;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Text,
    DateTime,
}

#[derive(Clone, Debug, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub nullable: bool,
    /// Whether the column has a DB default (autoincrement id, CURRENT_TIMESTAMP).
    pub has_default: bool,
    pub primary_key: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [Operation::Read, Operation::Create, Operation::Update, Operation::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AdminEntity {
    pub table_name: String,
    pub path_segment: String,
    pub pk_column: String,
    pub columns: Vec<ColumnInfo>,
    pub operations: Vec<Operation>,
    /// Column names stripped from every admin response.
    #[serde(skip)]
    pub sensitive_columns: HashSet<String>,
    /// Column names whose written values are replaced by a bcrypt hash.
    #[serde(skip)]
    pub hashed_columns: HashSet<String>,
    pub validation: HashMap<String, ValidationRule>,
}

impl AdminEntity {
    pub fn allows(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Clone, Debug)]
pub struct AdminModel {
    entities: Vec<AdminEntity>,
    entity_by_path: HashMap<String, usize>,
}

impl AdminModel {
    /// Build the model, rejecting inconsistent descriptors.
    pub fn new(entities: Vec<AdminEntity>) -> Result<Self, ConfigError> {
        super::validate(&entities)?;
        let entity_by_path = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.path_segment.clone(), i))
            .collect();
        Ok(AdminModel {
            entities,
            entity_by_path,
        })
    }

    pub fn entity_by_path(&self, path: &str) -> Option<&AdminEntity> {
        self.entity_by_path.get(path).map(|&i| &self.entities[i])
    }

    pub fn entities(&self) -> &[AdminEntity] {
        &self.entities
    }
}
