//! The tables exposed in the admin panel.

use crate::admin::model::*;
use crate::error::ConfigError;
use std::collections::{HashMap, HashSet};

struct EntityDef {
    entity: AdminEntity,
}

impl EntityDef {
    /// Table with an autoincrement integer `id` primary key and every operation enabled.
    fn table(name: &str) -> Self {
        EntityDef {
            entity: AdminEntity {
                table_name: name.into(),
                path_segment: name.into(),
                pk_column: "id".into(),
                columns: vec![ColumnInfo {
                    name: "id".into(),
                    kind: ColumnKind::Integer,
                    nullable: false,
                    has_default: true,
                    primary_key: true,
                }],
                operations: Operation::ALL.to_vec(),
                sensitive_columns: HashSet::new(),
                hashed_columns: HashSet::new(),
                validation: HashMap::new(),
            },
        }
    }

    fn column(mut self, name: &str, kind: ColumnKind, nullable: bool) -> Self {
        self.entity.columns.push(ColumnInfo {
            name: name.into(),
            kind,
            nullable,
            has_default: false,
            primary_key: false,
        });
        self
    }

    fn defaulted(mut self, name: &str, kind: ColumnKind) -> Self {
        self.entity.columns.push(ColumnInfo {
            name: name.into(),
            kind,
            nullable: false,
            has_default: true,
            primary_key: false,
        });
        self
    }

    fn rule(mut self, column: &str, rule: ValidationRule) -> Self {
        self.entity.validation.insert(column.into(), rule);
        self
    }

    fn secret(mut self, column: &str) -> Self {
        self.entity.sensitive_columns.insert(column.into());
        self.entity.hashed_columns.insert(column.into());
        self
    }

    fn build(self) -> AdminEntity {
        self.entity
    }
}

fn required() -> ValidationRule {
    ValidationRule {
        required: Some(true),
        ..Default::default()
    }
}

fn required_text(max_length: u32) -> ValidationRule {
    ValidationRule {
        required: Some(true),
        min_length: Some(1),
        max_length: Some(max_length),
        ..Default::default()
    }
}

fn non_negative() -> ValidationRule {
    ValidationRule {
        minimum: Some(0.0),
        ..Default::default()
    }
}

/// Users, posts, post categories, shops and catalogue categories.
pub fn default_model() -> Result<AdminModel, ConfigError> {
    use ColumnKind::*;

    let users = EntityDef::table("users")
        .column("name", Text, false)
        .column("email", Text, false)
        .column("password", Text, false)
        .rule("name", required_text(100))
        .rule(
            "email",
            ValidationRule {
                format: Some("email".into()),
                ..required_text(100)
            },
        )
        .rule("password", required_text(128))
        .secret("password")
        .build();

    let posts = EntityDef::table("posts")
        .column("title", Text, false)
        .column("subtitle", Text, false)
        .defaulted("date", DateTime)
        .column("description", Text, false)
        .column("price", Integer, true)
        .column("img_url", Text, false)
        .column("author_id", Integer, false)
        .rule("title", required_text(250))
        .rule("subtitle", required_text(250))
        .rule("description", required_text(u32::MAX))
        .rule("img_url", required_text(250))
        .rule("author_id", required())
        .rule("price", non_negative())
        .build();

    let post_categories = EntityDef::table("post_categories")
        .column("category", Text, false)
        .column("post_id", Integer, false)
        .rule("category", required_text(100))
        .rule("post_id", required())
        .build();

    let shops = EntityDef::table("shops")
        .column("name", Text, false)
        .column("description", Text, true)
        .column("url", Text, true)
        .column("price", Integer, true)
        .column("icon", Text, true)
        .rule("name", required_text(250))
        .rule(
            "url",
            ValidationRule {
                pattern: Some("^https?://".into()),
                ..Default::default()
            },
        )
        .rule("price", non_negative())
        .build();

    let categories = EntityDef::table("categories")
        .column("name", Text, false)
        .column("icon", Text, true)
        .rule("name", required_text(100))
        .build();

    AdminModel::new(vec![users, posts, post_categories, shops, categories])
}
