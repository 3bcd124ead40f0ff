//! Admin panel handlers: generic CRUD over the registered tables, plus the
//! shop/category link.

use crate::admin::{AdminEntity, ColumnKind, Operation};
use crate::auth::hash_password;
use crate::error::AppError;
use crate::response::{created, found, listed};
use crate::service::{CrudService, RequestValidator, ShopService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

fn resolve<'a>(state: &'a AppState, path_segment: &str, op: Operation) -> Result<&'a AdminEntity, AppError> {
    let entity = state
        .admin
        .entity_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(format!("entity {}", path_segment)))?;
    if !entity.allows(op) {
        return Err(AppError::BadRequest(format!("{} not allowed on {}", op.as_str(), path_segment)));
    }
    Ok(entity)
}

fn parse_key(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

fn parse_id(id_str: &str) -> Result<Value, AppError> {
    Ok(Value::Number(parse_key(id_str)?.into()))
}

fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Query strings are untyped; integer columns compare as integers.
fn query_value_for_column(entity: &AdminEntity, col: &str, s: &str) -> Value {
    let is_int = entity
        .column(col)
        .map(|c| c.kind == ColumnKind::Integer)
        .unwrap_or(false);
    if is_int {
        if let Ok(n) = s.parse::<i64>() {
            return Value::Number(n.into());
        }
    }
    Value::String(s.to_string())
}

/// Replace plaintext values of hashed columns with their bcrypt hash.
async fn hash_columns(
    state: &AppState,
    entity: &AdminEntity,
    body: &mut HashMap<String, Value>,
) -> Result<(), AppError> {
    for col in &entity.hashed_columns {
        if let Some(Value::String(plain)) = body.get(col) {
            let hashed = hash_password(plain.clone(), state.settings.bcrypt_cost).await?;
            body.insert(col.clone(), Value::String(hashed));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct EntitySummary<'a> {
    path: &'a str,
    table: &'a str,
    primary_key: &'a str,
    columns: Vec<ColumnSummary<'a>>,
    operations: &'a [Operation],
}

#[derive(Serialize)]
struct ColumnSummary<'a> {
    name: &'a str,
    kind: ColumnKind,
    nullable: bool,
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let entities: Vec<EntitySummary> = state
        .admin
        .entities()
        .iter()
        .map(|e| EntitySummary {
            path: &e.path_segment,
            table: &e.table_name,
            primary_key: &e.pk_column,
            columns: e
                .columns
                .iter()
                .filter(|c| !e.sensitive_columns.contains(&c.name))
                .map(|c| ColumnSummary {
                    name: &c.name,
                    kind: c.kind,
                    nullable: c.nullable,
                })
                .collect(),
            operations: &e.operations,
        })
        .collect();
    listed(entities, None).into_response()
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment, Operation::Read)?;
    let mut limit: Option<u32> = None;
    let mut offset: Option<u32> = None;
    let mut filters: Vec<(String, Value)> = Vec::new();

    for (k, v) in params {
        match k.as_str() {
            "limit" => {
                limit = Some(v.parse().map_err(|_| AppError::BadRequest(format!("invalid limit: {}", v)))?);
            }
            "offset" => {
                offset = Some(v.parse().map_err(|_| AppError::BadRequest(format!("invalid offset: {}", v)))?);
            }
            _ => {
                if entity.column(&k).is_none() || entity.sensitive_columns.contains(&k) {
                    return Err(AppError::BadRequest(format!("unknown filter column: {}", k)));
                }
                let val = query_value_for_column(entity, &k, &v);
                filters.push((k, val));
            }
        }
    }
    filters.sort_by(|a, b| a.0.cmp(&b.0));

    let window = CrudService::window(limit, offset);
    let rows = CrudService::list(&state.pool, entity, &filters, window).await?;
    Ok(listed(rows, Some(window)))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment, Operation::Create)?;
    let mut body = body_to_map(body)?;
    RequestValidator::known_columns(&body, entity)?;
    RequestValidator::column_types(&body, entity)?;
    RequestValidator::validate(&body, &entity.validation)?;
    hash_columns(&state, entity, &mut body).await?;
    let row = CrudService::create(&state.pool, entity, &body).await?;
    tracing::info!(entity = %entity.path_segment, id = %row[&entity.pk_column], "admin created row");
    Ok(created(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment, Operation::Read)?;
    let id = parse_id(&id_str)?;
    let row = CrudService::read(&state.pool, entity, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", path_segment, id_str)))?;
    Ok(found(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment, Operation::Update)?;
    let id = parse_id(&id_str)?;
    let mut body = body_to_map(body)?;
    if body.contains_key(&entity.pk_column) {
        return Err(AppError::BadRequest(format!("{} cannot be changed", entity.pk_column)));
    }
    RequestValidator::known_columns(&body, entity)?;
    RequestValidator::column_types(&body, entity)?;
    RequestValidator::validate_partial(&body, &entity.validation)?;
    hash_columns(&state, entity, &mut body).await?;
    let row = CrudService::update(&state.pool, entity, &id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", path_segment, id_str)))?;
    tracing::info!(entity = %entity.path_segment, id = %id, "admin updated row");
    Ok(found(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment, Operation::Delete)?;
    let id = parse_id(&id_str)?;
    let row = CrudService::delete(&state.pool, entity, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", path_segment, id_str)))?;
    tracing::info!(entity = %entity.path_segment, id = %id, "admin deleted row");
    Ok(found(row))
}

/// Only shops carry category links, and both ends of a link must exist.
async fn link_ends(state: &AppState, path_segment: &str, shop: &str, category: &str) -> Result<(i64, i64), AppError> {
    if path_segment != "shops" {
        return Err(AppError::NotFound(format!("{} has no category links", path_segment)));
    }
    let shops = resolve(state, "shops", Operation::Update)?;
    let categories = resolve(state, "categories", Operation::Read)?;
    let shop_id = parse_key(shop)?;
    let category_id = parse_key(category)?;
    if CrudService::read(&state.pool, shops, &Value::from(shop_id)).await?.is_none() {
        return Err(AppError::NotFound(format!("shops {}", shop)));
    }
    if CrudService::read(&state.pool, categories, &Value::from(category_id)).await?.is_none() {
        return Err(AppError::NotFound(format!("categories {}", category)));
    }
    Ok((shop_id, category_id))
}

pub async fn link_category(
    State(state): State<AppState>,
    Path((path_segment, shop, category)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (shop_id, category_id) = link_ends(&state, &path_segment, &shop, &category).await?;
    ShopService::link(&state.pool, shop_id, category_id).await?;
    tracing::info!(shop_id, category_id, "admin linked shop to category");
    Ok(created(json!({ "shop_id": shop_id, "category_id": category_id })))
}

pub async fn unlink_category(
    State(state): State<AppState>,
    Path((path_segment, shop, category)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (shop_id, category_id) = link_ends(&state, &path_segment, &shop, &category).await?;
    if !ShopService::unlink(&state.pool, shop_id, category_id).await? {
        return Err(AppError::NotFound(format!("link {} -> {}", shop_id, category_id)));
    }
    tracing::info!(shop_id, category_id, "admin unlinked shop from category");
    Ok(StatusCode::NO_CONTENT)
}
