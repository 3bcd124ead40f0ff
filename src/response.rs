//! JSON envelopes for admin API responses: `{ "data": ... }` for one row and
//! `{ "data": [...], "meta": { "count", ... } }` for lists.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct One<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct Many<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

#[derive(Serialize)]
pub struct ListMeta {
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// 201 with the created row.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<One<T>>) {
    (StatusCode::CREATED, Json(One { data }))
}

pub fn found<T: Serialize>(data: T) -> (StatusCode, Json<One<T>>) {
    (StatusCode::OK, Json(One { data }))
}

/// A page of rows. `window` is the (limit, offset) the page was read with, if any.
pub fn listed<T: Serialize>(data: Vec<T>, window: Option<(u32, u32)>) -> (StatusCode, Json<Many<T>>) {
    let meta = ListMeta {
        count: data.len() as u64,
        limit: window.map(|(l, _)| l),
        offset: window.map(|(_, o)| o),
    };
    (StatusCode::OK, Json(Many { data, meta }))
}
