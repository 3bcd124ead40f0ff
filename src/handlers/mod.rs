//! HTTP handlers: server-rendered site pages and the JSON admin API.

pub mod admin;
pub mod auth;
pub mod pages;
pub mod posts;
