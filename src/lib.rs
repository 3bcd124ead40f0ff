//! Shopfront: a blog and shop web backend on SQLite. Accounts with signed
//! session cookies, posts with category labels, a shop/category catalogue and a
//! table-bound admin API.

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod forms;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod view;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::app;
pub use service::CrudService;
pub use state::AppState;
pub use store::{connect, connect_and_migrate};
