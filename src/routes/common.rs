//! Operational routes: liveness, readiness (database and schema) and build version.

use crate::migration::TABLES;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
    schema: &'static str,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Count the application tables that exist; all of them must for the app to serve.
async fn schema_tables(state: &AppState) -> Result<i64, sqlx::Error> {
    let names: Vec<&str> = TABLES.iter().map(|(name, _)| *name).collect();
    let placeholders = (1..=names.len()).map(|i| format!("?{}", i)).collect::<Vec<_>>().join(", ");
    let sql = format!(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ({})",
        placeholders
    );
    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for name in names {
        query = query.bind(name);
    }
    query.fetch_one(&state.pool).await
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let (status, readiness) = match schema_tables(&state).await {
        Ok(n) if n as usize == TABLES.len() => (
            StatusCode::OK,
            Readiness {
                status: "ok",
                database: "ok",
                schema: "ok",
            },
        ),
        Ok(n) => {
            tracing::warn!(found = n, expected = TABLES.len(), "schema incomplete");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Readiness {
                    status: "degraded",
                    database: "ok",
                    schema: "missing",
                },
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Readiness {
                    status: "degraded",
                    database: "unavailable",
                    schema: "unknown",
                },
            )
        }
    };
    (status, Json(readiness))
}

async fn version() -> Json<serde_json::Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
}
