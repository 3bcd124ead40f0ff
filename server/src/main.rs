//! Shopfront server: reads settings from the environment (and `.env`), migrates
//! the database, then serves the site and admin API.
//!
//! Run from repo root: `cargo run -p shopfront-server`

use shopfront::{app, connect_and_migrate, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shopfront=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = connect_and_migrate(&settings).await?;
    let bind_addr = settings.bind_addr.clone();
    let state = AppState::new(pool, settings)?;

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("shopfront listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
