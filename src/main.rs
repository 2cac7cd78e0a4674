use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use grip_invest::app;
use grip_invest::config::AppConfig;
use grip_invest::errors;
use grip_invest::logging::{init_logging, LoggingConfig};
use grip_invest::state::AppState;
use grip_invest::store::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;
    errors::expose_error_details(!config.is_production());

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("✅ Database connected and migrated");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Environment: {}", config.environment);
    let state = AppState::new(Arc::new(PgStore::new(pool)), config);
    let app = app::create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Grip Invest backend running at http://{}/", addr);
    tracing::info!("Health check: http://{}/health", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
