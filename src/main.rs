//! Inventory server: loads config, ensures the SQLite schema, serves the HTML routes.

use asset_inventory::{app, connect, ensure_schema, AppConfig, AppState, EntityRegistry};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("asset_inventory=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY not set; using the built-in default");
    }

    let pool = connect(&config.database_path).await?;
    let registry = EntityRegistry::default();
    ensure_schema(&pool, &registry).await?;
    tracing::info!(path = %config.database_path.display(), "database ready");

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    let state = AppState::new(pool, config, registry);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
