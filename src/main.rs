use hr_portal::{
    config::Config,
    routes::app,
    state::AppState,
    store::{DocumentStore, MemoryStore, PgDocumentStore},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ─── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hr_portal=debug,tower_http=info")),
        )
        .init();

    // ─── Config ───────────────────────────────────────────────────────────────
    let config = Config::from_env()?;
    let addr = config.server_addr();

    // ─── Store ────────────────────────────────────────────────────────────────
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => {
            Arc::new(PgDocumentStore::connect(url, config.database_max_connections).await?)
        }
        None => {
            warn!("DATABASE_URL is not set; records are kept in memory and lost on exit");
            Arc::new(MemoryStore::default())
        }
    };

    // ─── App State ────────────────────────────────────────────────────────────
    let backend = store.backend();
    let state = AppState::new(store, config);

    // ─── Start Server ─────────────────────────────────────────────────────────
    info!("🚀 HR Portal API listening on http://{} ({} store)", addr, backend);
    info!("📖 Swagger UI:  http://{}/docs", addr);
    info!("❤️  Health:      http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
