use std::net::SocketAddr;
use std::sync::Arc;

use recruitment_workflow::{
    config::{get_config, init_config},
    database::{
        memory::MemoryStore,
        pool::{create_pool, run_migrations},
        postgres::PgStore,
        store::RecruitmentStore,
    },
    routes, telemetry,
    utils::time::SystemClock,
    AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    telemetry::init(config.log_format)?;

    let store: Arc<dyn RecruitmentStore> = match &config.database_url {
        Some(_) => {
            let pool = create_pool(config).await?;
            run_migrations(&pool).await?;
            info!("Using PostgreSQL store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set, falling back to the in-memory store; data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let app_state = AppState::new(store, Arc::new(SystemClock));
    let app = routes::router(app_state, config.public_rps);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
