pub mod config;
pub mod routes;
pub mod state;
pub mod static_files;
pub mod ws;

pub use config::*;
pub use routes::router;
pub use state::*;

use std::sync::Arc;

use crate::broadcast::BroadcastChannel;
use crate::database::Database;
use crate::docs::SqliteDocumentRepository;

/// Open the database, wire up shared state and serve until ctrl-c.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(&config.db_path)?;
    let repository = Arc::new(SqliteDocumentRepository::new(db));
    let channel = BroadcastChannel::new(config.broadcast_capacity);
    let state = AppState::new(repository, channel, config.public_dir.clone());

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("office server running at http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        return;
    }
    tracing::info!("shutting down");
}
