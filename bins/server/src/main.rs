//! Talentpool API Server
//!
//! Main entry point for the Talentpool candidate record service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talentpool_api::{AppState, create_router};
use talentpool_core::attachment::{AttachmentConfig, AttachmentStore};
use talentpool_core::candidate::CandidateStore;
use talentpool_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talentpool=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Open the resume store (creates the upload directory if absent)
    let attachment_config = AttachmentConfig::new(config.upload.dir.clone())
        .with_max_file_size(config.upload.max_file_size);
    let attachments = AttachmentStore::open(attachment_config)
        .context("Failed to open resume storage")?;
    info!(upload_dir = %config.upload.dir.display(), "Resume storage ready");

    // Create application state; candidate records live in memory only and
    // are lost on restart.
    let state = AppState {
        registry: Arc::new(CandidateStore::new()),
        attachments: Arc::new(attachments),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    info!("Shutdown signal received");
}
