//! PubMed fetch API server.
//!
//! Run with: cargo run

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pubmed_fetch::Config;
use pubmed_fetch::server::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!(
        download_dir = %config.download_dir.display(),
        eutils_base_url = config.effective_eutils_base_url(),
        "Starting PubMed fetch API"
    );

    let state = AppState::new(&config);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
