use anyhow::Result;
use carebook_storage::RecordStore;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use carebook_server::app;
use carebook_server::config::ServerConfig;
use carebook_server::state::AppState;

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  carebook-server [config.toml]    Start the server (default: config/server.toml)");
    eprintln!("  carebook-server --help           Show this message");
}

#[tokio::main]
async fn main() -> Result<()> {
    carebook_common::id::init(1, 1);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("carebook_server=info".parse()?)
                .add_directive("carebook_storage=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(|s| s.as_str()) {
        Some("--help" | "-h") => {
            print_usage();
            Ok(())
        }
        other => run_server(other.unwrap_or("config/server.toml")).await,
    }
}

async fn run_server(config_path: &str) -> Result<()> {
    let config = ServerConfig::load(config_path)?;

    tracing::info!(
        http_port = config.http_port,
        data_dir = %config.database.data_dir,
        db = %config.database.redacted_url(),
        "carebook-server starting"
    );

    let db_url = config.database.connection_url();
    let store = Arc::new(RecordStore::new(&db_url, Path::new(&config.database.data_dir)).await?);

    match store.count_users().await {
        Ok(count) => tracing::info!(count, "User accounts on record"),
        Err(e) => tracing::error!(error = %e, "Failed to count users"),
    }

    let http_addr: SocketAddr = format!("{}:{}", config.bind_address, config.http_port).parse()?;
    let state = AppState::new(store, config);
    let app = app::build_http_app(state);
    let listener = tokio::net::TcpListener::bind(http_addr).await?;

    tracing::info!(http = %http_addr, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            tracing::info!("Shutting down gracefully");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
