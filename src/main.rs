use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod cli;
mod config;
mod errors;
mod middleware;
mod models;
mod query;
mod receipt;
mod responses;
mod store;

use auth::password::CredentialVerifier;
use auth::store::SessionStore;
use auth::tokens::TokenCodec;
use auth::SessionManager;
use store::postgres::PgStore;

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub db: PgStore,
    pub sessions: SessionManager,
    pub credentials: CredentialVerifier,
    pub config: config::Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "kasa=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    match args.command {
        Some(cli::Commands::Serve { port }) => run_server(cfg, port).await,
        Some(cli::Commands::Migrate) => {
            let db = PgStore::connect(&cfg.database_url).await?;
            db.migrate().await?;
            tracing::info!("migrations applied");
            Ok(())
        }
        None => run_server(cfg, None).await,
    }
}

async fn run_server(cfg: config::Config, port_override: Option<u16>) -> anyhow::Result<()> {
    let db = PgStore::connect(&cfg.database_url).await?;
    db.migrate().await?;

    let redis_client = redis::Client::open(cfg.redis_url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    let sessions = SessionManager::new(
        TokenCodec::new(&cfg.secret_key),
        SessionStore::new(redis_conn),
        &cfg,
    );
    let credentials = CredentialVerifier::new(&cfg.secret_key);

    let port = port_override.unwrap_or(cfg.port);
    let state = Arc::new(AppState {
        db,
        sessions,
        credentials,
        config: cfg,
    });

    let app = api::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "kasa listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
