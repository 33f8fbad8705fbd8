use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use common::FieldCipher;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use service::auth::TokenService;
use tracing::info;

use crate::{routes, state::AppState};

/// Load `.env` and configuration, then serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_and_validate()?;
    common::utils::logging::init_logging(&cfg.logging.format);
    run_with_config(cfg).await
}

/// Connect, migrate, bootstrap the admin account and serve with the given config.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await.context("running migrations")?;

    let cipher = Arc::new(FieldCipher::new(cfg.encryption.key.as_bytes())?);
    let tokens = TokenService::from_config(&cfg.auth);
    let state = AppState::new(db, cipher, tokens);

    if let Some((username, password)) = cfg.bootstrap.admin_credentials() {
        if state.auth.ensure_admin(username, password).await? {
            info!(%username, "bootstrap admin account created");
        }
    }

    let app = routes::build_router(state);
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", cfg.server.host, cfg.server.port))?;
    info!(%addr, "starting car rental server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}
