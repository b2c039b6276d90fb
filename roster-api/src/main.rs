//! # Roster API Server
//!
//! HTTP server for the record roster: record CRUD, search and filtering
//! through the command dispatcher, plus a read-only view of a remote post
//! collection.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p roster-api
//! ```

use roster_api::app::{build_router, AppState};
use roster_api::config::Config;
use roster_shared::error::StoreError;
use roster_shared::remote::PostsClient;
use roster_shared::store::Store;
use roster_worker::controller::Controller;
use roster_worker::dispatcher::Dispatcher;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roster_api=debug,roster_shared=debug,roster_worker=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Roster API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let store = open_store(&config).await?;
    let db = store.pool().clone();

    let dispatcher = Dispatcher::spawn(Controller::new(store));
    let posts = PostsClient::new(config.posts.client_config())?;
    tracing::info!(base_url = %posts.base_url(), "Remote post source configured");

    let state = AppState::new(db, dispatcher.handle(), Arc::new(posts), config.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing record store");
    if let Some(controller) = dispatcher.shutdown().await {
        controller.into_store().close().await;
    }

    Ok(())
}

/// Opens the record store, resetting it only when configured to
async fn open_store(config: &Config) -> anyhow::Result<Store> {
    let pool_config = config.database.pool_config();

    match Store::open(pool_config.clone()).await {
        Ok(store) => Ok(store),
        Err(StoreError::SchemaOutdated { found, expected })
            if config.database.reset_on_schema_mismatch =>
        {
            tracing::warn!(
                found,
                expected,
                "Schema version mismatch, dropping and recreating the records table"
            );
            let store = Store::open_unchecked(pool_config).await?;
            store.reset_destroying_all_records().await?;
            Ok(store)
        }
        Err(e @ StoreError::SchemaOutdated { .. }) => Err(anyhow::anyhow!(
            "{}; set ROSTER_RESET_ON_SCHEMA_MISMATCH=true to discard the stored records",
            e
        )),
        Err(e) => Err(e.into()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
