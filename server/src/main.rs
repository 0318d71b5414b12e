//! Bookings API server.
//!
//! Run from repo root: `cargo run -p bookings-server`
//! Without `DATABASE_URL` the server keeps everything in memory.

use bookings_api::{
    app, ensure_database_exists, init_tracing, telemetry::DEFAULT_FILTER, AppConfig, AppState, Gateway,
    MemoryGateway, PgGateway,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(DEFAULT_FILTER);

    match config.database_url.as_deref() {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            let gateway = PgGateway::new(pool, config.schema.as_str());
            gateway.ensure_schema().await?;
            tracing::info!(schema = %config.schema, "using PostgreSQL store");
            serve(&config, gateway).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            serve(&config, MemoryGateway::new()).await
        }
    }
}

async fn serve<G: Gateway>(config: &AppConfig, gateway: G) -> Result<(), Box<dyn std::error::Error>> {
    let router = app(AppState::new(gateway), config.body_limit);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
