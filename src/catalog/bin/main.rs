use std::net::SocketAddr;
use tracing::{error, info};
use library::catalog::controller::build_router;
use library::core::controller::AppState;
use library::core::domain::Configuration;
use library::utils::logs::setup_tracing;
use library::utils::sqlite::initialize_database;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = Configuration::load()?;
    let addr: SocketAddr = config.urls.parse()?;
    let state = AppState::new(config)?;

    // the schema must exist before the first request is served
    if let Err(err) = initialize_database(&state.connection_factory).await {
        error!(error = %err, "failed to initialize database");
        return Err(err.into());
    }

    info!(%addr, environment = state.config.environment.as_str(),
          auth = state.config.auth.api_key.is_some(), "library api listening");
    let app = build_router(state);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
