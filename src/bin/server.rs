use std::error::Error;

use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;

use clinic_ledger::{
    AppState, ServerConfig, add_tracing_layer, build_router, graceful_shutdown, setup_logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::parse();
    config.validate()?;

    setup_logging(&config.log_path)?;

    let conn = Connection::open(&config.db_path).inspect_err(|error| {
        tracing::error!("could not open database at {:?}: {error}", config.db_path)
    })?;
    let app_state = AppState::new(conn, &config.timezone)?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));
    let addr = config.address();

    tracing::info!(
        "HTTP server listening on {} with timezone {}",
        addr,
        config.timezone
    );
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
