use std::sync::Arc;

use anyhow::Context;
use todo_server::{app, telemetry, Config, Server, ServerOptions, SqliteTodoDatasource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing()?;

    let config = Config::from_env()?;
    let datasource = SqliteTodoDatasource::open(&config.database_path)
        .with_context(|| format!("opening database {}", config.database_path))?;

    let mut server = Server::new(ServerOptions::from_config(&config, app(Arc::new(datasource))));
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    server.close().await?;
    Ok(())
}
