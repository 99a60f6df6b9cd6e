mod config;
mod error;
mod logging;
mod models;
mod resource;
mod rest;

use error::StartupError;
use std::path::Path;
use tracing::info;

#[tokio::main]
pub async fn main() -> Result<(), StartupError> {
    // an alternative env file has to be in place before CONFIG is read
    if let Some(env_file) = std::env::args().nth(1) {
        config::load_env_file(Path::new(&env_file))?;
    }
    logging::init_tracing();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        core = europa_core::CORE_VERSION,
        "Starting europa"
    );

    let db_conn = models::establish_db_connection().await?;
    models::run_migrations(&db_conn).await?;
    let controller = resource::ResourceController::new(db_conn);

    rest::dispatch_server_daemon(controller).await?;
    Ok(())
}
