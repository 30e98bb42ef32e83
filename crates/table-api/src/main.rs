//! Table API Server entry point
//!
//! Run with:
//! ```bash
//! DB_HOST=localhost DB_NAME=postgres DB_PASSWORD=secret cargo run -p table-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use table_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        database = ?config.database,
        "Configuration loaded"
    );

    // Run the server
    table_api::run(config).await?;

    Ok(())
}
