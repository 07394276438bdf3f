use tracing::info;

use mediabin::web::handlers::AppState;
use mediabin::{Config, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = mediabin::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        mediabin::logging::init_console_only(&config.logging.level);
    }

    info!("mediabin - media sharing web app");

    // Pre-create the stores and the upload directory
    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, state) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to configure server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
