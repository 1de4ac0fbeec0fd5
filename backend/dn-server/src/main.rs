use dn_server::{bootstrap, build_router, logger, shutdown_signal};
use dn_sse::{AppState, ShutdownCoordinator};

use std::error::Error;
use std::net::SocketAddr;

use log::{info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is normal
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = dn_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = dn_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting dn-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let shutdown = ShutdownCoordinator::new();
    let app_state = AppState::new(bootstrap::connection_config(&config.sse), shutdown.clone());

    let limits = bootstrap::route_limits(&config.rate_limit)?;
    let sweepers = limits.spawn_sweepers(shutdown.child_token());

    let cors = bootstrap::cors_layer(&config.server)?;
    let app = build_router(app_state, limits, cors);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // SIGINT or SIGTERM cancels the root token
    shutdown_signal::spawn_signal_listener(shutdown.clone());

    // Open push streams end with the shutdown token, which lets serve drain
    info!("Server ready to accept connections");
    let shutdown_guard = shutdown.subscribe_guard();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_guard.wait().await;
    })
    .await?;

    for sweeper in sweepers {
        if let Err(e) = sweeper.await {
            warn!("Rate limit sweeper ended abnormally: {}", e);
        }
    }

    info!("Graceful shutdown complete");
    Ok(())
}
