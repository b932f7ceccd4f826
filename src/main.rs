//! Hourglass - A countdown timer that minimizes all windows when time runs out
//!
//! This is the main entry point for the hourglass application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use hourglass::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{check_program_available, ExpiryNotifier, MinimizeWindows, NoopNotifier},
    tasks::console_display_task,
    timer::SystemClock,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("hourglass={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting hourglass v{}", env!("CARGO_PKG_VERSION"));

    // Pick the expiry action; a missing program is only a warning since failures are log-only
    let notifier: Arc<dyn ExpiryNotifier> = match config.expiry_command() {
        Some(command) => {
            info!("Expiry action: {}", command);
            if let Err(e) = check_program_available(&command.program).await {
                warn!("{}", e);
            }
            Arc::new(MinimizeWindows::new(command))
        }
        None => {
            info!("Expiry action disabled");
            Arc::new(NoopNotifier)
        }
    };

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        Arc::new(SystemClock),
        notifier,
    ));

    if !config.headless {
        let display_rx = state.controller.subscribe();
        tokio::spawn(async move {
            console_display_task(display_rx, tokio::io::stdout()).await;
        });
    }

    if let Some(form) = config.initial_form() {
        match state.controller.start(&form).await {
            Ok(_) => state.record_action("start"),
            Err(e) => error!("Cannot start timer from command line: {}", e),
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start a timer (JSON: name, minutes | hour_set)");
    info!("  POST /stop   - Stop the running timer");
    info!("  POST /close  - Stop the timer and exit");
    info!("  GET  /status - Current countdown and end time");
    info!("  GET  /health - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            state.controller.stop().await;
        }
        _ = state.closed() => {
            info!("Window closed");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
