//! Task board service entry point.
//!
//! Loads settings, installs telemetry, opens the store, serves HTTP until
//! Ctrl-C or SIGTERM, then closes the store.

use std::sync::Arc;

use taskboard::infrastructure::{audit, config::Settings, server, telemetry::TelemetryBuilder};
use taskboard::state::AppState;
use taskboard::store::Store;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Settings::new()?;

    let tracer_provider =
        TelemetryBuilder::from_settings(&config.telemetry, env!("CARGO_PKG_VERSION")).init()?;

    info!("Task board starting...");
    audit::log_audit(&audit::AuditEvent::SystemStartup {
        component: "taskboard".into(),
    });

    let store = match Store::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open store: {:?}", e);
            return Err(e.into());
        }
    };
    let state = Arc::new(AppState::new(store.clone()));

    let served = server::run_server(&config, state, shutdown_signal()).await;

    info!("Shutdown signal received, cleaning up...");
    audit::log_audit(&audit::AuditEvent::SystemShutdown {
        reason: match &served {
            Ok(()) => "Signal received".into(),
            Err(e) => format!("Server error: {e}"),
        },
    });

    store.close().await;
    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            error!("Failed to flush traces: {:?}", e);
        }
    }

    info!("Task board shutdown complete.");
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
