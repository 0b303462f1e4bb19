//! # relayhubd — relayhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Construct the output backend (simulated or sysfs GPIO) and drive every
//!   relay line off
//! - Construct the relay bank and request router, injecting the backend
//!   and the event bus via port traits
//! - Spawn background tasks (status panel refresher, optional pulse sequence)
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), cancelling background tasks
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use relayhub_adapter_gpio_sysfs::SysfsGpio;
use relayhub_adapter_http_axum::state::AppState;
use relayhub_adapter_virtual::{LogPanel, SimulatedOutput};
use relayhub_app::event_bus::InProcessEventBus;
use relayhub_app::ports::RelayOutput;
use relayhub_app::request_router::RequestRouter;
use relayhub_app::services::relay_bank::RelayBank;
use relayhub_app::tasks::{DisplayRefresher, PulseSequence};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::config::{Backend, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    match config.relays.backend {
        Backend::Simulated => serve(config, SimulatedOutput::new()).await,
        Backend::Sysfs => {
            let gpio = SysfsGpio::new(&config.relays.sysfs_root, config.relays.active_low);
            gpio.prepare(&config.relays.pins)?;
            serve(config, gpio).await
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), falling back to `info`");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve<O>(config: Config, output: O) -> anyhow::Result<()>
where
    O: RelayOutput + Send + Sync + 'static,
{
    // Relay bank
    let bus = InProcessEventBus::new(64);
    let bank = Arc::new(RelayBank::new(
        config.relays.pins.clone(),
        output,
        bus.clone(),
    ));
    bank.initialize()?;
    tracing::info!(lines = ?bank.lines(), "relay lines mapped");

    // Background tasks
    let cancel = CancellationToken::new();
    let mut tasks = JoinSet::new();
    if config.display.enabled {
        let refresher = DisplayRefresher::new(Arc::clone(&bank), LogPanel::new());
        tasks.spawn(refresher.run(bus.subscribe(), cancel.clone()));
    }
    if config.pulse.enabled {
        let sequence = PulseSequence::new(
            config.pulse.relays.clone(),
            config.pulse.on_time(),
            config.pulse.off_time(),
        );
        let bank = Arc::clone(&bank);
        let cancel = cancel.clone();
        tasks.spawn(async move {
            if let Err(err) = sequence.run(bank, cancel).await {
                tracing::error!(error = %err, "pulse sequence aborted");
            }
        });
    }

    // HTTP
    let state = AppState::new(RequestRouter::new(Arc::clone(&bank)));
    let app = relayhub_adapter_http_axum::router::build(state, config.assets.dir.as_deref());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, relays = bank.len(), backend = ?config.relays.backend, "relayhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    while let Some(result) = tasks.join_next().await {
        if let Err(err) = result {
            tracing::warn!(error = %err, "background task failed");
        }
    }
    tracing::info!("relayhubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
