mod config;
mod dialog;
mod dispatch;
mod document;
mod errors;
mod intake;
mod models;
mod session;
mod state;
mod storage;
mod voice;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::session::FlowOutcome;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting voice-cv v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Flow: {:?}, output directory: {}",
        config.flow,
        config.output_dir.display()
    );

    let state = AppState::from_config(&config);
    let result = session::run_session(&state, &config.flow).await;

    state.voice.shutdown().await;

    match result {
        Ok(FlowOutcome::Produced(publication)) => {
            info!(
                "Done: {} ({} fields provided, {} snapshot(s), {:?})",
                publication.artifact.display(),
                publication.record.provided_count(),
                publication.snapshots.len(),
                publication.dispatch
            );
            Ok(())
        }
        Ok(FlowOutcome::Abandoned) => {
            info!("Nothing captured; exiting");
            Ok(())
        }
        Err(err) => {
            error!("[{}] {err}", err.code());
            Err(err.into())
        }
    }
}
