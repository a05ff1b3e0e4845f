mod config;
mod error;
mod scenario;
mod services;
mod state;

use std::sync::Arc;

use canvas::engine::EngineCore;
use clap::Parser;

use crate::config::Cli;
use crate::error::HostError;
use crate::scenario::Scenario;
use crate::services::persistence;
use crate::services::store::MemoryStore;
use crate::state::HostState;

#[tokio::main]
async fn main() -> Result<(), HostError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.engine_config()?;
    let scenario = Scenario::load(&cli.scenario)?;

    let store = Arc::new(MemoryStore::new());
    store.set_failing(cli.fail_writes);
    let state = HostState::new(EngineCore::with_config(config), store.clone());

    // Spawn background flush task for debounced position writes.
    let flusher = persistence::spawn_flush_task(state.clone());

    let summary = scenario::run(&state, &scenario).await;

    state.shutdown.notify_one();
    flusher.await?;
    let failed_on_shutdown = persistence::flush_remaining(&state).await;

    let writes = store.writes().await;
    tracing::info!(
        steps = summary.steps,
        actions = summary.actions,
        writes = writes.len(),
        failed_writes = summary.failed_writes + state.flush_failures() + failed_on_shutdown,
        "scenario complete"
    );

    if cli.print_writes {
        for write in &writes {
            println!("{}", serde_json::to_string(write)?);
        }
    }
    Ok(())
}
