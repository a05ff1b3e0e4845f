//! Host configuration from command-line flags with environment fallbacks.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

use canvas::consts::{DEBOUNCE_MS, DRAG_THRESHOLD_PX, SNAP_GRID, SNAP_THRESHOLD};
use canvas::engine::EngineConfig;
use clap::Parser;

use crate::error::HostError;

#[derive(Parser, Debug)]
#[command(name = "campaign-canvas", about = "Replay canvas interaction scenarios against a persistence store")]
pub struct Cli {
    /// Scenario file (JSON) to replay.
    #[arg(long, env = "CANVAS_SCENARIO")]
    pub scenario: PathBuf,

    /// Quiet period before a position write is flushed.
    #[arg(long, env = "CANVAS_DEBOUNCE_MS", default_value_t = DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Alignment match distance in world units.
    #[arg(long, env = "CANVAS_SNAP_THRESHOLD", default_value_t = SNAP_THRESHOLD)]
    pub snap_threshold: f64,

    /// Background grid spacing; 0 disables grid snapping.
    #[arg(long, env = "CANVAS_GRID", default_value_t = SNAP_GRID)]
    pub grid: f64,

    /// Pointer travel in screen pixels before a press becomes a drag.
    #[arg(long, env = "CANVAS_DRAG_THRESHOLD", default_value_t = DRAG_THRESHOLD_PX)]
    pub drag_threshold: f64,

    /// Make every store write fail, to exercise error logging.
    #[arg(long, env = "CANVAS_FAIL_WRITES")]
    pub fail_writes: bool,

    /// Print the recorded store writes as JSON lines.
    #[arg(long)]
    pub print_writes: bool,
}

impl Cli {
    /// Validated engine tunables.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Config`] for negative or non-finite distances.
    pub fn engine_config(&self) -> Result<EngineConfig, HostError> {
        let snap_threshold = non_negative("snap threshold", self.snap_threshold)?;
        let grid = non_negative("grid", self.grid)?;
        let drag_threshold_px = non_negative("drag threshold", self.drag_threshold)?;
        Ok(EngineConfig {
            snap_threshold,
            grid: (grid > 0.0).then_some(grid),
            debounce_ms: self.debounce_ms,
            drag_threshold_px,
        })
    }
}

fn non_negative(name: &str, value: f64) -> Result<f64, HostError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(HostError::Config(format!("{name} must be a non-negative number, got {value}")))
    }
}
