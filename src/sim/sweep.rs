use std::thread;

use tracing::info;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::gnc::ControlMode;
use super::runner::{simulate, RunResult};

// ---------------------------------------------------------------------------
// Batch runs: one independent simulation per thread
// ---------------------------------------------------------------------------

/// Run the same scenario once per mode. Results keep the order of `modes`.
pub fn compare_strategies(
    config: &SimulationConfig,
    modes: &[ControlMode],
) -> Result<Vec<(ControlMode, RunResult)>> {
    let configs = modes
        .iter()
        .map(|&mode| {
            let mut c = config.clone();
            c.controller.mode = mode;
            c
        })
        .collect::<Vec<_>>();

    info!(runs = configs.len(), "comparing strategies");
    let results = run_parallel(&configs)?;
    Ok(modes.iter().copied().zip(results).collect())
}

/// Run the configured mode at each wind speed. Results keep the order of `speeds_mps`.
pub fn sweep_wind_speeds(
    config: &SimulationConfig,
    speeds_mps: &[f64],
) -> Result<Vec<(f64, RunResult)>> {
    let configs = speeds_mps
        .iter()
        .map(|&speed| SimulationConfig { crosswind_speed: speed, ..config.clone() })
        .collect::<Vec<_>>();

    info!(runs = configs.len(), mode = %config.controller.mode, "sweeping wind speed");
    let results = run_parallel(&configs)?;
    Ok(speeds_mps.iter().copied().zip(results).collect())
}

/// Validate everything up front, then run each config on its own scoped thread.
fn run_parallel(configs: &[SimulationConfig]) -> Result<Vec<RunResult>> {
    for c in configs {
        c.validate()?;
    }

    thread::scope(|scope| {
        let handles = configs
            .iter()
            .map(|c| scope.spawn(move || simulate(c)))
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
