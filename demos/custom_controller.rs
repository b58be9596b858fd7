use anyhow::Result;

use crosswind_sim::dynamics::{ControlCommand, DeviationRecord, SimulationState};
use crosswind_sim::gnc::Controller;
use crosswind_sim::io::DeviationSummary;
use crosswind_sim::physics::RelativeWind;
use crosswind_sim::sim;
use crosswind_sim::sim::event::EventKind;
use crosswind_sim::SimulationConfig;

/// A bang-bang pilot: full aileron toward the track once outside the band,
/// wings level inside it.
struct BangBangPilot {
    band_m: f64,
    kick: f64,
}

impl Controller for BangBangPilot {
    fn compute(
        &mut self,
        state: &SimulationState,
        deviation: &DeviationRecord,
        _wind: &RelativeWind,
    ) -> ControlCommand {
        let lat = deviation.lateral_deviation_m;
        let aileron = if lat > self.band_m {
            -self.kick // right of track: bank left
        } else if lat < -self.band_m {
            self.kick
        } else {
            // level the wings and let heading relax
            -state.roll_deg / 30.0
        };
        ControlCommand::clamped(aileron, 0.0, 0.0)
    }

    fn name(&self) -> &str {
        "BangBang"
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = SimulationConfig {
        crosswind_speed: 8.0,
        crosswind_direction: 270.0,
        dt: 0.1,
        duration: 120.0,
        ..Default::default()
    };

    let mut pilot = BangBangPilot { band_m: 40.0, kick: 0.3 };

    println!("Simulating with {} controller...", pilot.name());
    let run = sim::simulate_with(&config, &mut pilot)?;
    let summary = DeviationSummary::from_history(&run.rows);

    println!("Final lateral: {:.1} m", summary.final_lateral_m);
    println!("Max |lateral|: {:.1} m", summary.max_abs_lateral_m);
    println!("RMS lateral:   {:.1} m", summary.rms_lateral_m);
    let crossings = run
        .events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::CrossedTrack))
        .count();
    println!("Track crossings: {}", crossings);
    println!("History rows: {}", run.rows.len());
    Ok(())
}
