use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::sim::{HistoryRow, RunResult, TerminationReason};

/// Summary statistics computed from a run's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationSummary {
    pub max_abs_lateral_m: f64,
    pub final_lateral_m: f64,
    pub rms_lateral_m: f64,
    pub final_along_track_m: f64,
    pub max_abs_drift_deg: f64,
    pub max_abs_aileron: f64,
    pub saturated_ticks: usize,
    pub duration_s: f64,
}

impl DeviationSummary {
    /// Compute summary from history rows. An empty history yields all zeros.
    pub fn from_history(rows: &[HistoryRow]) -> Self {
        let rms_lateral_m = if rows.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = rows.iter().map(|r| r.lateral_deviation_m.powi(2)).sum();
            (sum_sq / rows.len() as f64).sqrt()
        };

        let saturated_ticks = rows.iter().filter(|r| r.command().is_saturated()).count();

        let (final_lateral_m, final_along_track_m, duration_s) = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => {
                (last.lateral_deviation_m, last.along_track_m, last.time_s - first.time_s)
            }
            _ => (0.0, 0.0, 0.0),
        };

        DeviationSummary {
            max_abs_lateral_m: max_abs(rows, |r| r.lateral_deviation_m),
            final_lateral_m,
            rms_lateral_m,
            final_along_track_m,
            max_abs_drift_deg: max_abs(rows, |r| r.drift_angle_deg),
            max_abs_aileron: max_abs(rows, |r| r.aileron_norm),
            saturated_ticks,
            duration_s,
        }
    }
}

fn max_abs(rows: &[HistoryRow], f: impl Fn(&HistoryRow) -> f64) -> f64 {
    rows.iter().map(|r| f(r).abs()).fold(0.0_f64, f64::max)
}

#[derive(Serialize)]
struct RunReport<'a> {
    controller: &'a str,
    config: &'a SimulationConfig,
    truncated: bool,
    termination: &'a TerminationReason,
    summary: DeviationSummary,
    events: &'a [crate::sim::event::SimEvent],
}

/// Write run summary (config, outcome, statistics, events) as JSON.
pub fn write_summary<W: Write>(
    writer: &mut W,
    config: &SimulationConfig,
    result: &RunResult,
) -> crate::Result<()> {
    let report = RunReport {
        controller: &result.controller,
        config,
        truncated: result.truncated,
        termination: &result.termination_reason,
        summary: DeviationSummary::from_history(&result.rows),
        events: &result.events,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

/// Write run summary JSON to a file.
pub fn write_summary_file(
    path: impl AsRef<Path>,
    config: &SimulationConfig,
    result: &RunResult,
) -> crate::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_summary(&mut file, config, result)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t: f64, lateral: f64, aileron: f64) -> HistoryRow {
        HistoryRow {
            time_s: t,
            lateral_deviation_m: lateral,
            along_track_m: 30.0 * t,
            drift_angle_deg: -18.0,
            airspeed_kts: 60.0,
            groundspeed_kts: 62.0,
            roll_deg: 0.0,
            pitch_deg: 0.0,
            yaw_deg: 0.0,
            aileron_norm: aileron,
            elevator_norm: 0.0,
            rudder_norm: 0.0,
            crosswind_mps: 10.0,
            headwind_mps: 0.0,
        }
    }

    fn simple_history() -> Vec<HistoryRow> {
        vec![row(0.0, 0.0, 0.0), row(1.0, -30.0, 1.0), row(2.0, 40.0, -0.5)]
    }

    #[test]
    fn summary_computes_extremes() {
        let s = DeviationSummary::from_history(&simple_history());
        assert!((s.max_abs_lateral_m - 40.0).abs() < 1e-12);
        assert!((s.final_lateral_m - 40.0).abs() < 1e-12);
        assert!((s.rms_lateral_m - (2500.0_f64 / 3.0).sqrt()).abs() < 1e-9);
        assert!((s.final_along_track_m - 60.0).abs() < 1e-12);
        assert!((s.max_abs_drift_deg - 18.0).abs() < 1e-12);
        assert!((s.max_abs_aileron - 1.0).abs() < 1e-12);
        assert_eq!(s.saturated_ticks, 1);
        assert!(simple_history()[1].command().is_saturated());
        assert!((s.duration_s - 2.0).abs() < 1e-12);
    }

    #[test]
    fn saturation_counts_any_axis() {
        let mut rudder_stop = row(3.0, 0.0, 0.2);
        rudder_stop.rudder_norm = -1.0;
        let s = DeviationSummary::from_history(&[row(0.0, 0.0, 0.99), rudder_stop]);
        assert_eq!(s.saturated_ticks, 1);
    }

    #[test]
    fn empty_history_is_all_zero() {
        let s = DeviationSummary::from_history(&[]);
        assert_eq!(s.max_abs_lateral_m, 0.0);
        assert_eq!(s.saturated_ticks, 0);
        assert_eq!(s.duration_s, 0.0);
    }

    #[test]
    fn json_output_is_valid() {
        let config = SimulationConfig::default();
        let result = RunResult {
            controller: "TRACK_FOLLOWING".into(),
            rows: simple_history(),
            events: vec![],
            truncated: false,
            termination_reason: TerminationReason::Completed,
        };

        let mut buf = Vec::new();
        write_summary(&mut buf, &config, &result).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["controller"], "TRACK_FOLLOWING");
        assert_eq!(value["termination"]["reason"], "completed");
        assert_eq!(value["config"]["aircraft_model"], "c172p");
        assert_eq!(value["summary"]["saturated_ticks"], 1);
    }
}
