use std::io::{self, Write};
use std::path::Path;

use crate::sim::HistoryRow;

/// Write run history to CSV format.
///
/// Columns: time_s, lateral_deviation_m, along_track_m, drift_angle_deg,
///          airspeed_kts, groundspeed_kts, roll_deg, pitch_deg, yaw_deg,
///          aileron_norm, elevator_norm, rudder_norm, crosswind_mps, headwind_mps
pub fn write_history<W: Write>(writer: &mut W, rows: &[HistoryRow]) -> io::Result<()> {
    writeln!(
        writer,
        "time_s,lateral_deviation_m,along_track_m,drift_angle_deg,\
         airspeed_kts,groundspeed_kts,roll_deg,pitch_deg,yaw_deg,\
         aileron_norm,elevator_norm,rudder_norm,crosswind_mps,headwind_mps"
    )?;

    for r in rows {
        writeln!(
            writer,
            "{:.3},{:.3},{:.3},{:.3},\
             {:.2},{:.2},{:.3},{:.3},{:.3},\
             {:.5},{:.5},{:.5},{:.3},{:.3}",
            r.time_s,
            r.lateral_deviation_m, r.along_track_m, r.drift_angle_deg,
            r.airspeed_kts, r.groundspeed_kts,
            r.roll_deg, r.pitch_deg, r.yaw_deg,
            r.aileron_norm, r.elevator_norm, r.rudder_norm,
            r.crosswind_mps, r.headwind_mps,
        )?;
    }

    Ok(())
}

/// Write run history to a CSV file at the given path.
pub fn write_history_file(path: impl AsRef<Path>, rows: &[HistoryRow]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_history(&mut file, rows)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t: f64, lateral: f64) -> HistoryRow {
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
            aileron_norm: 0.0,
            elevator_norm: 0.0,
            rudder_norm: 0.0,
            crosswind_mps: 10.0,
            headwind_mps: 0.0,
        }
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let rows = vec![row(0.0, 0.0), row(1.0, -10.0)];

        let mut buf = Vec::new();
        write_history(&mut buf, &rows).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time_s,lateral_deviation_m,"));
        assert!(lines[0].ends_with("crosswind_mps,headwind_mps"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[2].starts_with("1.000,-10.000,30.000,"));
        assert_eq!(lines[1].split(',').count(), 14);
    }
}
