use serde::Serialize;

use crate::dynamics::state::DeviationRecord;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// |lateral deviation| moved outside the tolerance band.
    LeftTolerance { side: Side },
    /// |lateral deviation| came back inside the tolerance band.
    ReturnedToTolerance,
    /// Lateral deviation changed sign: the aircraft crossed the intended track.
    CrossedTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimEvent {
    pub time_s: f64,
    pub lateral_deviation_m: f64,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive deviation records and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &DeviationRecord, current: &DeviationRecord) -> Option<EventKind>;
}

/// Detects transitions of |lateral deviation| across a tolerance band.
pub struct ToleranceDetector {
    pub tolerance_m: f64,
}

impl ToleranceDetector {
    pub fn new(tolerance_m: f64) -> Self {
        Self { tolerance_m }
    }

    fn outside(&self, d: &DeviationRecord) -> bool {
        d.lateral_deviation_m.abs() > self.tolerance_m
    }
}

impl EventDetector for ToleranceDetector {
    fn check(&mut self, prev: &DeviationRecord, current: &DeviationRecord) -> Option<EventKind> {
        match (self.outside(prev), self.outside(current)) {
            (false, true) => Some(EventKind::LeftTolerance {
                side: if current.lateral_deviation_m > 0.0 { Side::Right } else { Side::Left },
            }),
            (true, false) => Some(EventKind::ReturnedToTolerance),
            _ => None,
        }
    }
}

/// Detects the aircraft crossing back over the intended track.
pub struct TrackCrossingDetector;

impl EventDetector for TrackCrossingDetector {
    fn check(&mut self, prev: &DeviationRecord, current: &DeviationRecord) -> Option<EventKind> {
        let (a, b) = (prev.lateral_deviation_m, current.lateral_deviation_m);
        if a != 0.0 && b != 0.0 && a.signum() != b.signum() {
            Some(EventKind::CrossedTrack)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(lateral: f64) -> DeviationRecord {
        DeviationRecord {
            lateral_deviation_m: lateral,
            along_track_m: 0.0,
            drift_angle_deg: 0.0,
        }
    }

    #[test]
    fn leaving_and_returning() {
        let mut det = ToleranceDetector::new(50.0);
        assert_eq!(det.check(&dev(10.0), &dev(40.0)), None);
        assert_eq!(
            det.check(&dev(40.0), &dev(-55.0)),
            Some(EventKind::LeftTolerance { side: Side::Left })
        );
        assert_eq!(det.check(&dev(-55.0), &dev(-80.0)), None);
        assert_eq!(det.check(&dev(-80.0), &dev(-50.0)), Some(EventKind::ReturnedToTolerance));
    }

    #[test]
    fn track_crossing() {
        let mut det = TrackCrossingDetector;
        assert_eq!(det.check(&dev(3.0), &dev(-1.0)), Some(EventKind::CrossedTrack));
        assert_eq!(det.check(&dev(0.0), &dev(-1.0)), None);
        assert_eq!(det.check(&dev(2.0), &dev(1.0)), None);
    }
}
