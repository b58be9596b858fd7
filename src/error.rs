use thiserror::Error;

/// Crate-level error. Only construction and persistence fail this way;
/// mid-run divergence is reported through [`crate::sim::TerminationReason`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("flight model could not initialize aircraft '{aircraft}': {reason}")]
    CollaboratorInit { aircraft: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A parameter outside its admissible range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("dt must be positive and finite, got {0}")]
    TimeStep(f64),

    #[error("duration must be positive and finite, got {0}")]
    Duration(f64),

    #[error("aircraft model id must not be empty")]
    EmptyAircraft,

    #[error("crosswind speed must be >= 0, got {0} m/s")]
    WindSpeed(f64),

    #[error("crosswind direction must be in [0, 360), got {0} deg")]
    WindDirection(f64),

    #[error("turbulence intensity must be in [0, 1], got {0}")]
    Turbulence(f64),

    #[error("initial altitude must be positive, got {0} ft")]
    Altitude(f64),

    #[error("initial airspeed must be positive, got {0} kts")]
    Airspeed(f64),

    #[error("target heading must be finite, got {0}")]
    TargetHeading(f64),

    #[error("lateral tolerance must be >= 0, got {0} m")]
    LateralTolerance(f64),

    #[error("{name} gain out of admissible range: {value}")]
    Gain { name: &'static str, value: f64 },

    #[error("unknown control mode '{0}'")]
    UnknownMode(String),
}

/// Failures reported by a flight-dynamics collaborator after initialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FdmError {
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    #[error("non-finite value for property '{0}'")]
    NonFinite(String),
}

pub type Result<T> = std::result::Result<T, Error>;
