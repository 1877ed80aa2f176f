//! Error types for jovisim.
//!
//! Everything in the physics core is pure computation over in-memory state,
//! so none of these errors are transient. A failed step is a configuration or
//! logic error and is reported straight back to the caller.

use std::fmt;

/// Errors raised while building or stepping a simulation.
#[derive(Debug)]
pub enum SimError {
    /// A body was given a mass that is zero, negative or not finite.
    /// `index` is filled in once the body's position in the set is known.
    NonPositiveMass { index: Option<usize>, mass: f64 },
    /// The timestep was zero, negative or not finite.
    InvalidTimestep(f64),
    /// Two bodies sit closer than the configured minimum separation, so the
    /// force direction `d / r` is undefined.
    DegenerateGeometry { pair: Option<(usize, usize)>, separation: f64 },
    /// The scenario description is inconsistent.
    InvalidConfig(String),
    /// Failed to read a scenario file.
    Io(std::io::Error),
    /// Failed to parse a scenario file.
    Parse(serde_yaml::Error),
}

impl SimError {
    /// Attach a body index to an error raised by a lone [`Body`](crate::Body).
    pub fn with_index(self, i: usize) -> Self {
        match self {
            SimError::NonPositiveMass { index: None, mass } => SimError::NonPositiveMass { index: Some(i), mass },
            other => other,
        }
    }

    /// Attach a body pair to an error raised by a single force evaluation.
    pub fn with_pair(self, a: usize, b: usize) -> Self {
        match self {
            SimError::DegenerateGeometry { pair: None, separation } => SimError::DegenerateGeometry { pair: Some((a, b)), separation },
            other => other,
        }
    }

    /// True for the errors that come from bad physical input (mass or timestep)
    pub fn is_domain(&self) -> bool {
        matches!(self, SimError::NonPositiveMass { .. } | SimError::InvalidTimestep(_))
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NonPositiveMass { index: Some(i), mass } => write!(f, "Body {} has non-positive mass {}", i, mass),
            SimError::NonPositiveMass { index: None, mass } => write!(f, "Body has non-positive mass {}", mass),
            SimError::InvalidTimestep(dt) => write!(f, "Timestep must be positive and finite, got {}", dt),
            SimError::DegenerateGeometry { pair: Some((a, b)), separation } => {
                write!(f, "Bodies {} and {} are {} m apart, force direction is undefined", a, b, separation)
            }
            SimError::DegenerateGeometry { pair: None, separation } => {
                write!(f, "Bodies are {} m apart, force direction is undefined", separation)
            }
            SimError::InvalidConfig(msg) => write!(f, "Invalid scenario: {}", msg),
            SimError::Io(e) => write!(f, "Failed to read scenario file: {}", e),
            SimError::Parse(e) => write!(f, "Failed to parse scenario file: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_yaml::Error> for SimError {
    fn from(e: serde_yaml::Error) -> Self {
        SimError::Parse(e)
    }
}
