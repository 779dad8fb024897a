//! Setup and configuration errors
//!
//! Only precondition violations are errors. Everything in the frame loop is
//! pure computation over already-validated state.

use std::fmt;

/// A precondition violated while building a level or its parts
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// A curve needs at least two control points
    TooFewControlPoints { got: usize },
    /// Control point contains NaN or infinity
    NonFiniteControlPoint { index: usize },
    /// Sampling resolution / divisions of zero
    ZeroResolution,
    /// Nothing to clone from
    EmptyTemplatePool,
    /// Placement config outside its valid range
    InvalidPlacement(&'static str),
    /// Road layout parameters outside their valid range
    InvalidRoad(&'static str),
    /// Vehicle tuning outside its valid range
    InvalidTuning(&'static str),
    /// Any other config value outside its valid range
    InvalidConfig(&'static str),
    /// A sub-part the model cannot work without is missing
    MissingRequiredPart(&'static str),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::TooFewControlPoints { got } => {
                write!(f, "road curve needs at least 2 control points, got {got}")
            }
            SetupError::NonFiniteControlPoint { index } => {
                write!(f, "control point {index} is not finite")
            }
            SetupError::ZeroResolution => write!(f, "sampling resolution must be at least 1"),
            SetupError::EmptyTemplatePool => write!(f, "template pool is empty"),
            SetupError::InvalidPlacement(reason) => write!(f, "invalid placement config: {reason}"),
            SetupError::InvalidRoad(reason) => write!(f, "invalid road config: {reason}"),
            SetupError::InvalidTuning(reason) => write!(f, "invalid vehicle tuning: {reason}"),
            SetupError::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
            SetupError::MissingRequiredPart(name) => write!(f, "required part '{name}' not found"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Failure loading a [`crate::GameConfig`]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
