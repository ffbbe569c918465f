//! Unified error hierarchy for steptracker
//!
//! Every record parser and calorie formula reports failures through
//! [`TrackerError`], so callers can match on the exact rejection reason
//! and decide how loudly to surface it.

use crate::duration::DurationError;
use thiserror::Error;

/// Top-level error type for all steptracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Record does not split into the expected number of fields
    #[error("wrong incoming format: expected {expected} fields, got {actual} in {input:?}")]
    Format {
        input: String,
        expected: usize,
        actual: usize,
    },

    /// Step count is not a positive integer
    #[error("invalid step count {value:?}: {reason}")]
    InvalidSteps { value: String, reason: String },

    /// Duration does not parse or is not strictly positive
    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    /// Activity label is neither of the recognized tags
    #[error("unknown activity type: {0:?}")]
    UnknownActivity(String),

    /// Non-positive parameter handed to a calorie formula
    #[error("invalid input for {calculation}: {parameter}={value}")]
    InvalidInput {
        calculation: String,
        parameter: String,
        value: String,
    },

    /// A report was rendered but one of its figures could not be computed
    #[error("{source}")]
    PartialReport {
        report: String,
        source: Box<TrackerError>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for steptracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    pub(crate) fn invalid_steps(value: &str, reason: impl Into<String>) -> Self {
        TrackerError::InvalidSteps {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_duration(value: &str, reason: impl Into<String>) -> Self {
        TrackerError::InvalidDuration {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn from_duration(value: &str, err: DurationError) -> Self {
        Self::invalid_duration(value, err.to_string())
    }

    /// The error that actually caused the failure, unwrapping partial reports
    pub fn root(&self) -> &TrackerError {
        match self {
            TrackerError::PartialReport { source, .. } => source.root(),
            other => other,
        }
    }

    /// Text rendered before the failure, if any
    pub fn partial_report(&self) -> Option<&str> {
        match self {
            TrackerError::PartialReport { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Whether the error was caused by the caller's record or parameters
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.root(),
            TrackerError::Format { .. }
                | TrackerError::InvalidSteps { .. }
                | TrackerError::InvalidDuration { .. }
                | TrackerError::UnknownActivity(_)
                | TrackerError::InvalidInput { .. }
        )
    }

    /// Whether the error was raised while parsing the raw record
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.root(),
            TrackerError::Format { .. }
                | TrackerError::InvalidSteps { .. }
                | TrackerError::InvalidDuration { .. }
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::Format { .. }
            | TrackerError::InvalidSteps { .. }
            | TrackerError::InvalidDuration { .. }
            | TrackerError::UnknownActivity(_) => ErrorSeverity::Warning,
            TrackerError::InvalidInput { .. } | TrackerError::Configuration(_) => {
                ErrorSeverity::Error
            }
            TrackerError::PartialReport { source, .. } => source.severity(),
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self.root() {
            TrackerError::Format { expected, .. } => {
                format!("Record must contain exactly {} comma-separated fields.", expected)
            }
            TrackerError::InvalidSteps { value, .. } => {
                format!("Step count must be a positive whole number, got '{}'.", value)
            }
            TrackerError::InvalidDuration { value, .. } => {
                format!("Duration must be positive, like '45m' or '1h30m', got '{}'.", value)
            }
            TrackerError::UnknownActivity(label) => {
                format!("Unknown training type '{}'.", label)
            }
            TrackerError::InvalidInput { parameter, .. } => {
                format!("Cannot compute calories: {} must be greater than zero.", parameter)
            }
            other => other.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents a result from being computed
    Error,
    /// Rejected input
    Warning,
}
