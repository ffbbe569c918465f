//! Numeric constants shared by the training and day-steps calculators

/// Average step length in meters, used by the day-steps estimate
pub const STEP_LENGTH_M: f64 = 0.65;

/// Fraction of body height approximating stride length
pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;

/// Walking burns this fraction of the running estimate at the same speed
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

pub const METERS_IN_KM: f64 = 1000.0;

pub const MINUTES_IN_HOUR: f64 = 60.0;

/// Training record: steps, activity, duration
pub const TRAINING_RECORD_FIELDS: usize = 3;

/// Step record: steps, duration
pub const STEP_RECORD_FIELDS: usize = 2;

pub const FIELD_SEPARATOR: char = ',';
