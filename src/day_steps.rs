//! Daily step summaries
//!
//! A day of steps is treated as undifferentiated walking. Distance uses a
//! fixed average step length rather than the height-based stride of the
//! training calculator; calories come from [`training::walking_calories`].

use tracing::warn;

use crate::constants::{METERS_IN_KM, STEP_LENGTH_M};
use crate::duration::is_positive;
use crate::error::{Result, TrackerError};
use crate::models::{DayReport, StepRecord};
use crate::training;

/// Parse a `steps,duration` record
pub fn parse_step_record(raw: &str) -> Result<StepRecord> {
    raw.parse()
}

/// Distance in kilometers using the average step length
pub fn step_distance(steps: u64) -> f64 {
    steps as f64 * STEP_LENGTH_M / METERS_IN_KM
}

/// Compute the day summary for a raw step record
pub fn day_info(raw: &str, weight: f64, height: f64) -> Result<DayReport> {
    let record = parse_step_record(raw)?;

    // Already enforced by the parser
    if record.steps == 0 || !is_positive(&record.duration) {
        warn!(steps = record.steps, duration = %record.duration, "Invalid steps or duration");
        return Err(TrackerError::InvalidInput {
            calculation: "day steps".to_string(),
            parameter: "steps/duration".to_string(),
            value: format!("{}/{}", record.steps, record.duration),
        });
    }

    let calories = training::walking_calories(record.steps, weight, height, &record.duration)?;

    Ok(DayReport {
        steps: record.steps,
        distance_km: step_distance(record.steps),
        calories,
    })
}

/// Render the text summary for a raw step record.
///
/// Returns an empty string on any failure. Malformed records are logged;
/// calorie failures are not.
pub fn build_day_report(raw: &str, weight: f64, height: f64) -> String {
    match day_info(raw, weight, height) {
        Ok(report) => report.to_string(),
        Err(e) => {
            if e.is_parse_error() {
                warn!(input = raw, error = %e, "Invalid input format");
            }
            String::new()
        }
    }
}
