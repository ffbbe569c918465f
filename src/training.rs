//! Calorie and distance calculations for training records
//!
//! Distance is estimated from body height (stride is a fixed fraction of
//! height), speed from distance over elapsed time, and calories from body
//! weight, mean speed and time. Walking uses the running estimate scaled by
//! [`WALKING_CALORIES_COEFFICIENT`].

use chrono::Duration;
use tracing::{debug, warn};

use crate::constants::{
    METERS_IN_KM, MINUTES_IN_HOUR, STEP_LENGTH_COEFFICIENT, WALKING_CALORIES_COEFFICIENT,
};
use crate::duration::{as_hours, as_minutes, is_positive};
use crate::error::{Result, TrackerError};
use crate::models::{Activity, TrainingRecord, TrainingReport};

/// Parse a `steps,activity,duration` record
pub fn parse_training_record(raw: &str) -> Result<TrainingRecord> {
    raw.parse()
}

/// Distance in kilometers for the given steps and body height in meters
pub fn distance(steps: u64, height: f64) -> f64 {
    let step_length = height * STEP_LENGTH_COEFFICIENT;
    (step_length * steps as f64) / METERS_IN_KM
}

/// Mean speed in km/h, zero for non-positive durations
pub fn mean_speed(steps: u64, height: f64, duration: &Duration) -> f64 {
    if !is_positive(duration) {
        return 0.0;
    }
    distance(steps, height) / as_hours(duration)
}

fn check_calorie_inputs(
    calculation: &str,
    steps: u64,
    weight: f64,
    height: f64,
    duration: &Duration,
) -> Result<()> {
    let invalid = |parameter: &str, value: String| TrackerError::InvalidInput {
        calculation: calculation.to_string(),
        parameter: parameter.to_string(),
        value,
    };

    if steps == 0 {
        return Err(invalid("steps", steps.to_string()));
    }
    if !is_positive(duration) {
        return Err(invalid("duration", duration.to_string()));
    }
    if weight <= 0.0 {
        return Err(invalid("weight", weight.to_string()));
    }
    if height <= 0.0 {
        return Err(invalid("height", height.to_string()));
    }
    Ok(())
}

fn base_calories(steps: u64, weight: f64, height: f64, duration: &Duration) -> f64 {
    weight * mean_speed(steps, height, duration) * as_minutes(duration) / MINUTES_IN_HOUR
}

/// Calories burned running
pub fn running_calories(steps: u64, weight: f64, height: f64, duration: &Duration) -> Result<f64> {
    check_calorie_inputs("running calories", steps, weight, height, duration)?;
    Ok(base_calories(steps, weight, height, duration))
}

/// Calories burned walking, half the running estimate for the same inputs
pub fn walking_calories(steps: u64, weight: f64, height: f64, duration: &Duration) -> Result<f64> {
    check_calorie_inputs("walking calories", steps, weight, height, duration)?;
    Ok(base_calories(steps, weight, height, duration) * WALKING_CALORIES_COEFFICIENT)
}

/// Compute the statistics for a raw training record.
///
/// Parse errors and unknown activities are returned before anything is
/// computed. If the calorie formula rejects `weight` or `height`, the
/// report is still rendered with zero calories and handed back inside
/// [`TrackerError::PartialReport`].
pub fn training_info(raw: &str, weight: f64, height: f64) -> Result<TrainingReport> {
    let record = parse_training_record(raw)?;
    let activity: Activity = record.activity.parse()?;

    let distance_km = distance(record.steps, height);
    let speed_kmh = distance_km / as_hours(&record.duration);
    let calories = match activity {
        Activity::Running => running_calories(record.steps, weight, height, &record.duration),
        Activity::Walking => walking_calories(record.steps, weight, height, &record.duration),
    };

    let mut report = TrainingReport {
        activity,
        duration_hours: as_hours(&record.duration),
        distance_km,
        speed_kmh,
        calories: 0.0,
    };

    match calories {
        Ok(calories) => {
            report.calories = calories;
            debug!(
                activity = %activity,
                steps = record.steps,
                distance_km,
                speed_kmh,
                calories,
                "Computed training report"
            );
            Ok(report)
        }
        Err(e) => {
            warn!(activity = %activity, error = %e, "Calorie calculation failed");
            Err(TrackerError::PartialReport {
                report: report.to_string(),
                source: Box::new(e),
            })
        }
    }
}

/// Render the text report for a raw training record.
///
/// On success the returned string is the full report. On failure the error
/// is returned; check [`TrackerError::partial_report`] for text that was
/// rendered before a calorie failure.
pub fn build_training_report(raw: &str, weight: f64, height: f64) -> Result<String> {
    training_info(raw, weight, height).map(|report| report.to_string())
}
