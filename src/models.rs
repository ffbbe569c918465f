use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{FIELD_SEPARATOR, STEP_RECORD_FIELDS, TRAINING_RECORD_FIELDS};
use crate::duration::{self, parse_duration};
use crate::error::{Result, TrackerError};

/// Activity types recognized in training records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Running,
    Walking,
}

impl Activity {
    pub const RUNNING_LABEL: &'static str = "Бег";
    pub const WALKING_LABEL: &'static str = "Ходьба";

    /// Tag used for this activity in raw records and rendered reports
    pub fn label(&self) -> &'static str {
        match self {
            Activity::Running => Self::RUNNING_LABEL,
            Activity::Walking => Self::WALKING_LABEL,
        }
    }
}

impl FromStr for Activity {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            Self::RUNNING_LABEL => Ok(Activity::Running),
            Self::WALKING_LABEL => Ok(Activity::Walking),
            other => Err(TrackerError::UnknownActivity(other.to_string())),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-field record: `steps,activity,duration`
///
/// The activity label is kept verbatim; it is only checked when the record
/// is dispatched to a calorie formula.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub steps: u64,
    pub activity: String,
    pub duration: Duration,
}

impl FromStr for TrainingRecord {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self> {
        let fields = split_record(raw, TRAINING_RECORD_FIELDS)?;
        let steps = parse_steps(fields[0])?;
        let duration = parse_positive_duration(fields[2])?;

        Ok(TrainingRecord {
            steps,
            activity: fields[1].to_string(),
            duration,
        })
    }
}

/// Two-field record: `steps,duration`
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub steps: u64,
    pub duration: Duration,
}

impl FromStr for StepRecord {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self> {
        let fields = split_record(raw, STEP_RECORD_FIELDS)?;
        let steps = parse_steps(fields[0])?;
        let duration = parse_positive_duration(fields[1])?;

        Ok(StepRecord { steps, duration })
    }
}

fn split_record(raw: &str, expected: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    if fields.len() != expected {
        return Err(TrackerError::Format {
            input: raw.to_string(),
            expected,
            actual: fields.len(),
        });
    }
    Ok(fields)
}

fn parse_steps(field: &str) -> Result<u64> {
    let steps: i64 = field
        .parse()
        .map_err(|e| TrackerError::invalid_steps(field, format!("not an integer ({})", e)))?;
    if steps <= 0 {
        return Err(TrackerError::invalid_steps(
            field,
            "zero or negative number of steps",
        ));
    }
    Ok(steps.unsigned_abs())
}

fn parse_positive_duration(field: &str) -> Result<Duration> {
    let parsed = parse_duration(field).map_err(|e| TrackerError::from_duration(field, e))?;
    if !duration::is_positive(&parsed) {
        return Err(TrackerError::invalid_duration(field, "zero or negative time"));
    }
    Ok(parsed)
}

/// Statistics computed for a single training record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub activity: Activity,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub speed_kmh: f64,
    pub calories: f64,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Тип тренировки: {}", self.activity)?;
        writeln!(f, "Длительность: {:.2} ч.", self.duration_hours)?;
        writeln!(f, "Дистанция: {:.2} км.", self.distance_km)?;
        writeln!(f, "Скорость: {:.2} км/ч", self.speed_kmh)?;
        writeln!(f, "Сожгли калорий: {:.2}", self.calories)
    }
}

/// Statistics computed for a single day of steps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    pub steps: u64,
    pub distance_km: f64,
    pub calories: f64,
}

impl fmt::Display for DayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Количество шагов: {}.", self.steps)?;
        writeln!(f, "Дистанция составила {:.2} км.", self.distance_km)?;
        writeln!(f, "Вы сожгли {:.2} ккал.", self.calories)
    }
}

impl TrainingReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl DayReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
