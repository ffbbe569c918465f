// Library interface for steptracker
// Converts raw step and training records into distance, speed and calorie reports

pub mod config;
pub mod constants;
pub mod day_steps;
pub mod duration;
pub mod error;
pub mod logging;
pub mod models;
pub mod tracker;
pub mod training;

// Re-export commonly used types for convenience
pub use config::{AppConfig, BodyProfile};
pub use day_steps::{build_day_report, day_info};
pub use error::{Result, TrackerError};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use models::{Activity, DayReport, StepRecord, TrainingRecord, TrainingReport};
pub use tracker::Tracker;
pub use training::{build_training_report, training_info};
