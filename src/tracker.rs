//! Calculator bound to one person's body measurements

use crate::config::{AppConfig, BodyProfile};
use crate::day_steps;
use crate::error::Result;
use crate::models::{DayReport, TrainingReport};
use crate::training;

/// Runs both calculators with a fixed, validated [`BodyProfile`]
#[derive(Debug, Clone, Copy)]
pub struct Tracker {
    profile: BodyProfile,
}

impl Tracker {
    pub fn new(profile: BodyProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.profile)
    }

    pub fn profile(&self) -> &BodyProfile {
        &self.profile
    }

    pub fn training_info(&self, raw: &str) -> Result<TrainingReport> {
        training::training_info(raw, self.profile.weight_kg, self.profile.height_m)
    }

    pub fn training_report(&self, raw: &str) -> Result<String> {
        training::build_training_report(raw, self.profile.weight_kg, self.profile.height_m)
    }

    pub fn day_info(&self, raw: &str) -> Result<DayReport> {
        day_steps::day_info(raw, self.profile.weight_kg, self.profile.height_m)
    }

    /// Empty string when the record is rejected
    pub fn day_report(&self, raw: &str) -> String {
        day_steps::build_day_report(raw, self.profile.weight_kg, self.profile.height_m)
    }
}
