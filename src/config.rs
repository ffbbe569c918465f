use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;
use crate::logging::LogConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Physical parameters used by the calorie formulas
    pub profile: BodyProfile,

    /// Logging preferences
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Body measurements supplied by the caller rather than parsed from records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    /// Weight in kilograms
    pub weight_kg: f64,

    /// Height in meters
    pub height_m: f64,
}

impl BodyProfile {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        Self {
            weight_kg,
            height_m,
        }
    }

    /// Both measurements must be strictly positive
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.weight_kg.is_nan() || self.weight_kg <= 0.0 {
            return Err(TrackerError::Configuration(format!(
                "weight must be positive, got {}",
                self.weight_kg
            )));
        }
        if self.height_m.is_nan() || self.height_m <= 0.0 {
            return Err(TrackerError::Configuration(format!(
                "height must be positive, got {}",
                self.height_m
            )));
        }
        Ok(())
    }
}

impl Default for BodyProfile {
    fn default() -> Self {
        Self::new(70.0, 1.75)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            profile: BodyProfile::default(),
            logging: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config location: `<config dir>/steptracker/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("steptracker")
            .join("config.toml")
    }

    /// Load and validate configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.profile.validate()?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load_or_default() -> Result<Self> {
        Self::load_from_file_or_default(Self::default_path())
    }

    /// Load `path` if it exists, otherwise return the defaults
    pub fn load_from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration as TOML, creating parent directories as needed
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        self.metadata.updated_at = Utc::now();
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(config.profile, deserialized.profile);
        assert_eq!(config.logging, deserialized.logging);
    }

    #[test]
    fn test_profile_validation() {
        assert!(BodyProfile::default().validate().is_ok());
        assert!(matches!(
            BodyProfile::new(0.0, 1.75).validate(),
            Err(TrackerError::Configuration(_))
        ));
        assert!(BodyProfile::new(70.0, -1.0).validate().is_err());
        assert!(BodyProfile::new(f64::NAN, 1.75).validate().is_err());
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original = AppConfig::default();
        original.profile = BodyProfile::new(82.5, 1.9);
        original.logging.format = LogFormat::Json;

        original.save_to_file(&config_path).unwrap();
        let loaded = AppConfig::load_from_file(&config_path).unwrap();

        assert_eq!(loaded.profile, BodyProfile::new(82.5, 1.9));
        assert_eq!(loaded.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_rejects_invalid_profile() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.profile.weight_kg = -5.0;
        config.save_to_file(&config_path).unwrap();

        let err = AppConfig::load_from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("weight must be positive"));
    }

    #[test]
    fn test_default_path_location() {
        let path = AppConfig::default_path();
        assert!(path.ends_with("steptracker/config.toml"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("steptracker").join("config.toml");

        let config = AppConfig::load_from_file_or_default(&config_path).unwrap();
        assert_eq!(config.profile, BodyProfile::default());
        assert_eq!(config.logging, LogConfig::default());
        assert!(!config_path.exists());

        let mut saved = AppConfig::default();
        saved.profile = BodyProfile::new(60.0, 1.62);
        saved.save_to_file(&config_path).unwrap();

        let config = AppConfig::load_from_file_or_default(&config_path).unwrap();
        assert_eq!(config.profile, BodyProfile::new(60.0, 1.62));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = AppConfig::load_from_file(temp_dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
