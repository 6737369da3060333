//! Cleaning configuration
//!
//! Allow-listed roles, plausible measurement ranges, recognized date formats
//! and output file names. The configuration is stored as YAML and handed to
//! each component when it is constructed.
//!
//! Example format:
//! ```yaml
//! roles:
//!   allow:
//!     - Competed in Olympic Games
//!     - Competed in Olympics
//! measurements:
//!   height_cm: { min: 100.0, max: 250.0 }
//!   weight_kg: { min: 20.0, max: 300.0 }
//! dates:
//!   formats: [day_month_year, month_year, circa_year, year, iso]
//! output:
//!   bios: bios_new.csv
//!   results: results_new.csv
//!   report: crossref_report.json
//! ```

use crate::transform::DateFormat;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration for a cleaning run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CleaningConfig {
    pub roles: RolesConfig,
    pub measurements: MeasurementsConfig,
    pub dates: DatesConfig,
    pub output: OutputConfig,
}

/// Role strings that mark a person as an Olympic competitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RolesConfig {
    pub allow: Vec<String>,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            allow: vec![
                "Competed in Olympic Games".to_string(),
                "Competed in Olympics".to_string(),
            ],
        }
    }
}

/// Inclusive plausible range for a measurement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeasurementsConfig {
    pub height_cm: Range,
    pub weight_kg: Range,
}

impl Default for MeasurementsConfig {
    fn default() -> Self {
        Self {
            height_cm: Range::new(100.0, 250.0),
            weight_kg: Range::new(20.0, 300.0),
        }
    }
}

/// Date formats to try, in priority order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatesConfig {
    pub formats: Vec<DateFormat>,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            formats: DateFormat::all().to_vec(),
        }
    }
}

/// File names written into the output directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub bios: String,
    pub results: String,
    pub report: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bios: "bios_new.csv".to_string(),
            results: "results_new.csv".to_string(),
            report: "crossref_report.json".to_string(),
        }
    }
}

impl CleaningConfig {
    /// Read configuration from a YAML file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cleaning config: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse cleaning config YAML: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Read configuration from `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => Ok(Self::default()),
        }
    }

    /// Write configuration to a YAML file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let yaml =
            serde_yaml::to_string(self).with_context(|| "Failed to serialize cleaning config")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write cleaning config: {}", path.display()))?;

        Ok(())
    }

    /// Reject ranges that can never match and empty format lists
    pub fn validate(&self) -> Result<()> {
        for (name, range) in [
            ("height_cm", self.measurements.height_cm),
            ("weight_kg", self.measurements.weight_kg),
        ] {
            if !(range.min <= range.max) {
                eyre::bail!(
                    "Invalid {} range: min {} exceeds max {}",
                    name,
                    range.min,
                    range.max
                );
            }
        }
        if self.dates.formats.is_empty() {
            eyre::bail!("At least one date format must be configured");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CleaningConfig::default();
        assert!(
            config
                .roles
                .allow
                .contains(&"Competed in Olympic Games".to_string())
        );
        assert!(config.measurements.height_cm.contains(180.0));
        assert!(!config.measurements.height_cm.contains(310.0));
        assert_eq!(config.dates.formats.len(), DateFormat::all().len());
        assert_eq!(config.output.bios, "bios_new.csv");
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = "roles:\n  allow: [Coach]\n";
        let config: CleaningConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.roles.allow, vec!["Coach".to_string()]);
        assert_eq!(config.measurements, MeasurementsConfig::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/cleaning.yml");

        let mut config = CleaningConfig::default();
        config.measurements.weight_kg = Range::new(30.0, 200.0);
        config.write(&path).unwrap();

        let read = CleaningConfig::read(&path).unwrap();
        assert_eq!(read, config);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let yaml = "measurements:\n  height_cm: { min: 250.0, max: 100.0 }\n";
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cleaning.yml");
        std::fs::write(&path, yaml).unwrap();

        let err = CleaningConfig::read(&path).unwrap_err();
        assert!(err.to_string().contains("height_cm"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(CleaningConfig::load_or_default(Some(Path::new("/nonexistent/cfg.yml"))).is_err());
        assert!(CleaningConfig::load_or_default(None).is_ok());
    }
}
