//! TOML-based run configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::assets::catalog::DEFAULT_CATALOG_FILE;
use crate::sim::types::MeritOrder;

/// Top-level run configuration parsed from TOML.
///
/// Load from TOML with [`RunConfig::from_toml_file`] or use
/// [`RunConfig::from_preset`] for a built-in scenario set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Input and output locations.
    #[serde(default)]
    pub data: DataConfig,
    /// Scenarios to run, in order (`[[scenario]]` tables).
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<ScenarioConfig>,
}

/// Input and output locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Directory holding demand files and their companion catalog.
    pub dir: PathBuf,
    /// Catalog file name looked up next to each demand file.
    pub catalog_file: String,
    /// Directory for saved snapshots and simulated results.
    pub output_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            output_dir: PathBuf::from("SavedResults"),
        }
    }
}

impl DataConfig {
    /// Full path of a scenario's demand file.
    pub fn demand_path(&self, scenario: &ScenarioConfig) -> PathBuf {
        self.dir.join(&scenario.demand)
    }
}

/// One fleet/demand combination to dispatch.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Scenario name, used for output file names.
    pub name: String,
    /// Demand file name, relative to `data.dir`.
    pub demand: String,
    /// Catalog units in the fleet; empty means the whole catalog.
    #[serde(default)]
    pub units: Vec<String>,
    /// Keep only units that co-generate electricity.
    #[serde(default)]
    pub electric_only: bool,
    /// Dispatch ranking: `"cost"` or `"emissions"`.
    #[serde(default)]
    pub merit_order: MeritOrder,
}

impl ScenarioConfig {
    pub fn new(name: &str, demand: &str) -> Self {
        Self {
            name: name.to_string(),
            demand: demand.to_string(),
            units: Vec::new(),
            electric_only: false,
            merit_order: MeritOrder::Cost,
        }
    }

    fn with_units(mut self, units: &[&str]) -> Self {
        self.units = units.iter().map(|u| u.to_string()).collect();
        self
    }

    fn with_merit_order(mut self, order: MeritOrder) -> Self {
        self.merit_order = order;
        self
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"scenario[1].name"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl RunConfig {
    /// Full catalog against the winter and summer demand profiles.
    pub fn seasons() -> Self {
        Self {
            data: DataConfig::default(),
            scenarios: vec![
                ScenarioConfig::new("Winter", "winter.csv"),
                ScenarioConfig::new("Summer", "summer.csv"),
            ],
        }
    }

    /// The two reference fleets, both against winter demand.
    pub fn fleets() -> Self {
        Self {
            data: DataConfig::default(),
            scenarios: vec![
                ScenarioConfig::new("Scenario1", "winter.csv").with_units(&["GB1", "GB2", "OB1"]),
                ScenarioConfig::new("Scenario2", "winter.csv")
                    .with_units(&["GB1", "OB1", "GM1", "HP1"]),
            ],
        }
    }

    /// Full catalog in winter, ranked by cost and by CO₂.
    pub fn least_co2() -> Self {
        Self {
            data: DataConfig::default(),
            scenarios: vec![
                ScenarioConfig::new("LeastCost", "winter.csv"),
                ScenarioConfig::new("LeastCO2", "winter.csv").with_merit_order(MeritOrder::Emissions),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["seasons", "fleets", "least_co2"];

    /// Loads a run configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "seasons" => Ok(Self::seasons()),
            "fleets" => Ok(Self::fleets()),
            "least_co2" => Ok(Self::least_co2()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a run configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads the file at `path` when given, otherwise the named preset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Config`] if the file cannot be read or
    /// parsed, or the preset is unknown.
    pub fn load(path: Option<&Path>, preset: &str) -> crate::error::Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::from_preset(preset)?,
        };
        Ok(config)
    }

    /// Parses a run configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.data.catalog_file.trim().is_empty() {
            errors.push(ConfigError::new("data.catalog_file", "must not be empty"));
        }
        if self.scenarios.is_empty() {
            errors.push(ConfigError::new("scenario", "at least one scenario is required"));
        }

        for (i, s) in self.scenarios.iter().enumerate() {
            if s.name.trim().is_empty() {
                errors.push(ConfigError::new(format!("scenario[{i}].name"), "must not be empty"));
            } else if self.scenarios[..i].iter().any(|other| other.name == s.name) {
                errors.push(ConfigError::new(
                    format!("scenario[{i}].name"),
                    format!("duplicate scenario name \"{}\"", s.name),
                ));
            }
            if s.demand.trim().is_empty() {
                errors.push(ConfigError::new(format!("scenario[{i}].demand"), "must not be empty"));
            }
        }

        errors
    }

    /// Looks up a scenario by name.
    pub fn scenario(&self, name: &str) -> Option<&ScenarioConfig> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}
