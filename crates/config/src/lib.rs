//! Configuration models and loaders for the climb optimizer.
//!
//! Every field has a default matching the baseline study, so a scenario file only
//! needs to name what it changes.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aircraft mass properties and installed powerplant.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AircraftConfig {
    pub name: String,
    pub mass_kg: f64,
    pub wing_area_m2: f64,
    pub engine_count: u32,
    pub throttle_percent: f64,
    /// Per-engine sea-level thrust override (N).
    pub sea_level_thrust_n: Option<f64>,
}

impl Default for AircraftConfig {
    fn default() -> Self {
        Self {
            name: "TY-134".to_string(),
            mass_kg: 155_000.0,
            wing_area_m2: 300.0,
            engine_count: 4,
            throttle_percent: 110.0,
            sea_level_thrust_n: None,
        }
    }
}

/// Altitude/speed pair describing a trajectory endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct FlightPointConfig {
    pub altitude_m: f64,
    pub speed_kmh: f64,
}

/// Largest accepted grid resolution; the DP tables hold `(resolution + 1)²` cells.
pub const MAX_RESOLUTION: usize = 1_000;

/// Grid discretisation.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Number of intervals along each axis (the grid has `resolution + 1` levels).
    pub resolution: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { resolution: 10 }
    }
}

/// Candidate power settings and climb aggressiveness for one objective.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ObjectiveConfig {
    pub power_settings: Vec<f64>,
    pub vertical_speed_factor: f64,
}

impl ObjectiveConfig {
    /// High-power candidates with the full vertical-speed allowance.
    pub fn min_time() -> Self {
        Self {
            power_settings: vec![1.10, 1.05, 1.00],
            vertical_speed_factor: 1.0,
        }
    }

    /// Reduced-power candidates with a tighter vertical-speed cap.
    pub fn min_fuel() -> Self {
        Self {
            power_settings: vec![0.90, 0.85, 0.80],
            vertical_speed_factor: 0.70,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ObjectivesConfig {
    #[serde(default = "ObjectiveConfig::min_time")]
    pub min_time: ObjectiveConfig,
    #[serde(default = "ObjectiveConfig::min_fuel")]
    pub min_fuel: ObjectiveConfig,
}

impl Default for ObjectivesConfig {
    fn default() -> Self {
        Self {
            min_time: ObjectiveConfig::min_time(),
            min_fuel: ObjectiveConfig::min_fuel(),
        }
    }
}

/// Complete optimisation scenario.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub aircraft: AircraftConfig,
    #[serde(default = "default_start")]
    pub start: FlightPointConfig,
    #[serde(default = "default_finish")]
    pub finish: FlightPointConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub objectives: ObjectivesConfig,
}

fn default_start() -> FlightPointConfig {
    FlightPointConfig {
        altitude_m: 500.0,
        speed_kmh: 330.0,
    }
}

fn default_finish() -> FlightPointConfig {
    FlightPointConfig {
        altitude_m: 7_000.0,
        speed_kmh: 850.0,
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            aircraft: AircraftConfig::default(),
            start: default_start(),
            finish: default_finish(),
            grid: GridConfig::default(),
            objectives: ObjectivesConfig::default(),
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a positive number, got {value}")))
    }
}

impl AircraftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("aircraft.mass_kg", self.mass_kg)?;
        require_positive("aircraft.wing_area_m2", self.wing_area_m2)?;
        require_positive("aircraft.throttle_percent", self.throttle_percent)?;
        if self.engine_count == 0 {
            return Err(invalid("aircraft.engine_count", "at least one engine is required"));
        }
        if let Some(thrust) = self.sea_level_thrust_n {
            require_positive("aircraft.sea_level_thrust_n", thrust)?;
        }
        Ok(())
    }
}

impl ObjectiveConfig {
    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.power_settings.is_empty() {
            return Err(invalid(field, "power_settings must not be empty"));
        }
        for &power in &self.power_settings {
            require_positive(field, power)?;
        }
        require_positive(field, self.vertical_speed_factor)
    }
}

impl ScenarioConfig {
    /// Range checks that do not depend on the physical models.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aircraft.validate()?;
        for (field, value) in [
            ("start.altitude_m", self.start.altitude_m),
            ("finish.altitude_m", self.finish.altitude_m),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        require_positive("start.speed_kmh", self.start.speed_kmh)?;
        require_positive("finish.speed_kmh", self.finish.speed_kmh)?;
        match self.grid.resolution {
            0 => return Err(invalid("grid.resolution", "must be at least 1")),
            n if n > MAX_RESOLUTION => {
                return Err(invalid(
                    "grid.resolution",
                    format!("must be at most {MAX_RESOLUTION}, got {n}"),
                ));
            }
            _ => {}
        }
        self.objectives.min_time.validate("objectives.min_time")?;
        self.objectives.min_fuel.validate("objectives.min_fuel")
    }
}

/// Load a scenario from a TOML or YAML file (chosen by extension) and validate it.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let scenario: ScenarioConfig = load_record(path.as_ref())?;
    scenario.validate()?;
    Ok(scenario)
}

/// Load aircraft definitions from a directory of TOML files or a YAML list.
pub fn load_aircraft_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<AircraftConfig>, ConfigError> {
    let aircraft: Vec<AircraftConfig> = load_records(path)?;
    for entry in &aircraft {
        entry.validate()?;
    }
    Ok(aircraft)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_record<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
