//! Convenience façade tying configuration records to the solver.

pub use crate::grid::{FlightPoint, Grid, NodeIndex};
pub use crate::objective::{Objective, ObjectiveProfile};
pub use crate::path::{ManeuverCounts, PathPoint, PathSegment, Trajectory};
pub use crate::solver::{Scenario, SolveError, Sweep, SweepStats, solve, sweep};

pub mod aircraft {
    use climb_config::AircraftConfig;
    use climb_propulsion::{Aircraft, EngineModel, Powerplant};
    use thiserror::Error;

    /// Errors surfaced when selecting aircraft from a catalog.
    #[derive(Debug, Error)]
    pub enum AircraftError {
        #[error("aircraft '{0}' not found in catalog")]
        NotFound(String),
        #[error("aircraft catalog is empty")]
        EmptyCatalog,
    }

    /// Convert an `AircraftConfig` into the runtime `Aircraft`.
    pub fn from_config(config: &AircraftConfig) -> Aircraft {
        let mut engine = EngineModel::default();
        if let Some(thrust) = config.sea_level_thrust_n {
            engine.sea_level_thrust_n = thrust;
        }

        Aircraft {
            name: config.name.clone(),
            mass_kg: config.mass_kg,
            wing_area_m2: config.wing_area_m2,
            powerplant: Powerplant {
                engine,
                engine_count: config.engine_count,
                throttle_percent: config.throttle_percent,
            },
        }
    }

    /// Select an aircraft by case-insensitive name, defaulting to the first entry.
    pub fn select(
        configs: &[AircraftConfig],
        requested: Option<&str>,
    ) -> Result<Aircraft, AircraftError> {
        let Some(first) = configs.first() else {
            return Err(AircraftError::EmptyCatalog);
        };

        let chosen = match requested {
            Some(name) => {
                let upper = name.to_uppercase();
                configs
                    .iter()
                    .find(|cfg| cfg.name.to_uppercase() == upper)
                    .ok_or_else(|| AircraftError::NotFound(name.to_string()))?
            }
            None => first,
        };

        Ok(from_config(chosen))
    }
}

pub mod scenario {
    use climb_config::{FlightPointConfig, ObjectiveConfig, ScenarioConfig};
    use climb_propulsion::Aircraft;

    use super::aircraft;
    use crate::grid::FlightPoint;
    use crate::objective::ObjectiveProfile;
    use crate::solver::Scenario;

    pub fn point(config: &FlightPointConfig) -> FlightPoint {
        FlightPoint {
            altitude_m: config.altitude_m,
            speed_kmh: config.speed_kmh,
        }
    }

    pub fn profile(config: &ObjectiveConfig) -> ObjectiveProfile {
        ObjectiveProfile::new(&config.power_settings, config.vertical_speed_factor)
    }

    /// Build a solver scenario from a configuration record.
    pub fn from_config(config: &ScenarioConfig) -> Scenario {
        with_aircraft(config, aircraft::from_config(&config.aircraft))
    }

    /// Like [`from_config`], but with the aircraft supplied separately
    /// (for instance, selected from a catalog).
    pub fn with_aircraft(config: &ScenarioConfig, aircraft: Aircraft) -> Scenario {
        let mut scenario = Scenario::new(
            aircraft,
            point(&config.start),
            point(&config.finish),
            config.grid.resolution,
        );
        scenario.min_time = profile(&config.objectives.min_time);
        scenario.min_fuel = profile(&config.objectives.min_fuel);
        scenario
    }
}
