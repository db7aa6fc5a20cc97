//! Optimisation objectives and their throttle candidates.

use std::fmt;

use climb_performance::{SegmentCost, ThrottleSetting};

/// Quantity minimised by the grid search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    MinimizeTime,
    MinimizeFuel,
}

impl Objective {
    pub const ALL: [Objective; 2] = [Objective::MinimizeTime, Objective::MinimizeFuel];

    /// Edge weight contributed by a feasible segment.
    #[inline]
    pub fn edge_cost(self, cost: &SegmentCost) -> f64 {
        match self {
            Objective::MinimizeTime => cost.time_s,
            Objective::MinimizeFuel => cost.fuel_kg,
        }
    }

    /// File-name suffix used for exported artifacts.
    pub fn suffix(self) -> &'static str {
        match self {
            Objective::MinimizeTime => "min_time",
            Objective::MinimizeFuel => "min_fuel",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::MinimizeTime => f.write_str("minimize time"),
            Objective::MinimizeFuel => f.write_str("minimize fuel"),
        }
    }
}

/// Throttle candidates tried on every edge, in priority order.
///
/// Earlier entries win ties during relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveProfile {
    pub settings: Vec<ThrottleSetting>,
}

impl ObjectiveProfile {
    pub fn new(power_settings: &[f64], vertical_speed_factor: f64) -> Self {
        Self {
            settings: power_settings
                .iter()
                .map(|&power_setting| ThrottleSetting {
                    power_setting,
                    vertical_speed_factor,
                })
                .collect(),
        }
    }

    /// Baseline profile for an objective.
    pub fn baseline(objective: Objective) -> Self {
        match objective {
            Objective::MinimizeTime => Self::new(&[1.10, 1.05, 1.00], 1.0),
            Objective::MinimizeFuel => Self::new(&[0.90, 0.85, 0.80], 0.70),
        }
    }
}
