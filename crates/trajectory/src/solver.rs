//! Topologically ordered DP sweep over the altitude × speed grid.
//!
//! Every edge increases the altitude index, the speed index, or both, so visiting
//! nodes in row-major order finalises each node before it is expanded and a single
//! pass yields the optimum over the enumerated edge set.

use std::collections::BTreeMap;

use climb_config::MAX_RESOLUTION;
use climb_performance::{Infeasibility, Maneuver, PerformanceModel, SegmentResult};
use climb_propulsion::Aircraft;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::grid::{FlightPoint, Grid, NodeIndex};
use crate::objective::{Objective, ObjectiveProfile};
use crate::path::{self, Trajectory};
use crate::tables::{Arrival, Cell, DpTables};

/// Immutable inputs to one or more solver invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub model: PerformanceModel,
    pub start: FlightPoint,
    pub finish: FlightPoint,
    pub resolution: usize,
    pub min_time: ObjectiveProfile,
    pub min_fuel: ObjectiveProfile,
}

impl Scenario {
    /// Scenario with baseline model calibrations and objective profiles.
    pub fn new(
        aircraft: Aircraft,
        start: FlightPoint,
        finish: FlightPoint,
        resolution: usize,
    ) -> Self {
        Self {
            model: PerformanceModel::new(aircraft),
            start,
            finish,
            resolution,
            min_time: ObjectiveProfile::baseline(Objective::MinimizeTime),
            min_fuel: ObjectiveProfile::baseline(Objective::MinimizeFuel),
        }
    }

    pub fn profile(&self, objective: Objective) -> &ObjectiveProfile {
        match objective {
            Objective::MinimizeTime => &self.min_time,
            Objective::MinimizeFuel => &self.min_fuel,
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::linear(self.start, self.finish, self.resolution)
    }

    /// Reject inputs for which the sweep is meaningless.
    pub fn validate(&self) -> Result<(), SolveError> {
        let invalid = |reason: String| Err(SolveError::InvalidScenario(reason));
        let aircraft = &self.model.aircraft;

        if self.resolution == 0 {
            return invalid("grid resolution must be at least 1".into());
        }
        if self.resolution > MAX_RESOLUTION {
            return invalid(format!(
                "grid resolution must be at most {MAX_RESOLUTION} (got {})",
                self.resolution
            ));
        }
        for (name, value) in [
            ("aircraft mass", aircraft.mass_kg),
            ("wing area", aircraft.wing_area_m2),
            ("throttle percentage", aircraft.powerplant.throttle_percent),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{name} must be positive (got {value})"));
            }
        }
        if aircraft.powerplant.engine_count == 0 {
            return invalid("engine count must be at least 1".into());
        }
        for (name, value) in [
            ("start altitude", self.start.altitude_m),
            ("start speed", self.start.speed_kmh),
            ("finish altitude", self.finish.altitude_m),
            ("finish speed", self.finish.speed_kmh),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite"));
            }
        }
        for objective in Objective::ALL {
            if self.profile(objective).settings.is_empty() {
                return invalid(format!("no power settings configured for {objective}"));
            }
        }
        Ok(())
    }
}

/// Solver failures. Infeasible segments are not errors; they only prune edges.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("no feasible path reaches the goal state ({objective})")]
    NoPathFound { objective: Objective },
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

/// Counters collected during a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub evaluated: usize,
    pub feasible: usize,
    pub improved: usize,
    pub rejected: BTreeMap<Infeasibility, usize>,
}

/// Grid and filled tables from one objective's sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub objective: Objective,
    pub grid: Grid,
    pub tables: DpTables,
    pub stats: SweepStats,
}

/// Run the full DP sweep without reconstructing a path.
pub fn sweep(scenario: &Scenario, objective: Objective) -> Result<Sweep, SolveError> {
    scenario.validate()?;

    let grid = scenario.grid();
    let profile = scenario.profile(objective);
    let mut tables = DpTables::new(scenario.resolution).ok_or_else(|| {
        SolveError::InvalidScenario(format!("grid resolution {} overflows", scenario.resolution))
    })?;

    debug!(
        %objective,
        resolution = scenario.resolution,
        candidates = profile.settings.len(),
        "starting grid sweep"
    );

    let stats = relax_grid(&scenario.model, &grid, profile, objective, &mut tables);

    debug!(
        %objective,
        evaluated = stats.evaluated,
        feasible = stats.feasible,
        improved = stats.improved,
        reached = tables.reached_count(),
        "grid sweep complete"
    );
    for (reason, count) in &stats.rejected {
        trace!(%objective, %reason, count, "rejected segments");
    }

    Ok(Sweep {
        objective,
        grid,
        tables,
        stats,
    })
}

/// One relaxation pass over every reached node in row-major order.
///
/// Applying a second pass to already-swept tables changes nothing.
pub fn relax_grid(
    model: &PerformanceModel,
    grid: &Grid,
    profile: &ObjectiveProfile,
    objective: Objective,
    tables: &mut DpTables,
) -> SweepStats {
    let mut stats = SweepStats::default();
    let n = grid.resolution();

    for i in 0..=n {
        for j in 0..=n {
            let node = NodeIndex::new(i, j);
            let Some(origin) = tables.get(node).copied() else {
                continue;
            };
            let Some(from) = grid.state(node) else {
                continue;
            };

            for throttle in &profile.settings {
                for maneuver in Maneuver::ALL {
                    let target = node.offset(maneuver.step());
                    let Some(to) = grid.state(target) else {
                        continue;
                    };

                    stats.evaluated += 1;
                    match model.evaluate(maneuver, from, to, *throttle) {
                        SegmentResult::Feasible(cost) => {
                            stats.feasible += 1;
                            let candidate = Cell {
                                cost: origin.cost + objective.edge_cost(&cost),
                                time_s: origin.time_s + cost.time_s,
                                fuel_kg: origin.fuel_kg + cost.fuel_kg,
                                arrival: Some(Arrival {
                                    from: node,
                                    maneuver,
                                    power_setting: throttle.power_setting,
                                }),
                            };
                            if tables.relax(target, candidate) {
                                stats.improved += 1;
                            }
                        }
                        SegmentResult::Infeasible(reason) => {
                            *stats.rejected.entry(reason).or_default() += 1;
                        }
                    }
                }
            }
        }
    }

    stats
}

/// Optimal trajectory from the start node to the goal node under `objective`.
pub fn solve(scenario: &Scenario, objective: Objective) -> Result<Trajectory, SolveError> {
    let sweep = sweep(scenario, objective)?;
    let goal = sweep.grid.goal();

    if !sweep.tables.is_reached(goal) {
        warn!(
            %objective,
            reached = sweep.tables.reached_count(),
            "goal state unreachable on this grid"
        );
        return Err(SolveError::NoPathFound { objective });
    }

    let trajectory = path::reconstruct(sweep, scenario.start, scenario.finish)?;
    info!(
        %objective,
        points = trajectory.points.len(),
        total_time_s = trajectory.total_time_s,
        total_fuel_kg = trajectory.total_fuel_kg,
        "optimal trajectory found"
    );
    Ok(trajectory)
}
