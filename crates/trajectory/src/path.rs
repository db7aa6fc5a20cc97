//! Path reconstruction from the predecessor table.

use climb_performance::Maneuver;

use crate::grid::{FlightPoint, Grid, NodeIndex};
use crate::objective::Objective;
use crate::solver::{SolveError, Sweep, SweepStats};

/// One node on the optimal path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub node: NodeIndex,
    pub altitude_m: f64,
    pub speed_kmh: f64,
}

/// Edge between consecutive path points, with its incremental cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub maneuver: Maneuver,
    pub power_setting: f64,
    pub time_s: f64,
    pub fuel_kg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManeuverCounts {
    pub acceleration: usize,
    pub climb: usize,
    pub acceleration_climb: usize,
}

impl ManeuverCounts {
    pub fn record(&mut self, maneuver: Maneuver) {
        match maneuver {
            Maneuver::Acceleration => self.acceleration += 1,
            Maneuver::Climb => self.climb += 1,
            Maneuver::AccelerationClimb => self.acceleration_climb += 1,
        }
    }

    pub fn get(&self, maneuver: Maneuver) -> usize {
        match maneuver {
            Maneuver::Acceleration => self.acceleration,
            Maneuver::Climb => self.climb,
            Maneuver::AccelerationClimb => self.acceleration_climb,
        }
    }

    pub fn total(&self) -> usize {
        self.acceleration + self.climb + self.acceleration_climb
    }
}

/// Optimal trajectory plus the tables it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub objective: Objective,
    /// Start node first, goal node last.
    pub points: Vec<PathPoint>,
    /// `segments[k]` connects `points[k]` to `points[k + 1]`.
    pub segments: Vec<PathSegment>,
    pub total_time_s: f64,
    pub total_fuel_kg: f64,
    pub average_vertical_speed_m_s: f64,
    pub maneuver_counts: ManeuverCounts,
    pub grid: Grid,
    pub time_table: Vec<Vec<Option<f64>>>,
    pub fuel_table: Vec<Vec<Option<f64>>>,
    pub stats: SweepStats,
}

impl Trajectory {
    pub fn start(&self) -> Option<&PathPoint> {
        self.points.first()
    }

    pub fn finish(&self) -> Option<&PathPoint> {
        self.points.last()
    }

    /// Sum of per-segment times; equals `total_time_s` up to rounding.
    pub fn segment_time_sum(&self) -> f64 {
        self.segments.iter().map(|s| s.time_s).sum()
    }

    pub fn segment_fuel_sum(&self) -> f64 {
        self.segments.iter().map(|s| s.fuel_kg).sum()
    }
}

/// Walk predecessors back from the goal node and assemble the trajectory.
pub fn reconstruct(
    sweep: Sweep,
    start: FlightPoint,
    finish: FlightPoint,
) -> Result<Trajectory, SolveError> {
    let Sweep {
        objective,
        grid,
        tables,
        stats,
    } = sweep;
    let no_path = || SolveError::NoPathFound { objective };

    let goal = grid.goal();
    let goal_cell = *tables.get(goal).ok_or_else(no_path)?;

    let mut points = Vec::new();
    let mut segments = Vec::new();
    let mut counts = ManeuverCounts::default();

    let mut node = goal;
    let mut cell = goal_cell;
    while let Some(arrival) = cell.arrival {
        let previous = *tables.get(arrival.from).ok_or_else(no_path)?;
        let point = grid.point(node).ok_or_else(no_path)?;
        points.push(PathPoint {
            node,
            altitude_m: point.altitude_m,
            speed_kmh: point.speed_kmh,
        });
        segments.push(PathSegment {
            maneuver: arrival.maneuver,
            power_setting: arrival.power_setting,
            time_s: cell.time_s - previous.time_s,
            fuel_kg: cell.fuel_kg - previous.fuel_kg,
        });
        counts.record(arrival.maneuver);
        node = arrival.from;
        cell = previous;
    }

    if node != NodeIndex::START {
        return Err(no_path());
    }
    let origin = grid.point(node).ok_or_else(no_path)?;
    points.push(PathPoint {
        node,
        altitude_m: origin.altitude_m,
        speed_kmh: origin.speed_kmh,
    });
    points.reverse();
    segments.reverse();

    let climb_m = finish.altitude_m - start.altitude_m;
    let average_vertical_speed_m_s = if goal_cell.time_s > 0.0 {
        climb_m / goal_cell.time_s
    } else {
        0.0
    };

    Ok(Trajectory {
        objective,
        points,
        segments,
        total_time_s: goal_cell.time_s,
        total_fuel_kg: goal_cell.fuel_kg,
        average_vertical_speed_m_s,
        maneuver_counts: counts,
        time_table: tables.time_table(),
        fuel_table: tables.fuel_table(),
        grid,
        stats,
    })
}
