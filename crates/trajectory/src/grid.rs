//! Altitude × speed grid between the start and finish states.

use climb_core::units::kmh_to_ms;
use climb_performance::FlightState;

/// Altitude (m) and speed (km/h) of a trajectory endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPoint {
    pub altitude_m: f64,
    pub speed_kmh: f64,
}

/// Grid coordinates: `i` indexes altitude, `j` indexes speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex {
    pub i: usize,
    pub j: usize,
}

impl NodeIndex {
    pub const START: NodeIndex = NodeIndex { i: 0, j: 0 };

    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// Node reached by applying a `(di, dj)` step.
    pub fn offset(self, (di, dj): (usize, usize)) -> Self {
        Self {
            i: self.i + di,
            j: self.j + dj,
        }
    }
}

/// Linearly spaced altitude and speed levels, each of length `resolution + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub altitudes_m: Vec<f64>,
    pub speeds_kmh: Vec<f64>,
    pub speeds_m_s: Vec<f64>,
}

impl Grid {
    pub fn linear(start: FlightPoint, finish: FlightPoint, resolution: usize) -> Self {
        let n = resolution as f64;
        let dh = (finish.altitude_m - start.altitude_m) / n;
        let dv = (finish.speed_kmh - start.speed_kmh) / n;

        let altitudes_m: Vec<f64> = (0..=resolution)
            .map(|i| start.altitude_m + i as f64 * dh)
            .collect();
        let speeds_kmh: Vec<f64> = (0..=resolution)
            .map(|j| start.speed_kmh + j as f64 * dv)
            .collect();
        let speeds_m_s = speeds_kmh.iter().copied().map(kmh_to_ms).collect();

        Self {
            altitudes_m,
            speeds_kmh,
            speeds_m_s,
        }
    }

    /// Number of intervals along each axis.
    pub fn resolution(&self) -> usize {
        self.altitudes_m.len().saturating_sub(1)
    }

    pub fn goal(&self) -> NodeIndex {
        let n = self.resolution();
        NodeIndex::new(n, n)
    }

    /// Flight state at a grid node, or `None` outside the grid.
    pub fn state(&self, node: NodeIndex) -> Option<FlightState> {
        Some(FlightState {
            altitude_m: *self.altitudes_m.get(node.i)?,
            speed_m_s: *self.speeds_m_s.get(node.j)?,
        })
    }

    pub fn point(&self, node: NodeIndex) -> Option<FlightPoint> {
        Some(FlightPoint {
            altitude_m: *self.altitudes_m.get(node.i)?,
            speed_kmh: *self.speeds_kmh.get(node.j)?,
        })
    }
}
