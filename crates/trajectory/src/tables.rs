//! Dynamic-programming state tables indexed by grid node.

use climb_performance::Maneuver;

use crate::grid::NodeIndex;

/// Edge that produced the best-known arrival at a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    pub from: NodeIndex,
    pub maneuver: Maneuver,
    pub power_setting: f64,
}

/// Best-known state of a reached node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Accumulated objective cost (s or kg).
    pub cost: f64,
    pub time_s: f64,
    pub fuel_kg: f64,
    /// `None` only for the start node.
    pub arrival: Option<Arrival>,
}

/// Square table of optional cells; `None` means unreached.
#[derive(Debug, Clone, PartialEq)]
pub struct DpTables {
    side: usize,
    cells: Vec<Option<Cell>>,
}

impl DpTables {
    /// Tables for a grid with `resolution` intervals, with only the start node reached.
    ///
    /// Returns `None` when the cell count overflows `usize`.
    pub fn new(resolution: usize) -> Option<Self> {
        let side = resolution.checked_add(1)?;
        let mut cells = vec![None; side.checked_mul(side)?];
        cells[0] = Some(Cell {
            cost: 0.0,
            time_s: 0.0,
            fuel_kg: 0.0,
            arrival: None,
        });
        Some(Self { side, cells })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    fn offset(&self, node: NodeIndex) -> Option<usize> {
        (node.i < self.side && node.j < self.side).then(|| node.i * self.side + node.j)
    }

    pub fn get(&self, node: NodeIndex) -> Option<&Cell> {
        self.offset(node).and_then(|idx| self.cells[idx].as_ref())
    }

    pub fn cost(&self, node: NodeIndex) -> Option<f64> {
        self.get(node).map(|cell| cell.cost)
    }

    pub fn predecessor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.get(node)
            .and_then(|cell| cell.arrival.map(|arrival| arrival.from))
    }

    pub fn is_reached(&self, node: NodeIndex) -> bool {
        self.get(node).is_some()
    }

    pub fn reached_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Store `candidate` at `node` if it strictly improves the known cost.
    ///
    /// Returns whether the cell changed. Nodes outside the table are ignored.
    pub fn relax(&mut self, node: NodeIndex, candidate: Cell) -> bool {
        let Some(idx) = self.offset(node) else {
            return false;
        };
        if let Some(existing) = &self.cells[idx] {
            // Negated so a NaN candidate never replaces a stored cell.
            if !(candidate.cost < existing.cost) {
                return false;
            }
        }
        self.cells[idx] = Some(candidate);
        true
    }

    /// Cumulative time per node, rows by altitude.
    pub fn time_table(&self) -> Vec<Vec<Option<f64>>> {
        self.project(|cell| cell.time_s)
    }

    /// Cumulative fuel per node, rows by altitude.
    pub fn fuel_table(&self) -> Vec<Vec<Option<f64>>> {
        self.project(|cell| cell.fuel_kg)
    }

    fn project(&self, value: impl Fn(&Cell) -> f64) -> Vec<Vec<Option<f64>>> {
        self.cells
            .chunks(self.side)
            .map(|row| row.iter().map(|cell| cell.as_ref().map(&value)).collect())
            .collect()
    }
}
