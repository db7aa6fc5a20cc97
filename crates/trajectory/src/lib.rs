//! Trajectory façade crate: grid construction, DP sweep, and path reconstruction.

pub mod grid;
pub mod objective;
pub mod path;
pub mod solver;
pub mod tables;

pub use facade::*;
pub use climb_performance as performance;
pub use climb_propulsion as propulsion;

mod facade;
