//! Climb and acceleration trajectory optimizer.
//!
//! The physical models, grid solver, and reporting live in workspace crates;
//! this facade re-exports them so the CLI and integration tests share one import path.

pub use climb_aero as aero;
pub use climb_atmosphere as atmosphere;
pub use climb_config as config;
pub use climb_core as core;
pub use climb_export as export;
pub use climb_performance as performance;
pub use climb_propulsion as propulsion;
pub use climb_trajectory as trajectory;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
