//! Point-performance models: envelope gate, trim, and per-maneuver segment costs.
//!
//! Everything here is a pure function of an immutable [`PerformanceModel`]; the
//! trajectory solver treats the segment evaluators as edge-cost functions.

pub mod envelope;
pub mod segments;
pub mod trim;

pub use envelope::FlightEnvelope;
pub use segments::{
    FlightState, Infeasibility, Maneuver, SegmentCost, SegmentLimits, SegmentResult,
    ThrottleSetting,
};
pub use trim::TrimSettings;

use climb_aero::DragPolar;
use climb_propulsion::Aircraft;

/// Immutable bundle of aircraft and model calibrations shared by all evaluators.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceModel {
    pub aircraft: Aircraft,
    pub polar: DragPolar,
    pub envelope: FlightEnvelope,
    pub trim: TrimSettings,
    pub limits: SegmentLimits,
}

impl PerformanceModel {
    /// Baseline calibrations for the given aircraft.
    pub fn new(aircraft: Aircraft) -> Self {
        Self {
            aircraft,
            polar: DragPolar::default(),
            envelope: FlightEnvelope::default(),
            trim: TrimSettings::default(),
            limits: SegmentLimits::default(),
        }
    }

    pub fn with_envelope(mut self, envelope: FlightEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_limits(mut self, limits: SegmentLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Whether `(altitude, speed)` lies inside the modeled envelope.
    pub fn in_envelope(&self, altitude_m: f64, speed_kmh: f64) -> bool {
        self.envelope.contains(altitude_m, speed_kmh)
    }

    /// Aerodynamic drag force (N) at a given trim angle and flight condition.
    pub(crate) fn drag(&self, alpha_deg: f64, dynamic_pressure: f64) -> f64 {
        self.polar.drag_coefficient(alpha_deg) * dynamic_pressure * self.aircraft.wing_area_m2
    }
}
