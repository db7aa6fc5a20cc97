//! Angle of attack for vertical force balance.

use climb_atmosphere as atmosphere;
use climb_core::constants::{DEG_PER_RAD, G};

use crate::PerformanceModel;

/// Bounds and fallbacks for the trim solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimSettings {
    /// Below this dynamic pressure (Pa) the balance is not solved.
    pub min_dynamic_pressure_pa: f64,
    /// Angle returned when the dynamic pressure is too low (deg).
    pub low_energy_alpha_deg: f64,
    pub max_alpha_deg: f64,
}

impl Default for TrimSettings {
    fn default() -> Self {
        Self {
            min_dynamic_pressure_pa: 100.0,
            low_energy_alpha_deg: 6.0,
            max_alpha_deg: 10.0,
        }
    }
}

impl PerformanceModel {
    /// Angle of attack (deg) at which lift plus the vertical thrust component
    /// carries the weight of `mass_kg`.
    ///
    /// Lift is `(Cy0 + Cy'·α)·q·S`; the thrust term uses the 1° installation
    /// approximation `P / 57.3`. The result is clamped to `[0, max_alpha_deg]`.
    pub fn required_alpha(&self, altitude_m: f64, true_airspeed_m_s: f64, mass_kg: f64) -> f64 {
        let air = atmosphere::lookup(altitude_m);
        let thrust = self
            .aircraft
            .powerplant
            .thrust(altitude_m, true_airspeed_m_s);
        let q = air.dynamic_pressure(true_airspeed_m_s);

        if q < self.trim.min_dynamic_pressure_pa {
            return self.trim.low_energy_alpha_deg;
        }

        let qs = q * self.aircraft.wing_area_m2;
        let alpha =
            (mass_kg * G - thrust / DEG_PER_RAD - self.polar.cy0 * qs) / (self.polar.cy_slope * qs);
        alpha.clamp(0.0, self.trim.max_alpha_deg)
    }
}

#[cfg(test)]
mod tests {
    use crate::PerformanceModel;
    use crate::segments::tests::baseline_aircraft;

    #[test]
    fn low_dynamic_pressure_returns_default() {
        let model = PerformanceModel::new(baseline_aircraft());
        // q = ½·1.225·10² ≈ 61 Pa
        assert_eq!(model.required_alpha(0.0, 10.0, 155_000.0), 6.0);
    }

    #[test]
    fn clamps_to_maximum_at_low_speed() {
        let model = PerformanceModel::new(baseline_aircraft());
        assert_eq!(model.required_alpha(500.0, 330.0 / 3.6, 155_000.0), 10.0);
    }

    #[test]
    fn alpha_drops_as_speed_rises() {
        let model = PerformanceModel::new(baseline_aircraft());
        let slow = model.required_alpha(7_000.0, 180.0, 155_000.0);
        let fast = model.required_alpha(7_000.0, 236.0, 155_000.0);
        assert!(fast < slow);
        assert!(fast > 0.0 && fast < 10.0);
    }

    #[test]
    fn light_aircraft_trims_near_zero_lift() {
        let model = PerformanceModel::new(baseline_aircraft());
        let alpha = model.required_alpha(0.0, 250.0, 1_000.0);
        assert!((alpha - model.polar.min_drag_alpha_deg()).abs() < 0.01);
    }
}
