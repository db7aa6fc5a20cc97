//! Flight-envelope gate applied to every segment endpoint.

use climb_atmosphere as atmosphere;
use climb_core::units::kmh_to_ms;

/// Rectangular speed/altitude envelope with a Mach ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightEnvelope {
    pub min_speed_kmh: f64,
    pub max_speed_kmh: f64,
    pub min_altitude_m: f64,
    pub max_altitude_m: f64,
    pub max_mach: f64,
}

impl Default for FlightEnvelope {
    fn default() -> Self {
        Self {
            min_speed_kmh: 200.0,
            max_speed_kmh: 900.0,
            min_altitude_m: 0.0,
            max_altitude_m: 11_000.0,
            max_mach: 0.85,
        }
    }
}

impl FlightEnvelope {
    /// `true` when the state lies inside every bound (bounds inclusive).
    pub fn contains(&self, altitude_m: f64, speed_kmh: f64) -> bool {
        if !(self.min_speed_kmh..=self.max_speed_kmh).contains(&speed_kmh) {
            return false;
        }
        if !(self.min_altitude_m..=self.max_altitude_m).contains(&altitude_m) {
            return false;
        }
        atmosphere::mach(altitude_m, kmh_to_ms(speed_kmh)) <= self.max_mach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_speed_and_altitude_outside_bounds() {
        let env = FlightEnvelope::default();
        assert!(env.contains(500.0, 330.0));
        assert!(!env.contains(500.0, 199.0));
        assert!(!env.contains(500.0, 901.0));
        assert!(!env.contains(-1.0, 400.0));
        assert!(!env.contains(11_001.0, 400.0));
        assert!(env.contains(0.0, 200.0));
        assert!(env.contains(11_000.0, 400.0));
    }

    #[test]
    fn rejects_high_mach_even_inside_speed_band() {
        let env = FlightEnvelope::default();
        // 900 km/h = 250 m/s; Mach 0.847 at 11 km limit is 0.85·295.154 = 250.9 m/s.
        assert!(env.contains(11_000.0, 900.0));
        let tight = FlightEnvelope {
            max_mach: 0.80,
            ..FlightEnvelope::default()
        };
        assert!(!tight.contains(11_000.0, 900.0));
        assert!(tight.contains(0.0, 900.0));
    }
}
