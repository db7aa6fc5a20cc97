//! Core units, constants, and shared primitives for the climb optimizer workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Gravitational acceleration used by the performance models (m/s²).
    pub const G: f64 = 9.81;
    /// Degrees per radian, using the engineering approximation of the source tables.
    pub const DEG_PER_RAD: f64 = 57.3;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::DEG_PER_RAD;

    /// Convert kilometres per hour to metres per second.
    #[inline]
    pub fn kmh_to_ms(v: f64) -> f64 {
        v / 3.6
    }

    /// Convert metres per second to kilometres per hour.
    #[inline]
    pub fn ms_to_kmh(v: f64) -> f64 {
        v * 3.6
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(deg: f64) -> f64 {
        deg / DEG_PER_RAD
    }

    /// Convert seconds to minutes.
    #[inline]
    pub fn seconds_to_minutes(seconds: f64) -> f64 {
        seconds / 60.0
    }
}

/// Small numeric helpers shared by the table-driven models.
pub mod interp {
    /// Linear interpolation of `y` at `x` between `(x0, y0)` and `(x1, y1)`.
    ///
    /// Degenerate intervals return `y0`.
    #[inline]
    pub fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
        if (x1 - x0).abs() < 1e-9 {
            return y0;
        }
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }

    /// Relative difference between two values, measured against the larger magnitude.
    #[inline]
    pub fn relative_diff(a: f64, b: f64) -> f64 {
        let scale = a.abs().max(b.abs());
        if scale == 0.0 { 0.0 } else { (a - b).abs() / scale }
    }
}

#[cfg(test)]
mod tests {
    use super::interp::{lerp, relative_diff};
    use super::units::{kmh_to_ms, ms_to_kmh};

    #[test]
    fn speed_conversions_round_trip() {
        assert!((ms_to_kmh(kmh_to_ms(850.0)) - 850.0).abs() < 1e-12);
        assert!((kmh_to_ms(360.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        assert_eq!(lerp(0.0, 0.0, 10.0, 1.0, 3.0), 1.0);
        assert_eq!(lerp(10.0, 0.0, 10.0, 1.0, 3.0), 3.0);
        assert!((lerp(5.0, 0.0, 10.0, 1.0, 3.0) - 2.0).abs() < 1e-12);
        assert_eq!(lerp(4.0, 2.0, 2.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn relative_diff_is_symmetric() {
        assert_eq!(relative_diff(0.0, 0.0), 0.0);
        assert!((relative_diff(100.0, 99.0) - 0.01).abs() < 1e-12);
        assert_eq!(relative_diff(2.0, 1.0), relative_diff(1.0, 2.0));
    }
}
