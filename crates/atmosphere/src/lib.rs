//! Tabulated standard atmosphere (0–11 km) with piecewise-linear interpolation.
//!
//! Queries outside the table clamp to the nearest row instead of extrapolating,
//! so every lookup is total.

use climb_core::interp::lerp;

/// One row of the atmosphere table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereSample {
    pub altitude_m: f64,
    pub density_kg_m3: f64,
    pub speed_of_sound_m_s: f64,
    pub temperature_k: f64,
}

const fn row(altitude_m: f64, density: f64, sound: f64, temperature: f64) -> AtmosphereSample {
    AtmosphereSample {
        altitude_m,
        density_kg_m3: density,
        speed_of_sound_m_s: sound,
        temperature_k: temperature,
    }
}

/// Standard atmosphere rows, strictly increasing in altitude.
pub const TABLE: [AtmosphereSample; 13] = [
    row(0.0, 1.22500, 340.294, 288.150),
    row(500.0, 1.16727, 338.370, 284.900),
    row(1_000.0, 1.11166, 336.435, 281.651),
    row(2_000.0, 1.00655, 332.532, 275.154),
    row(3_000.0, 0.90254, 328.584, 268.659),
    row(4_000.0, 0.81935, 324.589, 262.166),
    row(5_000.0, 0.73643, 320.545, 255.676),
    row(6_000.0, 0.66011, 316.452, 249.187),
    row(7_000.0, 0.59002, 312.306, 242.700),
    row(8_000.0, 0.52678, 308.105, 236.215),
    row(9_000.0, 0.46706, 303.848, 229.733),
    row(10_000.0, 0.41351, 299.532, 223.252),
    row(11_000.0, 0.36480, 295.154, 216.774),
];

/// Air properties consumed by the performance models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirState {
    pub density_kg_m3: f64,
    pub speed_of_sound_m_s: f64,
}

impl AirState {
    /// Dynamic pressure `q = ½ρV²` at the given true airspeed (Pa).
    #[inline]
    pub fn dynamic_pressure(&self, true_airspeed_m_s: f64) -> f64 {
        0.5 * self.density_kg_m3 * true_airspeed_m_s * true_airspeed_m_s
    }

    /// Mach number at the given true airspeed.
    #[inline]
    pub fn mach(&self, true_airspeed_m_s: f64) -> f64 {
        true_airspeed_m_s / self.speed_of_sound_m_s
    }
}

/// Density and speed of sound at `altitude_m`.
pub fn lookup(altitude_m: f64) -> AirState {
    let sample = sample_at(altitude_m);
    AirState {
        density_kg_m3: sample.density_kg_m3,
        speed_of_sound_m_s: sample.speed_of_sound_m_s,
    }
}

/// Mach number for a true airspeed at a given altitude.
pub fn mach(altitude_m: f64, true_airspeed_m_s: f64) -> f64 {
    lookup(altitude_m).mach(true_airspeed_m_s)
}

/// Full interpolated row (including temperature) at `altitude_m`.
pub fn sample_at(altitude_m: f64) -> AtmosphereSample {
    let first = TABLE[0];
    let last = TABLE[TABLE.len() - 1];
    // NaN altitudes fall through both guards and the window search; treat them as sea level.
    if altitude_m.is_nan() || altitude_m <= first.altitude_m {
        return first;
    }
    if altitude_m >= last.altitude_m {
        return last;
    }

    TABLE
        .windows(2)
        .find(|pair| altitude_m >= pair[0].altitude_m && altitude_m < pair[1].altitude_m)
        .map(|pair| interpolate_row(altitude_m, &pair[0], &pair[1]))
        .unwrap_or(last)
}

fn interpolate_row(h: f64, lo: &AtmosphereSample, hi: &AtmosphereSample) -> AtmosphereSample {
    AtmosphereSample {
        altitude_m: h,
        density_kg_m3: lerp(h, lo.altitude_m, hi.altitude_m, lo.density_kg_m3, hi.density_kg_m3),
        speed_of_sound_m_s: lerp(
            h,
            lo.altitude_m,
            hi.altitude_m,
            lo.speed_of_sound_m_s,
            hi.speed_of_sound_m_s,
        ),
        temperature_k: lerp(h, lo.altitude_m, hi.altitude_m, lo.temperature_k, hi.temperature_k),
    }
}
