//! Engine thrust lapse, specific fuel consumption, and aircraft mass properties.

use climb_atmosphere as atmosphere;
use climb_core::constants::G;
use climb_core::units::m_to_km;

/// Throttle regime used to pick the specific-fuel-consumption curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleRegime {
    /// Military / maximum continuous (power setting at or above 100 %).
    Military,
    /// Near-cruise throttle, 90–100 %.
    NearCruise,
    /// Part throttle, 75–90 %.
    PartThrottle,
    /// Low throttle, below 75 %.
    Low,
}

impl ThrottleRegime {
    /// Classify a power setting expressed as a multiple of nominal thrust.
    pub fn from_power_setting(power_setting: f64) -> Self {
        if power_setting >= 1.0 {
            ThrottleRegime::Military
        } else if power_setting >= 0.90 {
            ThrottleRegime::NearCruise
        } else if power_setting >= 0.75 {
            ThrottleRegime::PartThrottle
        } else {
            ThrottleRegime::Low
        }
    }

    /// Empirical SFC multiplier for this regime at the given power setting.
    pub fn sfc_factor(self, power_setting: f64) -> f64 {
        match self {
            ThrottleRegime::Military => 1.0 + 0.35 * (power_setting - 1.0).powf(1.1),
            ThrottleRegime::NearCruise => 0.90 - 0.01 * (power_setting - 0.90) / 0.10,
            ThrottleRegime::PartThrottle => 0.90 + 0.10 * (0.90 - power_setting) / 0.15,
            ThrottleRegime::Low => 1.08,
        }
    }
}

/// Single-engine calibration: sea-level thrust and lapse with altitude/Mach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineModel {
    pub sea_level_thrust_n: f64,
    pub ceiling_km: f64,
    pub ceiling_thrust_fraction: f64,
    pub lapse_exponent: f64,
    pub base_sfc: f64,
}

impl Default for EngineModel {
    fn default() -> Self {
        Self {
            sea_level_thrust_n: 58_860.0,
            ceiling_km: 11.0,
            ceiling_thrust_fraction: 0.55,
            lapse_exponent: 0.65,
            base_sfc: 0.58,
        }
    }
}

impl EngineModel {
    /// Nominal thrust of one engine at altitude and Mach number.
    pub fn nominal_thrust(&self, altitude_m: f64, mach: f64) -> f64 {
        let h_km = m_to_km(altitude_m);
        let altitude_factor = if h_km <= 0.0 {
            1.0
        } else if h_km >= self.ceiling_km {
            self.ceiling_thrust_fraction
        } else {
            1.0 - (1.0 - self.ceiling_thrust_fraction)
                * (h_km / self.ceiling_km).powf(self.lapse_exponent)
        };
        let mach_factor = (0.92 + 0.22 * mach).min(1.10);
        self.sea_level_thrust_n * altitude_factor * mach_factor
    }
}

/// Installed engines and their nominal throttle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Powerplant {
    pub engine: EngineModel,
    pub engine_count: u32,
    pub throttle_percent: f64,
}

impl Powerplant {
    /// Total installed thrust at nominal throttle (N), before any power-setting multiplier.
    pub fn thrust(&self, altitude_m: f64, true_airspeed_m_s: f64) -> f64 {
        let mach = atmosphere::mach(altitude_m, true_airspeed_m_s);
        self.engine.nominal_thrust(altitude_m, mach)
            * self.engine_count as f64
            * (self.throttle_percent / 100.0)
    }

    /// Thrust actually delivered at a power setting.
    pub fn thrust_at(&self, altitude_m: f64, true_airspeed_m_s: f64, power_setting: f64) -> f64 {
        self.thrust(altitude_m, true_airspeed_m_s) * power_setting
    }

    /// Specific fuel consumption per unit thrust; multiply by thrust (N) and
    /// elapsed hours for fuel mass (kg).
    pub fn specific_fuel_consumption(
        &self,
        altitude_m: f64,
        true_airspeed_m_s: f64,
        power_setting: f64,
    ) -> f64 {
        let mach = atmosphere::mach(altitude_m, true_airspeed_m_s);
        let h_km = m_to_km(altitude_m);

        let regime = ThrottleRegime::from_power_setting(power_setting).sfc_factor(power_setting);
        let altitude_factor = 1.0 - 0.06 * (h_km / 11.0).min(1.0);
        let mach_factor = 1.0 + 0.12 * (mach - 0.5).max(0.0);

        self.engine.base_sfc * regime * altitude_factor * mach_factor / G
    }
}

/// Aircraft definition used by the performance and trajectory models.
#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    pub name: String,
    pub mass_kg: f64,
    pub wing_area_m2: f64,
    pub powerplant: Powerplant,
}

impl Aircraft {
    /// Weight force (N).
    pub fn weight_n(&self) -> f64 {
        self.mass_kg * G
    }

    /// Thrust-to-weight ratio at sea level, zero speed, nominal throttle.
    pub fn static_thrust_to_weight(&self) -> f64 {
        self.powerplant.thrust(0.0, 0.0) / self.weight_n()
    }
}
