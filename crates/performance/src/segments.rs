//! Maneuver segment evaluators: elapsed time and fuel between two grid states.
//!
//! Each evaluator is pure. Infeasibility is reported as a value, never as an error,
//! so the trajectory solver can simply drop the edge.

use std::fmt;

use climb_atmosphere as atmosphere;
use climb_core::constants::{G, SECONDS_PER_HOUR};
use climb_core::units::{deg_to_rad, ms_to_kmh};

use crate::PerformanceModel;

/// Maneuver that connects two neighbouring grid nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Maneuver {
    /// Level acceleration at constant altitude.
    Acceleration,
    /// Climb at constant true airspeed.
    Climb,
    /// Simultaneous acceleration and climb.
    AccelerationClimb,
}

impl Maneuver {
    /// Evaluation order used when relaxing a node.
    pub const ALL: [Maneuver; 3] = [
        Maneuver::Acceleration,
        Maneuver::Climb,
        Maneuver::AccelerationClimb,
    ];

    /// Stable identifier used in exported artifacts.
    pub fn code(self) -> &'static str {
        match self {
            Maneuver::Acceleration => "ACCELERATION",
            Maneuver::Climb => "CLIMB",
            Maneuver::AccelerationClimb => "ACCELERATION_CLIMB",
        }
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Maneuver::Acceleration => "Acceleration",
            Maneuver::Climb => "Climb",
            Maneuver::AccelerationClimb => "Acc+Climb",
        }
    }

    /// Grid index increment `(altitude, speed)` produced by this maneuver.
    pub fn step(self) -> (usize, usize) {
        match self {
            Maneuver::Acceleration => (0, 1),
            Maneuver::Climb => (1, 0),
            Maneuver::AccelerationClimb => (1, 1),
        }
    }
}

impl fmt::Display for Maneuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Altitude and true airspeed of a grid node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub altitude_m: f64,
    pub speed_m_s: f64,
}

impl FlightState {
    pub fn speed_kmh(&self) -> f64 {
        ms_to_kmh(self.speed_m_s)
    }
}

/// Throttle regime candidate for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleSetting {
    /// Multiple of nominal thrust (1.10 = 110 %).
    pub power_setting: f64,
    /// Scale applied to the maximum vertical speed.
    pub vertical_speed_factor: f64,
}

/// Physical cost of a feasible segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentCost {
    pub time_s: f64,
    pub fuel_kg: f64,
}

/// Why a segment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Infeasibility {
    OutOfEnvelope,
    BelowClimbSpeed,
    InsufficientAcceleration,
    NoExcessThrust,
    ShallowClimb,
    DurationOutOfRange,
    VerticalSpeedOutOfRange,
    SpeedRateOutOfRange,
    ComponentInfeasible,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Infeasibility::OutOfEnvelope => "endpoint outside flight envelope",
            Infeasibility::BelowClimbSpeed => "speed below minimum climb speed",
            Infeasibility::InsufficientAcceleration => "thrust cannot overcome drag",
            Infeasibility::NoExcessThrust => "no excess thrust for climb",
            Infeasibility::ShallowClimb => "climb gradient too shallow",
            Infeasibility::DurationOutOfRange => "segment duration out of range",
            Infeasibility::VerticalSpeedOutOfRange => "vertical speed out of range",
            Infeasibility::SpeedRateOutOfRange => "speed change rate out of range",
            Infeasibility::ComponentInfeasible => "acceleration or climb component infeasible",
        };
        f.write_str(text)
    }
}

/// Outcome of a segment evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentResult {
    Feasible(SegmentCost),
    Infeasible(Infeasibility),
}

impl SegmentResult {
    pub fn is_feasible(&self) -> bool {
        matches!(self, SegmentResult::Feasible(_))
    }

    pub fn cost(&self) -> Option<SegmentCost> {
        match self {
            SegmentResult::Feasible(cost) => Some(*cost),
            SegmentResult::Infeasible(_) => None,
        }
    }
}

/// Operating limits applied by the segment evaluators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLimits {
    /// Net acceleration at or below this is treated as no gain (m/s²).
    pub min_acceleration_m_s2: f64,
    pub max_acceleration_time_s: f64,
    pub min_climb_speed_kmh: f64,
    pub max_climb_angle_deg: f64,
    pub min_climb_sine: f64,
    pub max_vertical_speed_m_s: f64,
    pub max_climb_time_s: f64,
    /// Fraction of `min_climb_speed_kmh` accepted for combined maneuvers.
    pub combined_speed_margin: f64,
    pub combined_climb_rate_m_s: f64,
    pub combined_accel_rate_kmh_s: f64,
    /// Extra headroom on the vertical-speed cap for combined maneuvers.
    pub combined_vertical_speed_headroom: f64,
    pub min_combined_vertical_speed_m_s: f64,
    pub max_combined_speed_rate_m_s2: f64,
    pub max_combined_time_s: f64,
}

impl Default for SegmentLimits {
    fn default() -> Self {
        Self {
            min_acceleration_m_s2: 0.01,
            max_acceleration_time_s: 800.0,
            min_climb_speed_kmh: 350.0,
            max_climb_angle_deg: 15.0,
            min_climb_sine: 0.005,
            max_vertical_speed_m_s: 8.0,
            max_climb_time_s: 1_500.0,
            combined_speed_margin: 0.95,
            combined_climb_rate_m_s: 6.0,
            combined_accel_rate_kmh_s: 20.0,
            combined_vertical_speed_headroom: 1.2,
            min_combined_vertical_speed_m_s: 0.3,
            max_combined_speed_rate_m_s2: 6.0,
            max_combined_time_s: 2_000.0,
        }
    }
}

impl PerformanceModel {
    /// Dispatch to the evaluator for `maneuver` between two grid states.
    pub fn evaluate(
        &self,
        maneuver: Maneuver,
        from: FlightState,
        to: FlightState,
        throttle: ThrottleSetting,
    ) -> SegmentResult {
        match maneuver {
            Maneuver::Acceleration => self.acceleration(
                from.altitude_m,
                from.speed_m_s,
                to.speed_m_s,
                throttle.power_setting,
            ),
            Maneuver::Climb => {
                self.climb(from.altitude_m, to.altitude_m, from.speed_m_s, throttle)
            }
            Maneuver::AccelerationClimb => self.acceleration_climb(from, to, throttle),
        }
    }

    /// Level acceleration from `v1` to `v2` (m/s) at constant altitude.
    pub fn acceleration(
        &self,
        altitude_m: f64,
        v1_m_s: f64,
        v2_m_s: f64,
        power_setting: f64,
    ) -> SegmentResult {
        use SegmentResult::Infeasible;

        if !self.in_envelope(altitude_m, ms_to_kmh(v1_m_s))
            || !self.in_envelope(altitude_m, ms_to_kmh(v2_m_s))
        {
            return Infeasible(Infeasibility::OutOfEnvelope);
        }

        let mass = self.aircraft.mass_kg;
        let v_avg = 0.5 * (v1_m_s + v2_m_s);
        let alpha = self.required_alpha(altitude_m, v_avg, mass);
        let thrust = self
            .aircraft
            .powerplant
            .thrust_at(altitude_m, v_avg, power_setting);
        let q = atmosphere::lookup(altitude_m).dynamic_pressure(v_avg);
        let drag = self.drag(alpha, q);

        let dv_dt = (thrust * deg_to_rad(alpha).cos() - drag) / mass;
        if dv_dt <= self.limits.min_acceleration_m_s2 {
            return Infeasible(Infeasibility::InsufficientAcceleration);
        }

        let dt = (v2_m_s - v1_m_s) / dv_dt;
        if !(dt > 0.0 && dt <= self.limits.max_acceleration_time_s) {
            return Infeasible(Infeasibility::DurationOutOfRange);
        }

        self.feasible(altitude_m, v_avg, power_setting, thrust, dt)
    }

    /// Constant-speed climb from `h1` to `h2` (m).
    pub fn climb(
        &self,
        h1_m: f64,
        h2_m: f64,
        speed_m_s: f64,
        throttle: ThrottleSetting,
    ) -> SegmentResult {
        use SegmentResult::Infeasible;

        let limits = &self.limits;
        let speed_kmh = ms_to_kmh(speed_m_s);
        if speed_kmh < limits.min_climb_speed_kmh {
            return Infeasible(Infeasibility::BelowClimbSpeed);
        }
        if !self.in_envelope(h1_m, speed_kmh) || !self.in_envelope(h2_m, speed_kmh) {
            return Infeasible(Infeasibility::OutOfEnvelope);
        }

        let mass = self.aircraft.mass_kg;
        let h_avg = 0.5 * (h1_m + h2_m);
        let alpha = self.required_alpha(h_avg, speed_m_s, mass);
        let thrust = self
            .aircraft
            .powerplant
            .thrust_at(h_avg, speed_m_s, throttle.power_setting);
        let q = atmosphere::lookup(h_avg).dynamic_pressure(speed_m_s);
        let excess = thrust - self.drag(alpha, q);
        if excess <= 0.0 {
            return Infeasible(Infeasibility::NoExcessThrust);
        }

        let max_sine = deg_to_rad(limits.max_climb_angle_deg).sin();
        let sin_theta = (excess / (mass * G)).min(max_sine);
        if sin_theta <= limits.min_climb_sine {
            return Infeasible(Infeasibility::ShallowClimb);
        }

        let vy_cap = limits.max_vertical_speed_m_s * throttle.vertical_speed_factor;
        let vy = (speed_m_s * sin_theta).min(vy_cap);

        let dt = (h2_m - h1_m) / vy;
        if !(dt > 0.0 && dt <= limits.max_climb_time_s) {
            return Infeasible(Infeasibility::DurationOutOfRange);
        }

        self.feasible(h_avg, speed_m_s, throttle.power_setting, thrust, dt)
    }

    /// Combined acceleration and climb between two grid states.
    ///
    /// Timing comes from the slower of the nominal climb-rate and acceleration-rate
    /// schedules rather than from the equations of motion; the pure acceleration and
    /// climb evaluators at averaged conditions act as a feasibility gate.
    pub fn acceleration_climb(
        &self,
        from: FlightState,
        to: FlightState,
        throttle: ThrottleSetting,
    ) -> SegmentResult {
        use SegmentResult::Infeasible;

        let limits = &self.limits;
        let v_avg = 0.5 * (from.speed_m_s + to.speed_m_s);
        let h_avg = 0.5 * (from.altitude_m + to.altitude_m);

        if ms_to_kmh(v_avg) < limits.min_climb_speed_kmh * limits.combined_speed_margin {
            return Infeasible(Infeasibility::BelowClimbSpeed);
        }
        if !self.in_envelope(from.altitude_m, from.speed_kmh())
            || !self.in_envelope(to.altitude_m, to.speed_kmh())
        {
            return Infeasible(Infeasibility::OutOfEnvelope);
        }

        let acceleration =
            self.acceleration(h_avg, from.speed_m_s, to.speed_m_s, throttle.power_setting);
        let climb = self.climb(from.altitude_m, to.altitude_m, v_avg, throttle);
        if !acceleration.is_feasible() || !climb.is_feasible() {
            return Infeasible(Infeasibility::ComponentInfeasible);
        }

        let dh = to.altitude_m - from.altitude_m;
        let dv_kmh = to.speed_kmh() - from.speed_kmh();
        let time_for_climb = dh / limits.combined_climb_rate_m_s;
        let time_for_accel = dv_kmh.abs() / limits.combined_accel_rate_kmh_s;
        let dt = time_for_climb.max(time_for_accel);
        if !(dt > 0.0 && dt <= limits.max_combined_time_s) {
            return Infeasible(Infeasibility::DurationOutOfRange);
        }

        let vy = dh / dt;
        let vy_cap = limits.max_vertical_speed_m_s
            * throttle.vertical_speed_factor
            * limits.combined_vertical_speed_headroom;
        if !(vy > limits.min_combined_vertical_speed_m_s && vy <= vy_cap) {
            return Infeasible(Infeasibility::VerticalSpeedOutOfRange);
        }

        let dv_dt = (to.speed_m_s - from.speed_m_s) / dt;
        if dv_dt.abs() > limits.max_combined_speed_rate_m_s2 {
            return Infeasible(Infeasibility::SpeedRateOutOfRange);
        }

        let thrust = self
            .aircraft
            .powerplant
            .thrust_at(h_avg, v_avg, throttle.power_setting);
        self.feasible(h_avg, v_avg, throttle.power_setting, thrust, dt)
    }

    fn feasible(
        &self,
        altitude_m: f64,
        speed_m_s: f64,
        power_setting: f64,
        thrust_n: f64,
        dt: f64,
    ) -> SegmentResult {
        let sfc = self
            .aircraft
            .powerplant
            .specific_fuel_consumption(altitude_m, speed_m_s, power_setting);
        SegmentResult::Feasible(SegmentCost {
            time_s: dt,
            fuel_kg: sfc * thrust_n * dt / SECONDS_PER_HOUR,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::FlightEnvelope;
    use climb_core::units::kmh_to_ms;
    use climb_propulsion::{Aircraft, EngineModel, Powerplant};

    pub(crate) fn baseline_aircraft() -> Aircraft {
        Aircraft {
            name: "TY-134".to_string(),
            mass_kg: 155_000.0,
            wing_area_m2: 300.0,
            powerplant: Powerplant {
                engine: EngineModel::default(),
                engine_count: 4,
                throttle_percent: 110.0,
            },
        }
    }

    fn model() -> PerformanceModel {
        PerformanceModel::new(baseline_aircraft())
    }

    const MAX_THRUST: ThrottleSetting = ThrottleSetting {
        power_setting: 1.10,
        vertical_speed_factor: 1.0,
    };

    fn state(altitude_m: f64, speed_kmh: f64) -> FlightState {
        FlightState {
            altitude_m,
            speed_m_s: kmh_to_ms(speed_kmh),
        }
    }

    #[test]
    fn maneuver_mapping_is_exhaustive() {
        let codes: Vec<_> = Maneuver::ALL.iter().map(|m| m.code()).collect();
        assert_eq!(codes, ["ACCELERATION", "CLIMB", "ACCELERATION_CLIMB"]);
        assert_eq!(Maneuver::AccelerationClimb.to_string(), "Acc+Climb");
        assert_eq!(Maneuver::Climb.step(), (1, 0));
    }

    #[test]
    fn level_acceleration_is_feasible_at_low_altitude() {
        let result = model().acceleration(500.0, kmh_to_ms(330.0), kmh_to_ms(382.0), 1.10);
        let cost = result.cost().expect("feasible acceleration");
        assert!(cost.time_s > 0.0 && cost.time_s < 60.0, "time = {}", cost.time_s);
        assert!(cost.fuel_kg > 0.0);
    }

    #[test]
    fn deceleration_is_rejected() {
        let result = model().acceleration(500.0, kmh_to_ms(382.0), kmh_to_ms(330.0), 1.10);
        assert_eq!(
            result,
            SegmentResult::Infeasible(Infeasibility::DurationOutOfRange)
        );
    }

    #[test]
    fn acceleration_outside_envelope_is_rejected() {
        let result = model().acceleration(500.0, kmh_to_ms(880.0), kmh_to_ms(950.0), 1.10);
        assert_eq!(result, SegmentResult::Infeasible(Infeasibility::OutOfEnvelope));
    }

    #[test]
    fn acceleration_runs_out_of_thrust_before_an_open_envelope_ends() {
        let open = FlightEnvelope {
            max_speed_kmh: 3_000.0,
            max_mach: 10.0,
            ..FlightEnvelope::default()
        };
        let patient = SegmentLimits {
            max_acceleration_time_s: f64::INFINITY,
            ..SegmentLimits::default()
        };
        let model = model().with_envelope(open).with_limits(patient);

        let mut target = 400.0;
        let first_failure = loop {
            assert!(target <= 3_000.0, "acceleration never became infeasible");
            let from = kmh_to_ms(target - 50.0);
            match model.acceleration(500.0, from, kmh_to_ms(target), 0.80) {
                SegmentResult::Feasible(_) => target += 10.0,
                SegmentResult::Infeasible(reason) => break reason,
            }
        };
        assert!(target > 400.0, "no feasible acceleration below {target} km/h");
        assert_eq!(first_failure, Infeasibility::InsufficientAcceleration);
    }

    #[test]
    fn acceleration_duration_is_capped() {
        let limits = SegmentLimits {
            max_acceleration_time_s: 5.0,
            ..SegmentLimits::default()
        };
        let (v1, v2) = (kmh_to_ms(330.0), kmh_to_ms(382.0));
        assert!(model().acceleration(500.0, v1, v2, 1.10).is_feasible());
        assert_eq!(
            model().with_limits(limits).acceleration(500.0, v1, v2, 1.10),
            SegmentResult::Infeasible(Infeasibility::DurationOutOfRange)
        );
    }

    #[test]
    fn climb_requires_minimum_speed() {
        let result = model().climb(500.0, 1_150.0, kmh_to_ms(330.0), MAX_THRUST);
        assert_eq!(result, SegmentResult::Infeasible(Infeasibility::BelowClimbSpeed));
    }

    #[test]
    fn climb_vertical_speed_is_capped_per_objective() {
        let model = model();
        let fast = model
            .climb(500.0, 1_150.0, kmh_to_ms(382.0), MAX_THRUST)
            .cost()
            .expect("feasible climb");
        assert!((fast.time_s - 650.0 / 8.0).abs() < 1e-9);

        let economical = ThrottleSetting {
            power_setting: 0.80,
            vertical_speed_factor: 0.70,
        };
        let slow = model
            .climb(500.0, 1_150.0, kmh_to_ms(382.0), economical)
            .cost()
            .expect("feasible climb");
        assert!((slow.time_s - 650.0 / 5.6).abs() < 1e-9);
    }

    #[test]
    fn custom_limits_tighten_the_climb_rate() {
        let limits = SegmentLimits {
            max_vertical_speed_m_s: 4.0,
            ..SegmentLimits::default()
        };
        let cost = model()
            .with_limits(limits)
            .climb(500.0, 1_150.0, kmh_to_ms(382.0), MAX_THRUST)
            .cost()
            .expect("feasible climb");
        assert!((cost.time_s - 650.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn climb_without_excess_thrust_is_rejected() {
        let idle = ThrottleSetting {
            power_setting: 0.10,
            vertical_speed_factor: 1.0,
        };
        let result = model().climb(500.0, 1_150.0, kmh_to_ms(382.0), idle);
        assert_eq!(result, SegmentResult::Infeasible(Infeasibility::NoExcessThrust));
    }

    #[test]
    fn near_level_climb_angle_is_too_shallow() {
        // sin(0.25°) is below the 0.005 gradient floor.
        let limits = SegmentLimits {
            max_climb_angle_deg: 0.25,
            ..SegmentLimits::default()
        };
        let result = model()
            .with_limits(limits)
            .climb(500.0, 1_150.0, kmh_to_ms(382.0), MAX_THRUST);
        assert_eq!(result, SegmentResult::Infeasible(Infeasibility::ShallowClimb));
    }

    #[test]
    fn climb_duration_is_capped() {
        let limits = SegmentLimits {
            max_climb_time_s: 60.0,
            ..SegmentLimits::default()
        };
        let result = model()
            .with_limits(limits)
            .climb(500.0, 1_150.0, kmh_to_ms(382.0), MAX_THRUST);
        assert_eq!(
            result,
            SegmentResult::Infeasible(Infeasibility::DurationOutOfRange)
        );
    }

    #[test]
    fn combined_maneuver_uses_rate_schedule() {
        let (from, to) = (state(500.0, 382.0), state(1_150.0, 434.0));
        let result = model().acceleration_climb(from, to, MAX_THRUST);
        let cost = result.cost().expect("feasible combined maneuver");
        assert!((cost.time_s - 650.0 / 6.0).abs() < 1e-9);
        assert!(cost.fuel_kg > 0.0);
    }

    #[test]
    fn combined_maneuver_respects_vertical_speed_cap() {
        let throttle = ThrottleSetting {
            power_setting: 1.10,
            vertical_speed_factor: 0.5,
        };
        let (from, to) = (state(500.0, 382.0), state(1_150.0, 434.0));
        let result = model().acceleration_climb(from, to, throttle);
        assert_eq!(
            result,
            SegmentResult::Infeasible(Infeasibility::VerticalSpeedOutOfRange)
        );
    }

    #[test]
    fn combined_maneuver_needs_climb_speed() {
        let (from, to) = (state(500.0, 250.0), state(1_150.0, 300.0));
        let result = model().acceleration_climb(from, to, MAX_THRUST);
        assert_eq!(result, SegmentResult::Infeasible(Infeasibility::BelowClimbSpeed));
    }

    #[test]
    fn combined_maneuver_needs_both_components() {
        // No speed change leaves the acceleration component without a duration.
        let (from, to) = (state(500.0, 382.0), state(1_150.0, 382.0));
        let result = model().acceleration_climb(from, to, MAX_THRUST);
        assert_eq!(
            result,
            SegmentResult::Infeasible(Infeasibility::ComponentInfeasible)
        );
    }

    #[test]
    fn combined_maneuver_duration_is_capped() {
        let limits = SegmentLimits {
            max_combined_time_s: 100.0,
            ..SegmentLimits::default()
        };
        let (from, to) = (state(500.0, 382.0), state(1_150.0, 434.0));
        let result = model().with_limits(limits).acceleration_climb(from, to, MAX_THRUST);
        assert_eq!(
            result,
            SegmentResult::Infeasible(Infeasibility::DurationOutOfRange)
        );
    }

    #[test]
    fn combined_maneuver_limits_speed_change_rate() {
        // 52 km/h over 650/6 s is about 0.133 m/s².
        let limits = SegmentLimits {
            max_combined_speed_rate_m_s2: 0.1,
            ..SegmentLimits::default()
        };
        let (from, to) = (state(500.0, 382.0), state(1_150.0, 434.0));
        let result = model().with_limits(limits).acceleration_climb(from, to, MAX_THRUST);
        assert_eq!(
            result,
            SegmentResult::Infeasible(Infeasibility::SpeedRateOutOfRange)
        );
    }

    #[test]
    fn evaluate_dispatches_to_matching_evaluator() {
        let model = model();
        let from = state(500.0, 382.0);
        let to = state(1_150.0, 434.0);
        assert_eq!(
            model.evaluate(Maneuver::AccelerationClimb, from, to, MAX_THRUST),
            model.acceleration_climb(from, to, MAX_THRUST)
        );
        assert_eq!(
            model.evaluate(Maneuver::Acceleration, from, to, MAX_THRUST),
            model.acceleration(500.0, from.speed_m_s, to.speed_m_s, 1.10)
        );
        assert_eq!(
            model.evaluate(Maneuver::Climb, from, to, MAX_THRUST),
            model.climb(500.0, 1_150.0, from.speed_m_s, MAX_THRUST)
        );
    }
}
