//! JSON summary sidecar.

use std::io::Write;

use chrono::{SecondsFormat, Utc};
use climb_core::units::seconds_to_minutes;
use climb_trajectory::Trajectory;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{ExportError, Metadata};

#[derive(Debug, Serialize)]
struct Endpoint {
    altitude_m: f64,
    speed_kmh: f64,
}

#[derive(Debug, Serialize)]
struct ManeuverUsage {
    acceleration: usize,
    climb: usize,
    acceleration_climb: usize,
}

#[derive(Debug, Serialize)]
struct PathEntry<'a> {
    altitude_m: f64,
    speed_kmh: f64,
    maneuver: Option<&'a str>,
    power_setting: Option<f64>,
    segment_time_s: f64,
    segment_fuel_kg: f64,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    generated_utc: String,
    aircraft: &'a str,
    mass_kg: f64,
    objective: &'a str,
    resolution: usize,
    start: Endpoint,
    finish: Endpoint,
    total_time_s: f64,
    total_time_min: f64,
    total_fuel_kg: f64,
    average_vertical_speed_m_s: f64,
    maneuvers: ManeuverUsage,
    segments_evaluated: usize,
    segments_feasible: usize,
    path: Vec<PathEntry<'a>>,
}

pub fn write_summary<W: Write>(
    mut writer: W,
    meta: &Metadata<'_>,
    trajectory: &Trajectory,
) -> Result<(), ExportError> {
    let path = trajectory
        .points
        .iter()
        .enumerate()
        .map(|(k, point)| {
            let segment = k.checked_sub(1).and_then(|s| trajectory.segments.get(s));
            PathEntry {
                altitude_m: point.altitude_m,
                speed_kmh: point.speed_kmh,
                maneuver: segment.map(|s| s.maneuver.code()),
                power_setting: segment.map(|s| s.power_setting),
                segment_time_s: segment.map_or(0.0, |s| s.time_s),
                segment_fuel_kg: segment.map_or(0.0, |s| s.fuel_kg),
            }
        })
        .collect();

    let counts = trajectory.maneuver_counts;
    let summary = Summary {
        generated_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        aircraft: meta.aircraft,
        mass_kg: meta.mass_kg,
        objective: trajectory.objective.suffix(),
        resolution: trajectory.grid.resolution(),
        start: Endpoint {
            altitude_m: meta.start.altitude_m,
            speed_kmh: meta.start.speed_kmh,
        },
        finish: Endpoint {
            altitude_m: meta.finish.altitude_m,
            speed_kmh: meta.finish.speed_kmh,
        },
        total_time_s: trajectory.total_time_s,
        total_time_min: seconds_to_minutes(trajectory.total_time_s),
        total_fuel_kg: trajectory.total_fuel_kg,
        average_vertical_speed_m_s: trajectory.average_vertical_speed_m_s,
        maneuvers: ManeuverUsage {
            acceleration: counts.acceleration,
            climb: counts.climb,
            acceleration_climb: counts.acceleration_climb,
        },
        segments_evaluated: trajectory.stats.evaluated,
        segments_feasible: trajectory.stats.feasible,
        path,
    };

    to_writer_pretty(&mut writer, &summary)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
