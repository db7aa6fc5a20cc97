//! Tabular CSV artifacts.

use std::io::Write;

use climb_trajectory::{Grid, Trajectory};

use crate::ExportError;

pub const TRAJECTORY_HEADER: [&str; 6] = [
    "Point",
    "H_m",
    "V_kmh",
    "Maneuver",
    "Segment_time_s",
    "Segment_fuel_kg",
];

/// One row per path point; the first row is the start and carries zero cost.
pub fn write_trajectory<W: Write>(writer: W, trajectory: &Trajectory) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TRAJECTORY_HEADER)?;

    for (k, point) in trajectory.points.iter().enumerate() {
        let segment = k.checked_sub(1).and_then(|s| trajectory.segments.get(s));
        let (maneuver, time_s, fuel_kg) = match segment {
            Some(segment) => (
                segment.maneuver.code(),
                segment.time_s.to_string(),
                segment.fuel_kg.to_string(),
            ),
            None => ("START", "0".to_string(), "0".to_string()),
        };
        csv.write_record([
            (k + 1).to_string(),
            point.altitude_m.to_string(),
            point.speed_kmh.to_string(),
            maneuver.to_string(),
            time_s,
            fuel_kg,
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Altitude rows by speed columns; unreached cells are left empty.
pub fn write_matrix<W: Write>(
    writer: W,
    grid: &Grid,
    table: &[Vec<Option<f64>>],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["H/V".to_string()];
    header.extend(grid.speeds_kmh.iter().map(f64::to_string));
    csv.write_record(&header)?;

    for (altitude, row) in grid.altitudes_m.iter().zip(table) {
        let mut record = vec![altitude.to_string()];
        record.extend(
            row.iter()
                .map(|cell| cell.map(|v| v.to_string()).unwrap_or_default()),
        );
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}
