//! Human-readable console reports.

use std::io::{self, Write};

use climb_core::units::seconds_to_minutes;
use climb_trajectory::performance::Maneuver;
use climb_trajectory::propulsion::Aircraft;
use climb_trajectory::{FlightPoint, Grid, Trajectory};

use crate::ArtifactPaths;

const HEAVY_RULE: &str = "=================================================";
const RULE: &str = "-------------------------------------------------------------";
const THIN_RULE: &str = "---------------------------------------------";

/// Aircraft and endpoint banner printed before any solve.
pub fn write_banner(
    w: &mut dyn Write,
    aircraft: &Aircraft,
    start: FlightPoint,
    finish: FlightPoint,
) -> io::Result<()> {
    let powerplant = &aircraft.powerplant;
    writeln!(w, "{HEAVY_RULE}")?;
    writeln!(w, "   {} CLIMB TRAJECTORY OPTIMIZATION", aircraft.name)?;
    writeln!(w, "{HEAVY_RULE}")?;
    writeln!(
        w,
        "Aircraft: {} (mass {:.2} t)",
        aircraft.name,
        aircraft.mass_kg / 1000.0
    )?;
    writeln!(
        w,
        "Engines: {} x {:.0} N ({:.0}% of nominal)",
        powerplant.engine_count, powerplant.engine.sea_level_thrust_n, powerplant.throttle_percent
    )?;
    writeln!(
        w,
        "Start: H = {:.2} m, V = {:.2} km/h",
        start.altitude_m, start.speed_kmh
    )?;
    writeln!(
        w,
        "Finish: H = {:.2} m, V = {:.2} km/h",
        finish.altitude_m, finish.speed_kmh
    )?;
    writeln!(w, "{HEAVY_RULE}")?;
    writeln!(w)
}

/// Integer-valued matrix with `---` for unreached nodes.
pub fn write_matrix(
    w: &mut dyn Write,
    title: &str,
    grid: &Grid,
    table: &[Vec<Option<f64>>],
) -> io::Result<()> {
    writeln!(w, "{title}")?;
    write!(w, "     V->")?;
    for speed in &grid.speeds_kmh {
        write!(w, "{:>7}", *speed as i64)?;
    }
    writeln!(w)?;
    writeln!(w, "H")?;
    for (altitude, row) in grid.altitudes_m.iter().zip(table) {
        write!(w, "{:>5}   ", *altitude as i64)?;
        for cell in row {
            match cell {
                Some(value) => write!(w, "{:>7}", *value as i64)?,
                None => write!(w, "{:>7}", "---")?,
            }
        }
        writeln!(w)?;
    }
    writeln!(w)
}

pub fn write_path_table(w: &mut dyn Write, trajectory: &Trajectory) -> io::Result<()> {
    writeln!(w, "Optimal trajectory ({}):", trajectory.objective)?;
    writeln!(w, "{RULE}")?;
    writeln!(
        w,
        "{:<6}{:>10}{:>11}  {:<14}{:>9}{:>9}",
        "Point", "H (m)", "V (km/h)", "Maneuver", "Time", "Fuel"
    )?;
    writeln!(w, "{RULE}")?;
    for (k, point) in trajectory.points.iter().enumerate() {
        let segment = k.checked_sub(1).and_then(|s| trajectory.segments.get(s));
        let (label, time_s, fuel_kg) = match segment {
            Some(segment) => (segment.maneuver.label(), segment.time_s, segment.fuel_kg),
            None => ("Start", 0.0, 0.0),
        };
        writeln!(
            w,
            "{:<6}{:>10.1}{:>11.1}  {:<14}{:>9.1}{:>9.1}",
            k + 1,
            point.altitude_m,
            point.speed_kmh,
            label,
            time_s,
            fuel_kg
        )?;
    }
    writeln!(w)
}

/// Maneuver usage and the objective totals.
pub fn write_totals(w: &mut dyn Write, trajectory: &Trajectory) -> io::Result<()> {
    let counts = &trajectory.maneuver_counts;
    writeln!(w, "{HEAVY_RULE}")?;
    writeln!(w, "Used in trajectory:")?;
    for maneuver in Maneuver::ALL {
        writeln!(w, "- {}: {} times", maneuver.label(), counts.get(maneuver))?;
    }
    writeln!(w, "{THIN_RULE}")?;
    writeln!(
        w,
        "Maneuver time:     {:.2} s  ({:.2} min)",
        trajectory.total_time_s,
        seconds_to_minutes(trajectory.total_time_s)
    )?;
    writeln!(w, "Fuel consumption:  {:.2} kg", trajectory.total_fuel_kg)?;
    writeln!(
        w,
        "Average Vy:        {:.2} m/s  ({:.2} m/min)",
        trajectory.average_vertical_speed_m_s,
        trajectory.average_vertical_speed_m_s * 60.0
    )?;
    writeln!(w, "{HEAVY_RULE}")
}

/// Full per-objective report: both matrices, the path, and totals.
pub fn write_report(w: &mut dyn Write, trajectory: &Trajectory) -> io::Result<()> {
    write_matrix(w, "Time matrix (s):", &trajectory.grid, &trajectory.time_table)?;
    write_matrix(
        w,
        "Fuel consumption matrix (kg):",
        &trajectory.grid,
        &trajectory.fuel_table,
    )?;
    write_path_table(w, trajectory)?;
    write_totals(w, trajectory)
}

pub fn write_created_files(w: &mut dyn Write, paths: &ArtifactPaths) -> io::Result<()> {
    writeln!(w, "Created files:")?;
    for path in paths.iter() {
        writeln!(w, "- {}", path.display())?;
    }
    writeln!(w)
}

/// Side-by-side totals of the two objectives. Deltas are fuel-optimal minus time-optimal.
pub fn write_comparison(
    w: &mut dyn Write,
    min_time: &Trajectory,
    min_fuel: &Trajectory,
) -> io::Result<()> {
    writeln!(w, "{HEAVY_RULE}")?;
    writeln!(w, "Criterion comparison")?;
    writeln!(w, "{HEAVY_RULE}")?;
    writeln!(
        w,
        "{:<16}{:>12}{:>12}{:>12}{:>9}",
        "", "Min time", "Min fuel", "Delta", "%"
    )?;

    let rows = [
        ("Time (s)", min_time.total_time_s, min_fuel.total_time_s),
        ("Fuel (kg)", min_time.total_fuel_kg, min_fuel.total_fuel_kg),
        (
            "Avg Vy (m/s)",
            min_time.average_vertical_speed_m_s,
            min_fuel.average_vertical_speed_m_s,
        ),
    ];
    for (label, time_value, fuel_value) in rows {
        let delta = fuel_value - time_value;
        let percent = if time_value.abs() > f64::EPSILON {
            format!("{:+.1}", 100.0 * delta / time_value)
        } else {
            "n/a".to_string()
        };
        writeln!(
            w,
            "{label:<16}{time_value:>12.2}{fuel_value:>12.2}{delta:>+12.2}{percent:>9}"
        )?;
    }
    writeln!(w, "{HEAVY_RULE}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::two_step_trajectory;

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).expect("report write");
        String::from_utf8(buffer).expect("utf8 report")
    }

    #[test]
    fn matrix_marks_unreached_cells() {
        let trajectory = two_step_trajectory();
        let text = render(|w| {
            write_matrix(w, "Time matrix (s):", &trajectory.grid, &trajectory.time_table)
        });
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[0], "Time matrix (s):");
        assert!(rows[1].contains("330") && rows[1].contains("382"));
        assert!(rows[3].trim_start().starts_with("500"));
        assert!(rows[4].contains("---"));
        assert!(rows[4].trim_end().ends_with("101"));
    }

    #[test]
    fn report_lists_every_point_and_totals() {
        let trajectory = two_step_trajectory();
        let text = render(|w| write_report(w, &trajectory));
        assert!(text.contains("Start"));
        assert!(text.contains("Acceleration"));
        assert!(text.contains("Climb"));
        assert!(text.contains("- Acc+Climb: 0 times"));
        assert!(text.contains("Maneuver time:     101.75 s  (1.70 min)"));
        assert!(text.contains("Fuel consumption:  500.00 kg"));
    }

    #[test]
    fn comparison_reports_signed_deltas() {
        let time_optimal = two_step_trajectory();
        let mut fuel_optimal = two_step_trajectory();
        fuel_optimal.total_time_s = 121.5;
        fuel_optimal.total_fuel_kg = 400.0;

        let text = render(|w| write_comparison(w, &time_optimal, &fuel_optimal));
        let fuel_row = text
            .lines()
            .find(|line| line.starts_with("Fuel (kg)"))
            .expect("fuel row");
        assert!(fuel_row.contains("-100.00"));
        assert!(fuel_row.contains("-20.0"));
        let time_row = text
            .lines()
            .find(|line| line.starts_with("Time (s)"))
            .expect("time row");
        assert!(time_row.contains("+19.75"));
    }
}
