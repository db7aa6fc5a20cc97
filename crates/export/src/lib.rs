//! Export helpers for trajectory artifacts and console reports.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use climb_trajectory::{FlightPoint, Objective, Trajectory};
use thiserror::Error;

pub mod report;
pub mod summary;
pub mod tables;

/// Errors raised while writing artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Buffered writer for an artifact file, creating missing parent directories.
pub fn writer_for_path(path: &Path) -> io::Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Run context recorded alongside a trajectory.
#[derive(Debug, Clone, Copy)]
pub struct Metadata<'a> {
    pub aircraft: &'a str,
    pub mass_kg: f64,
    pub start: FlightPoint,
    pub finish: FlightPoint,
}

/// Files produced for one objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub trajectory: PathBuf,
    pub time_matrix: PathBuf,
    pub fuel_matrix: PathBuf,
    pub summary: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, prefix: &str, objective: Objective) -> Self {
        let suffix = objective.suffix();
        Self {
            trajectory: dir.join(format!("{prefix}_trajectory_{suffix}.csv")),
            time_matrix: dir.join(format!("{prefix}_time_matrix_{suffix}.csv")),
            fuel_matrix: dir.join(format!("{prefix}_fuel_matrix_{suffix}.csv")),
            summary: dir.join(format!("{prefix}_summary_{suffix}.json")),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [
            &self.trajectory,
            &self.time_matrix,
            &self.fuel_matrix,
            &self.summary,
        ]
        .into_iter()
        .map(PathBuf::as_path)
    }
}

/// Write the trajectory, both matrices, and the JSON summary into `dir`.
pub fn write_artifacts(
    dir: &Path,
    prefix: &str,
    meta: &Metadata<'_>,
    trajectory: &Trajectory,
) -> Result<ArtifactPaths, ExportError> {
    let paths = ArtifactPaths::new(dir, prefix, trajectory.objective);

    tables::write_trajectory(writer_for_path(&paths.trajectory)?, trajectory)?;
    tables::write_matrix(
        writer_for_path(&paths.time_matrix)?,
        &trajectory.grid,
        &trajectory.time_table,
    )?;
    tables::write_matrix(
        writer_for_path(&paths.fuel_matrix)?,
        &trajectory.grid,
        &trajectory.fuel_table,
    )?;
    summary::write_summary(writer_for_path(&paths.summary)?, meta, trajectory)?;

    Ok(paths)
}
