use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use climb_optimizer::config::{ScenarioConfig, load_aircraft_catalog, load_scenario};
use climb_optimizer::export::{self, Metadata, report};
use climb_optimizer::trajectory::{Objective, SolveError, Trajectory, aircraft, scenario, solve};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Grid dynamic-programming climb and acceleration trajectory optimizer"
)]
struct Cli {
    /// Scenario file (TOML or YAML); baseline study when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Aircraft catalog (directory of TOML files or a YAML list)
    #[arg(long)]
    aircraft_catalog: Option<PathBuf>,

    /// Aircraft name from the catalog (case-insensitive; defaults to the first entry)
    #[arg(long, requires = "aircraft_catalog")]
    aircraft: Option<String>,

    /// Optimisation criterion
    #[arg(long, value_enum, default_value_t = ObjectiveArg::Time)]
    objective: ObjectiveArg,

    /// Grid intervals per axis (overrides the scenario)
    #[arg(long)]
    resolution: Option<usize>,

    /// Aircraft mass in kg (overrides the scenario and catalog)
    #[arg(long)]
    mass: Option<f64>,

    /// Directory for CSV/JSON artifacts
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Artifact file prefix (defaults to the aircraft name)
    #[arg(long)]
    prefix: Option<String>,

    /// Print reports only; write no files
    #[arg(long)]
    no_files: bool,

    /// Debug-level logging on stderr
    #[arg(long)]
    verbose: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ObjectiveArg {
    Time,
    Fuel,
    Both,
}

impl ObjectiveArg {
    fn objectives(self) -> &'static [Objective] {
        match self {
            ObjectiveArg::Time => &[Objective::MinimizeTime],
            ObjectiveArg::Fuel => &[Objective::MinimizeFuel],
            ObjectiveArg::Both => &Objective::ALL,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config = match &cli.config {
        Some(path) => load_scenario(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    if let Some(resolution) = cli.resolution {
        config.grid.resolution = resolution;
    }
    if let Some(mass) = cli.mass {
        config.aircraft.mass_kg = mass;
    }
    config.validate().context("invalid scenario")?;

    let mut selected = match &cli.aircraft_catalog {
        Some(path) => {
            let catalog = load_aircraft_catalog(path)
                .with_context(|| format!("loading aircraft catalog {}", path.display()))?;
            aircraft::select(&catalog, cli.aircraft.as_deref())?
        }
        None => aircraft::from_config(&config.aircraft),
    };
    if let Some(mass) = cli.mass {
        selected.mass_kg = mass;
    }

    let scenario = scenario::with_aircraft(&config, selected);
    let model_aircraft = &scenario.model.aircraft;
    let prefix = cli
        .prefix
        .clone()
        .unwrap_or_else(|| model_aircraft.name.clone());
    debug!(
        aircraft = %model_aircraft.name,
        resolution = scenario.resolution,
        thrust_to_weight = model_aircraft.static_thrust_to_weight(),
        "scenario ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_banner(&mut out, model_aircraft, scenario.start, scenario.finish)?;

    let objectives = cli.objective.objectives();
    let results: Vec<Result<Trajectory, SolveError>> = thread::scope(|s| {
        let handles: Vec<_> = objectives
            .iter()
            .map(|&objective| {
                let scenario = &scenario;
                s.spawn(move || solve(scenario, objective))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let meta = Metadata {
        aircraft: &model_aircraft.name,
        mass_kg: model_aircraft.mass_kg,
        start: scenario.start,
        finish: scenario.finish,
    };

    let mut solved = Vec::new();
    let mut failed = Vec::new();
    for result in results {
        match result {
            Ok(trajectory) => {
                report::write_report(&mut out, &trajectory)?;
                if !cli.no_files {
                    let paths =
                        export::write_artifacts(&cli.output_dir, &prefix, &meta, &trajectory)
                            .with_context(|| {
                                format!("writing artifacts to {}", cli.output_dir.display())
                            })?;
                    report::write_created_files(&mut out, &paths)?;
                }
                solved.push(trajectory);
            }
            Err(SolveError::NoPathFound { objective }) => {
                writeln!(out, "ERROR: path not found ({objective})")?;
                failed.push(objective);
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let [min_time, min_fuel] = solved.as_slice() {
        report::write_comparison(&mut out, min_time, min_fuel)?;
    }
    out.flush()?;

    if !failed.is_empty() {
        let names: Vec<String> = failed.iter().map(ToString::to_string).collect();
        bail!("no feasible trajectory for: {}", names.join(", "));
    }
    Ok(())
}
