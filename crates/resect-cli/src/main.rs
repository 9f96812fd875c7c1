//! resect CLI - resection surface reconstruction
//!
//! Runs the band or closed-curve pipeline on JSON point files and prints the
//! fitted control points as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resect::{
    parse_distance_label, ControlPointBuffer, PlannerSettings, ResectionPlanner, SurfaceInput,
    SurfaceMesh,
};
use std::path::{Path, PathBuf};

mod io;

#[derive(Parser)]
#[command(name = "resect")]
#[command(about = "Reconstruct a Bézier resection surface from a contour", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a surface to the mesh points at a measured distance from a seed
    Band {
        /// JSON array of [x, y, z] mesh vertices
        #[arg(long)]
        mesh: PathBuf,
        /// Reference point as x,y,z
        #[arg(long, value_parser = io::parse_point, allow_hyphen_values = true)]
        seed: resect::Point3,
        /// Distance label, e.g. 12.3mm
        #[arg(long)]
        label: String,
        /// Planner settings (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Fit a surface to a closed curve
    Curve {
        /// JSON array of [x, y, z] curve points, in drawing order
        #[arg(long)]
        curve: PathBuf,
        /// Planner settings (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default planner settings as TOML
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Band {
            mesh,
            seed,
            label,
            config,
        } => {
            let planner = load_planner(config.as_deref())?;
            let radius = parse_distance_label(&label)?;
            let points = io::read_points(&mesh)?;
            let mesh = SurfaceMesh::from_points(points);
            run(&planner, SurfaceInput::Band {
                mesh: &mesh,
                seed,
                radius,
            })?;
        }
        Commands::Curve { curve, config } => {
            let planner = load_planner(config.as_deref())?;
            let points = io::read_points(&curve)?;
            run(&planner, SurfaceInput::Curve { points: &points })?;
        }
        Commands::Config => {
            print!("{}", PlannerSettings::default().to_toml_string()?);
        }
    }

    Ok(())
}

fn load_planner(config: Option<&Path>) -> Result<ResectionPlanner> {
    let settings = match config {
        Some(path) => PlannerSettings::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => PlannerSettings::default(),
    };
    Ok(ResectionPlanner::new(settings)?)
}

fn run(planner: &ResectionPlanner, input: SurfaceInput<'_>) -> Result<()> {
    let mut display = ControlPointBuffer::new();
    let report = planner
        .update_surface(input, &mut display)
        .context("surface reconstruction failed")?;
    let output = io::SurfaceOutput::from_report(&report);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
