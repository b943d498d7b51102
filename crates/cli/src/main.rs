//! Snowmap CLI - historical map alignment and density estimation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use snowmap_algorithms::align::{
    apply_alignment, compute_bounds, AlignmentTransform, BoundsProvenance, ComputeBoundsParams,
};
use snowmap_algorithms::density::{estimate_density, DensityParams};
use snowmap_core::{Crs, DensityGrid, GeoBounds, PointSet, WeightedPoint};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "snowmap")]
#[command(author, version, about = "Historical map alignment and density estimation", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a point dataset: count, extent, centroid, unique weights
    Info {
        /// Input points file (CSV: x,y,weight per line)
        input: PathBuf,
    },
    /// Estimate a density surface over a point dataset
    Density {
        /// Input points file (CSV: x,y,weight per line)
        input: PathBuf,
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
        /// Grid cells per axis
        #[arg(short, long, default_value = "100")]
        resolution: usize,
        /// Kernel bandwidth, in point coordinate units
        #[arg(short, long)]
        bandwidth: f64,
    },
    /// Compute WGS84 overlay bounds and apply manual corrections
    Align {
        /// Southern edge of the raster extent
        #[arg(long)]
        south: f64,
        /// Western edge of the raster extent
        #[arg(long)]
        west: f64,
        /// Northern edge of the raster extent
        #[arg(long)]
        north: f64,
        /// Eastern edge of the raster extent
        #[arg(long)]
        east: f64,
        /// EPSG code of the extent's spatial reference. Without one the
        /// extent is treated as a co-located point extent and padded
        /// (approximate bounds).
        #[arg(long)]
        epsg: Option<u32>,
        /// Padding fraction for the approximate fallback
        #[arg(long, default_value = "0.05")]
        padding: f64,
        /// Shift along x (longitude)
        #[arg(long, default_value = "0.0")]
        shift_x: f64,
        /// Shift along y (latitude)
        #[arg(long, default_value = "0.0")]
        shift_y: f64,
        /// Uniform scale about the center
        #[arg(long, default_value = "1.0")]
        scale: f64,
        /// Counter-clockwise rotation in degrees
        #[arg(long, default_value = "0.0")]
        rotation: f64,
    },
}

// ─── Output shapes ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct DensityOutput {
    rows: usize,
    cols: usize,
    bandwidth: f64,
    bounds: GeoBounds,
    /// Row-major cell values in [0, 1]; row 0 is the northern edge
    values: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct AlignOutput {
    provenance: &'static str,
    bounds: GeoBounds,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

/// Parse a points CSV: one `x,y,weight` triple per line, `#` comments
/// and blank lines skipped.
fn parse_points(text: &str) -> Result<PointSet> {
    let mut points = PointSet::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 3 {
            anyhow::bail!(
                "line {}: expected 'x,y,weight', got: {}",
                lineno + 1,
                line
            );
        }
        let x: f64 = parts[0].trim().parse().context("Invalid x coordinate")?;
        let y: f64 = parts[1].trim().parse().context("Invalid y coordinate")?;
        let weight: f64 = parts[2].trim().parse().context("Invalid weight")?;
        if weight < 0.0 {
            anyhow::bail!("line {}: negative weight {}", lineno + 1, weight);
        }

        points.push(WeightedPoint::new(x, y, weight));
    }

    Ok(points)
}

fn read_points(path: &PathBuf) -> Result<PointSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read points from {}", path.display()))?;
    let points = parse_points(&text)?;
    info!("Loaded {} points", points.len());
    Ok(points)
}

fn grid_to_output(grid: &DensityGrid, bandwidth: f64, bounds: GeoBounds) -> DensityOutput {
    DensityOutput {
        rows: grid.rows(),
        cols: grid.cols(),
        bandwidth,
        bounds,
        values: grid
            .data()
            .outer_iter()
            .map(|row| row.to_vec())
            .collect(),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let points = read_points(&input)?;

            let bounds = points.bounds().context("Cannot compute extent")?;
            let (cx, cy) = points.centroid().context("Cannot compute centroid")?;

            println!("Points:       {}", points.len());
            println!(
                "Extent:       ({}, {}) - ({}, {})",
                bounds.west, bounds.south, bounds.east, bounds.north
            );
            println!("Centroid:     ({cx}, {cy})");
            println!("Total weight: {}", points.total_weight());
            println!("Weights:      {:?}", points.unique_weights());
        }

        Commands::Density {
            input,
            output,
            resolution,
            bandwidth,
        } => {
            let points = read_points(&input)?;
            let params = DensityParams::square(resolution, bandwidth);

            let start = std::time::Instant::now();
            let grid = estimate_density(points.as_slice(), &params)
                .context("Density estimation failed")?;
            info!(
                "Estimated {}x{} grid in {:.2?}",
                grid.rows(),
                grid.cols(),
                start.elapsed()
            );

            let bounds = points.bounds().context("Cannot compute extent")?;
            let json = serde_json::to_string_pretty(&grid_to_output(&grid, bandwidth, bounds))?;
            fs::write(&output, json)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Density grid saved to: {}", output.display());
        }

        Commands::Align {
            south,
            west,
            north,
            east,
            epsg,
            padding,
            shift_x,
            shift_y,
            scale,
            rotation,
        } => {
            let extent = GeoBounds::new(south, west, north, east)
                .context("Invalid extent (south < north and west < east required)")?;
            let params = ComputeBoundsParams {
                pad_fraction: padding,
            };

            let aligned = match epsg {
                Some(code) => {
                    let crs = Crs::from_epsg(code);
                    compute_bounds(Some(&crs), Some(&extent), Some(&extent), &params)
                        .context("Bounds computation failed")?
                }
                None => compute_bounds(None, None, Some(&extent), &params)
                    .context("Bounds computation failed")?,
            };

            if aligned.provenance == BoundsProvenance::Approximate {
                info!("No usable spatial reference; bounds are approximate");
            }

            let transform = AlignmentTransform::new(shift_x, shift_y, scale, rotation);
            let bounds = apply_alignment(&aligned.bounds, &transform)
                .context("Alignment failed")?;

            let out = AlignOutput {
                provenance: match aligned.provenance {
                    BoundsProvenance::Georeferenced => "georeferenced",
                    BoundsProvenance::Approximate => "approximate",
                },
                bounds,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
