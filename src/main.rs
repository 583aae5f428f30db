use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use geoslim::batch::{plan_jobs, run_batch};
use geoslim::config::{FileConfig, MinRingVertices, Overrides, PolygonLimit, Profile};
use geoslim::SimplificationConfig;

/// Shrink GeoJSON boundary files while keeping their coverage
///
/// Examples:
///   # Simplify every .geojson file in data/original into data/balanced
///   geoslim data/original
///
///   # Smallest output, written to a chosen directory
///   geoslim data/original -p ultra -o public/zones
///
///   # One file, custom tolerance, pretty-printed
///   geoslim zone_7a.geojson --tolerance 0.001 --precision 5 --pretty
#[derive(Parser, Debug)]
#[command(name = "geoslim")]
#[command(version, about, long_about = None)]
struct Args {
    /// GeoJSON file, or directory of .geojson/.json files
    input: PathBuf,

    /// Output file (file input) or directory (directory input)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Simplification profile [default: balanced]
    #[arg(short = 'p', long)]
    profile: Option<Profile>,

    /// Maximum deviation of a dropped vertex, in coordinate units (degrees)
    #[arg(short = 't', long)]
    tolerance: Option<f64>,

    /// Decimal places kept per coordinate
    #[arg(long)]
    precision: Option<u32>,

    /// Rings reduced below this many vertices are resampled from the original
    #[arg(long)]
    min_ring_vertices: Option<usize>,

    /// Polygons kept per multi-polygon, largest first: a number or "unbounded"
    #[arg(long)]
    max_polygons: Option<PolygonLimit>,

    /// Write indented JSON instead of compact output
    #[arg(long)]
    pretty: bool,

    /// Path to config file (optional, auto-searches geoslim.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = match args.config {
        Some(ref config_path) => {
            Some(FileConfig::read(config_path).context("Failed to load config file")?)
        }
        None => FileConfig::load(),
    };

    let cli = Overrides {
        profile: args.profile,
        tolerance: args.tolerance,
        precision: args.precision,
        min_ring_vertices: args.min_ring_vertices.map(MinRingVertices::Fixed),
        max_polygons: args.max_polygons,
        ..Default::default()
    };
    let (profile, config) =
        SimplificationConfig::resolve(&cli, file_config.as_ref().map(|c| &c.simplification));
    config
        .validate()
        .context("Invalid simplification settings")?;

    let pretty = args.pretty || file_config.as_ref().map(|c| c.pretty).unwrap_or(false);
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let output = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()));

    println!("geoslim - GeoJSON Boundary Simplifier");
    println!("=====================================");
    println!();

    if verbose {
        print_configuration(profile, &config, pretty);
    }

    let jobs = plan_jobs(&args.input, output.as_deref(), profile)?;
    if jobs.is_empty() {
        bail!("No .geojson or .json files found in {}", args.input.display());
    }

    println!(
        "Simplifying {} GeoJSON file{} ({} profile)...",
        jobs.len(),
        if jobs.len() == 1 { "" } else { "s" },
        profile
    );
    println!();

    let progress = create_progress(jobs.len() as u64);
    let summary = run_batch(&jobs, &config, pretty, verbose, &progress);
    progress.finish_and_clear();

    println!();
    for line in summary.summary_lines() {
        println!("{}", line);
    }
    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    if summary.has_failures() {
        bail!(
            "{} of {} files failed",
            summary.failures.len(),
            summary.attempted()
        );
    }

    Ok(())
}

fn print_configuration(profile: Profile, config: &SimplificationConfig, pretty: bool) {
    println!("Configuration:");
    println!("  Profile: {}", profile);
    println!("  Tolerance: {}", config.tolerance);
    println!("  Coordinate precision: {} decimals", config.coordinate_precision);
    match config.min_ring_vertices {
        MinRingVertices::Fixed(n) => println!("  Minimum ring vertices: {}", n),
        MinRingVertices::Proportional { floor, divisor } => {
            println!("  Minimum ring vertices: max({}, n / {})", floor, divisor)
        }
    }
    println!("  Max polygons retained: {}", config.max_polygons_retained);
    println!(
        "  Fallback ring sizes: {} (polygon), {} (multi-polygon)",
        config.outer_fallback_vertices, config.multi_fallback_vertices
    );
    println!("  Output: {}", if pretty { "pretty" } else { "compact" });
    println!();
}

fn create_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
