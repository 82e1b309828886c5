//! dancefit-wg (Workout Generator) - Main entry point
//!
//! Loads the dance dataset, buckets dances by tempo, asks the user for
//! duration, intensity and country, and prints a shuffled dance workout.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dancefit_common::config::{load_toml_config, resolve_config_path, CliOverrides, Settings, TomlConfig};
use dancefit_common::{IntensityLevel, ShufflePolicy, WorkoutGenerator};
use dancefit_wg::prepare_dataset;
use dancefit_wg::session::{run_session, SessionPresets};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Command-line arguments for dancefit-wg
#[derive(Parser, Debug)]
#[command(name = "dancefit-wg")]
#[command(about = "Generates dance workouts from a tempo-categorized dance dataset")]
#[command(version)]
struct Args {
    /// Dataset CSV file
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible shuffles
    #[arg(short, long)]
    seed: Option<u64>,

    /// Shuffle policy across passes: per_pass or fixed
    #[arg(long, value_parser = parse_shuffle_policy)]
    shuffle_policy: Option<ShufflePolicy>,

    /// Workout duration in minutes (skips the prompt)
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=120))]
    duration: Option<u32>,

    /// Intensity level: low, medium or high (skips the prompt)
    #[arg(long, value_parser = parse_intensity)]
    intensity: Option<IntensityLevel>,

    /// Country of origin (skips the prompt)
    #[arg(long)]
    country: Option<String>,

    /// Do not print dataset summaries before prompting
    #[arg(long)]
    no_summaries: bool,

    /// Default log directive when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_shuffle_policy(s: &str) -> std::result::Result<ShufflePolicy, String> {
    ShufflePolicy::from_str(s).ok_or_else(|| format!("unknown shuffle policy '{}' (use per_pass or fixed)", s))
}

fn parse_intensity(s: &str) -> std::result::Result<IntensityLevel, String> {
    IntensityLevel::from_str(s).ok_or_else(|| format!("unknown intensity '{}' (use low, medium or high)", s))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so its log level can apply
    let config_path = resolve_config_path(args.config.as_deref());
    let toml_config = match &config_path {
        Some(path) => load_toml_config(path).with_context(|| format!("Failed to load config {}", path.display()))?,
        None => None,
    };

    let cli = CliOverrides {
        dataset_path: args.dataset.clone(),
        seed: args.seed,
        shuffle_policy: args.shuffle_policy,
        log_level: args.log_level.clone(),
        show_summaries: if args.no_summaries { Some(false) } else { None },
    };
    let settings = Settings::resolve(&cli, toml_config.as_ref().unwrap_or(&TomlConfig::default()));

    // Initialize tracing (stderr, so stdout carries only the session)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    info!(
        "Starting dancefit-wg v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match (&config_path, &toml_config) {
        (Some(path), Some(_)) => info!("Config: {}", path.display()),
        (Some(path), None) => warn!("Config file {} not found, using defaults", path.display()),
        (None, _) => warn!("No config directory on this platform, using defaults"),
    }
    debug!("Settings: {:?}", settings);
    info!("Dataset: {}", settings.dataset_path.display());

    let mut stdout = io::stdout();
    let (dataset, cutoffs) = prepare_dataset(&settings.dataset_path, settings.show_summaries.then_some(&mut stdout))
        .with_context(|| format!("Failed to prepare dataset {}", settings.dataset_path.display()))?;
    debug!("Cutoffs: {:?}", cutoffs);

    let mut rng = match settings.seed {
        Some(seed) => {
            info!("Shuffle seed: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let presets = SessionPresets {
        duration_minutes: args.duration,
        intensity: args.intensity,
        country: args.country,
    };
    let generator = WorkoutGenerator::new(settings.shuffle_policy);

    let stdin = io::stdin();
    let summary = run_session(&dataset, &presets, &generator, &mut stdin.lock(), &mut stdout, &mut rng)
        .context("Workout session failed")?;

    info!(
        "Session complete: {:?}, {} segments, {} minutes",
        summary.generation.outcome,
        summary.workout.len(),
        summary.workout.total_minutes()
    );

    Ok(())
}
