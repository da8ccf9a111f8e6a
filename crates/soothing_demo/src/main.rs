//! Soothing demo
//!
//! List the component catalog and drive components headlessly.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod catalog;
mod config;
mod runner;

use catalog::{ActionCounter, Entry};
use config::DemoConfig;
use runner::{RunOptions, RunReport};

#[derive(Parser)]
#[command(name = "soothing-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Soothing component showcase", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./soothing.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every component in the catalog
    List,

    /// Simulate one component and print what it drew
    Run {
        /// Catalog slug, as printed by `list`
        slug: String,

        /// Simulated seconds
        #[arg(short, long)]
        seconds: Option<f32>,

        /// Ticks per simulated second
        #[arg(short, long)]
        fps: Option<u32>,

        /// Seconds in at which to tap the component
        #[arg(short, long)]
        tap_at: Option<f32>,
    },

    /// Briefly run every component in menu order
    Showcase {
        /// Simulated seconds per component
        #[arg(short, long, default_value = "1.0")]
        seconds: f32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = DemoConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List => cmd_list(),

        Commands::Run {
            slug,
            seconds,
            fps,
            tap_at,
        } => cmd_run(&config, &slug, seconds, fps, tap_at),

        Commands::Showcase { seconds } => cmd_showcase(&config, seconds),
    }
}

fn cmd_list() -> Result<()> {
    println!("Soothing components");
    println!("===================");
    println!();
    for entry in catalog::entries() {
        println!("  {:<26} {:<11} {}", entry.slug, entry.kind.label(), entry.title);
    }
    Ok(())
}

fn cmd_run(
    config: &DemoConfig,
    slug: &str,
    seconds: Option<f32>,
    fps: Option<u32>,
    tap_at: Option<f32>,
) -> Result<()> {
    let Some(entry) = catalog::find(slug) else {
        anyhow::bail!("Unknown component '{}'. Run `soothing-demo list` to see them all.", slug);
    };

    let sim = &config.simulation;
    let options = RunOptions {
        seconds: seconds.unwrap_or(sim.seconds),
        fps: fps.unwrap_or(sim.fps),
        tap_at: tap_at.or(sim.tap_at).filter(|_| entry.kind.is_interactive()),
    };
    if options.fps == 0 || !(options.seconds.is_finite() && options.seconds > 0.0) {
        anyhow::bail!("--fps and --seconds must be positive");
    }
    if tap_at.is_some() && !entry.kind.is_interactive() {
        warn!("{} is not interactive, ignoring --tap-at", entry.title);
    }

    let (report, actions) = simulate(config, entry, &options)?;
    print_report(entry, &options, &report, actions);
    Ok(())
}

fn cmd_showcase(config: &DemoConfig, seconds: f32) -> Result<()> {
    if !(seconds.is_finite() && seconds > 0.0) {
        anyhow::bail!("--seconds must be positive");
    }

    let sim = &config.simulation;
    for entry in catalog::entries() {
        let options = RunOptions {
            seconds,
            fps: sim.fps,
            tap_at: sim.tap_at.filter(|_| entry.kind.is_interactive()),
        };
        let (report, actions) = simulate(config, entry, &options)?;
        info!(
            "{:<26} {:>4} frames {:>6} commands {:>3} peak paints {} actions {} laps {:?}",
            entry.slug,
            report.frames,
            report.commands,
            report.peak_paints,
            actions,
            report.laps(),
            report.final_lifecycle
        );
    }
    Ok(())
}

fn simulate(config: &DemoConfig, entry: &Entry, options: &RunOptions) -> Result<(RunReport, u32)> {
    let actions = ActionCounter::default();
    let mut component = entry.build(&config.palette, &actions)?;
    info!("Running {} for {}s at {} fps", entry.title, options.seconds, options.fps);
    let report = runner::run(component.as_mut(), options);
    Ok((report, actions.get()))
}

fn print_report(entry: &Entry, options: &RunOptions, report: &RunReport, actions: u32) {
    println!("{}", entry.title);
    println!("{}", "=".repeat(entry.title.len()));
    println!();
    println!("Simulated:   {}s at {} fps ({} ticks)", options.seconds, options.fps, report.ticks);
    println!("Frames:      {}", report.frames);
    println!("Commands:    {}", report.commands);
    println!("Peak paints: {}", report.peak_paints);
    match report.tap_hit {
        Some(hit) => println!("Tap:         {}", if hit { "hit" } else { "missed" }),
        None => println!("Tap:         none"),
    }
    println!("Actions:     {}", actions);
    println!("Laps:        {}", report.laps());
    println!();
    println!("Lifecycle:");
    for (at, state) in &report.transitions {
        println!("  {:>7.3}s  {:?}", at, state);
    }
    println!("  final     {:?}", report.final_lifecycle);
    if !report.last_texts.is_empty() {
        println!();
        println!("Last labels: {}", report.last_texts.join(", "));
    }
}
