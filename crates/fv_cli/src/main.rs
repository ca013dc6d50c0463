//! Field Value CLI
//!
//! Recorded game events (JSON) → per-sector expected value surface (CSV / JSON)

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use fv_cli::OutputFormat;
#[cfg(feature = "cli")]
use fv_core::{events::TeamSide, UpdateMode, ValueConfig};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "fv_cli")]
#[command(about = "Compute per-sector possession value from play-by-play events", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Compute the value surface for one team of a recorded game
    Surface {
        /// Recorded gameEvents response (JSON)
        #[arg(long)]
        events: PathBuf,

        /// Team whose events are used (home or away)
        #[arg(long, default_value = "home")]
        side: TeamSide,

        /// Config file (JSON or YAML); FV_CONFIG_PATH is used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Sector width in field units (overrides config)
        #[arg(long)]
        cell_width: Option<f64>,

        /// Relaxation sweeps (overrides config)
        #[arg(long)]
        iterations: Option<u32>,

        /// Use synchronized (Jacobi) updates instead of in-place updates
        #[arg(long, default_value = "false")]
        synchronized: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Output file path (summary only when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "fv_core=debug,fv_cli=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Surface { events, side, config, cell_width, iterations, synchronized, format, out } => {
            let mut cfg = match config {
                Some(path) => ValueConfig::from_file(&path)?,
                None => ValueConfig::from_env_or(ValueConfig::default())?,
            };
            if let Some(width) = cell_width {
                cfg.cell_width = width;
            }
            if let Some(n) = iterations {
                cfg.iteration_count = n;
            }
            if synchronized {
                cfg.update_mode = UpdateMode::Synchronized;
            }
            cfg.validate()?;

            println!("Computing value surface...");
            println!("   Events: {} ({:?})", events.display(), side);

            let payload = fv_cli::load_payload(&events)?;
            let surface = fv_cli::surface_for_side(&payload, side, &cfg)?;

            print!("{}", fv_cli::render_summary(&surface));

            if let Some(path) = out {
                fv_cli::write_surface(&path, &surface, format)?;
                println!("\nSurface written to: {}", path.display());
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("fv_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
