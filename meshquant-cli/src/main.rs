//! meshquant: adaptive normalization and quantization of 3D mesh vertices.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=meshquant_quantization=debug` - Per-stage pipeline logging
//! - `RUST_LOG=meshquant_io=debug` - Mesh loading details
//! - `RUST_LOG=debug` - All debug output
//!
//! Without `RUST_LOG`, `-v`, `-vv` and `-vvv` select info, debug and trace.
//!
//! # Example
//!
//! ```bash
//! meshquant inspect data/bunny.obj
//! meshquant quantize data/bunny.obj --levels 2048 --summary
//! meshquant evaluate data/bunny.obj outputs/reconstructed_unit_sphere.ply
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use meshquant_quantization::NormalizationMethod;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod plot;
mod report;

use commands::{evaluate, inspect, quantize};

/// meshquant - inspect, quantize and evaluate 3D meshes.
///
/// Picks Min-Max or Unit-Sphere normalization from the vertex spread, quantizes
/// the coordinates and reports how much the reconstruction deviates.
#[derive(Parser, Debug)]
#[command(name = "meshquant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file (pipeline settings and report metadata)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Suppress reports and logging; errors are still printed
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print geometric statistics and a shape interpretation
    Inspect {
        /// Input mesh file (.obj or .ply)
        input: Option<PathBuf>,
    },

    /// Normalize, quantize and reconstruct a mesh
    Quantize {
        /// Input mesh file (.obj or .ply)
        input: Option<PathBuf>,

        /// Quantization levels per coordinate
        #[arg(long)]
        levels: Option<u32>,

        /// Spread ratio above which Unit-Sphere normalization is used
        #[arg(long)]
        threshold: Option<f64>,

        /// Force a normalization method (min-max or unit-sphere)
        #[arg(long)]
        method: Option<NormalizationMethod>,

        /// Directory for the reconstructed mesh and summary
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also write a Markdown summary (README.md) next to the mesh
        #[arg(long)]
        summary: bool,
    },

    /// Compare an original mesh against a reconstruction
    Evaluate {
        /// Original mesh file
        original: Option<PathBuf>,

        /// Reconstructed mesh file
        reconstructed: Option<PathBuf>,

        /// Directory for the plot data files
        #[arg(long)]
        figures_dir: Option<PathBuf>,
    },
}

impl Commands {
    /// Usage line when a required positional argument was left out
    fn missing_argument_usage(&self) -> Option<&'static str> {
        match self {
            Commands::Inspect { input: None } => Some("Usage: meshquant inspect <MESH>"),
            Commands::Quantize { input: None, .. } => {
                Some("Usage: meshquant quantize <MESH> [--levels N] [--threshold R] [--method M] [--output-dir DIR] [--summary]")
            }
            Commands::Evaluate {
                original: None, ..
            }
            | Commands::Evaluate {
                reconstructed: None,
                ..
            } => Some("Usage: meshquant evaluate <ORIGINAL> <RECONSTRUCTED> [--figures-dir DIR]"),
            _ => None,
        }
    }
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "meshquant=info,meshquant_quantization=info,meshquant_io=info",
            2 => "meshquant=debug,meshquant_quantization=debug,meshquant_io=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

/// Error line plus its cause chain, as printed before exiting
fn format_error(err: &anyhow::Error) -> String {
    let mut out = format!("Error: {}\n", err);
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  Caused by: {}\n", cause));
    }
    out
}

fn dispatch(command: &Commands, cli: &Cli) -> Result<()> {
    match command {
        Commands::Inspect { input: Some(input) } => inspect::run(input, cli),
        Commands::Quantize {
            input: Some(input),
            levels,
            threshold,
            method,
            output_dir,
            summary,
        } => {
            let options = quantize::QuantizeOptions {
                levels: *levels,
                threshold: *threshold,
                method: *method,
                output_dir: output_dir.clone(),
                summary: *summary,
            };
            quantize::run(input, &options, cli)
        }
        Commands::Evaluate {
            original: Some(original),
            reconstructed: Some(reconstructed),
            figures_dir,
        } => evaluate::run(original, reconstructed, figures_dir.as_ref(), cli),
        // Missing positionals are handled before dispatch
        _ => Ok(()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    if let Some(usage) = command.missing_argument_usage() {
        println!("{}", usage);
        return Ok(());
    }

    if let Err(e) = dispatch(command, &cli) {
        eprint!("{}", format_error(&e));
        std::process::exit(1);
    }

    Ok(())
}
