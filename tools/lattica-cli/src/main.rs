//! Lattica CLI - inspect procedural geometry
//!
//! # Commands
//!
//! - `lattica shapes` - List the shape kinds and their wire values
//! - `lattica defaults <shape>` - Print the default parameters of a shape as TOML
//! - `lattica info` - Generate a shape and report its counts, memory and bounds
//!
//! # Usage
//!
//! ```bash
//! # Write a config to start from
//! lattica defaults torus_knot > knot.toml
//!
//! # Generate it with tangents and 32-bit indices
//! lattica info --config knot.toml --attributes position,normal,tangent --index-size 32
//!
//! # Quick look at a default shape, clockwise
//! lattica info --shape capsule --winding cw
//! ```
//!
//! Set `RUST_LOG=debug` to see the library's generation events.

mod config_file;
mod defaults;
mod info;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lattica::ShapeKind;
use tracing_subscriber::EnvFilter;

/// Lattica CLI - inspect procedural geometry
#[derive(Parser)]
#[command(name = "lattica")]
#[command(about = "Generate and inspect procedural geometry")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List shape kinds and their wire values
    Shapes,

    /// Print the default parameters of a shape as TOML
    Defaults(defaults::DefaultsArgs),

    /// Generate a shape and report counts, memory usage and bounds
    Info(info::InfoArgs),
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shapes => {
            print!("{}", shape_table());
            Ok(())
        }
        Commands::Defaults(args) => defaults::execute(args),
        Commands::Info(args) => info::execute(args),
    }
}

fn shape_table() -> String {
    ShapeKind::ALL
        .iter()
        .map(|kind| format!("{:>3}  {:<12} {}\n", *kind as u32, kind.as_str(), kind.label()))
        .collect()
}

/// Shape kind argument, parsed from its config identifier (`torus_knot`)
pub(crate) fn parse_shape(value: &str) -> Result<ShapeKind, lattica::Error> {
    value.parse()
}
