//! CLI argument parsing for the glosa-worker binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "glosa-worker", about = "Green Light Optimal Speed Advisory worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the worker server (default if no subcommand given)
    Serve,
    /// Compute a single advisory and print it as JSON
    Advise {
        /// Junction identifier
        #[arg(long)]
        junction: String,
        /// Vehicle latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Vehicle longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Unix timestamp in seconds (defaults to now)
        #[arg(long)]
        timestamp: Option<f64>,
    },
    /// Print the junction registry as JSON
    Junctions,
}
