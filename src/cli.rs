use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather dashboard for the terminal and the browser.")]
pub struct Cli {
    /// Configuration file, defaults to <config dir>/weatherdash/config.toml
    #[arg(env = "WEATHERDASH_CONFIG", short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Debug logging for weatherdash itself
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and print the dashboard
    Show(ShowArgs),
    /// Describe a WMO weather code
    Code {
        #[arg(allow_negative_numbers = true)]
        code: i32,
        /// Emoji-annotated description
        #[arg(long)]
        emoji: bool,
    },
    /// Serve the dashboard as a JSON API
    Serve {
        #[arg(env = "WEATHERDASH_PORT", short, long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Place name to search for
    #[arg(long, conflicts_with_all = ["lat", "location"])]
    pub city: Option<String>,
    #[arg(long, requires = "lon", allow_negative_numbers = true, conflicts_with = "location")]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
    /// Place name or "lat,lon"
    #[arg(long)]
    pub location: Option<String>,
    /// Emoji-annotated weather descriptions
    #[arg(long)]
    pub emoji: bool,
    /// Dark color theme
    #[arg(long)]
    pub dark: bool,
    /// Skip the other cities
    #[arg(long)]
    pub no_cities: bool,
}
