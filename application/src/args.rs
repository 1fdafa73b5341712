//! [`Args`] definitions.

use std::path::PathBuf;

use clap::Parser;

/// Server of the land listings site.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Path to the JSON file with listings, overriding the configured one.
    #[arg(short, long)]
    pub listings: Option<PathBuf>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
