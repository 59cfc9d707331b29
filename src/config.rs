//! CLI configuration

use std::path::PathBuf;

use clap::Parser;

/// Ampere price list configuration
#[derive(Debug, Parser)]
#[command(name = "ampere", about = "Print a customer price list for a catalog", long_about = None)]
pub struct Config {
    /// Catalog YAML file
    #[arg(short, long, env = "AMPERE_CATALOG", default_value = "fixtures/catalog.yml")]
    pub catalog: PathBuf,

    /// Customer key to price for; anonymous when omitted
    #[arg(short = 'u', long, env = "AMPERE_CUSTOMER")]
    pub customer: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
