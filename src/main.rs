//! Ampere price list CLI

use std::{io, process::ExitCode};

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ampere::{customers::CustomerTier, fixtures::Catalog, price_list::PriceList};

use crate::config::Config;

mod config;

/// Ampere price list entry point
pub fn main() -> ExitCode {
    let config = Config::load().unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!("{run_error:#}");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let catalog = Catalog::load(&config.catalog)
        .with_context(|| format!("failed to load catalog {}", config.catalog.display()))?;

    info!(
        products = catalog.products().len(),
        rules = catalog.rules().len(),
        "loaded catalog"
    );

    let customer = config
        .customer
        .as_deref()
        .map(|key| catalog.customer(key).map(CustomerTier::from))
        .transpose()?;

    let pricer = catalog.pricer();
    let list = PriceList::build(&pricer, catalog.products(), customer.as_ref());

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    list.write_to(&mut handle, catalog.currency())?;

    Ok(())
}
