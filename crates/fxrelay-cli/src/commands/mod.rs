mod export;
mod ingest;

use fxrelay_warehouse::{CurrencyStore, StoreConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Export(args) => export::run(cli, args),
        Command::Ingest(args) => ingest::run(cli, args),
    }
}

fn open_store(cli: &Cli) -> Result<CurrencyStore, CliError> {
    let config = match &cli.home {
        Some(home) => StoreConfig::at_home(home.clone()),
        None => StoreConfig::default(),
    };
    Ok(CurrencyStore::open(config)?)
}
