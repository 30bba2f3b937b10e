use std::io;

use fxrelay_core::{CreatedAfter, CurrencyMapper, JsonSink, Pipeline, UtcDateTime};
use fxrelay_warehouse::QueryGuardrails;

use crate::cli::{Cli, ExportArgs};
use crate::error::CliError;
use crate::output::LineTransport;

use super::open_store;

pub fn run(cli: &Cli, args: &ExportArgs) -> Result<(), CliError> {
    if args.max_rows == 0 {
        return Err(CliError::Command(String::from(
            "--max-rows must be greater than zero",
        )));
    }

    let since = UtcDateTime::parse(args.since.as_str())?;
    let store = open_store(cli)?.with_guardrails(QueryGuardrails {
        max_rows: args.max_rows,
    });

    let stdout = io::stdout();
    let sink = JsonSink::new(LineTransport::new(stdout.lock()));

    let mut pipeline = Pipeline::new(store, CurrencyMapper, sink);
    let report = pipeline.run(&CreatedAfter::new(since))?;

    let (store, _, _) = pipeline.into_parts();
    store.append_relay_log("export", report.dispatched)?;

    eprintln!("exported {} records since {since}", report.dispatched);
    Ok(())
}
