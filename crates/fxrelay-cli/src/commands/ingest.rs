use std::fs::File;
use std::io::{self, BufRead, BufReader};

use fxrelay_core::CurrencyRecord;

use crate::cli::{Cli, IngestArgs};
use crate::error::CliError;

use super::open_store;

pub fn run(cli: &Cli, args: &IngestArgs) -> Result<(), CliError> {
    let store = open_store(cli)?;

    let records = match &args.file {
        Some(path) => read_records(BufReader::new(File::open(path)?))?,
        None => read_records(io::stdin().lock())?,
    };

    store.insert_records(records.as_slice())?;
    eprintln!("ingested {} records", records.len());
    Ok(())
}

fn read_records(reader: impl BufRead) -> Result<Vec<CurrencyRecord>, CliError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line.as_str()).map_err(|source| CliError::Record {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_records_and_skips_blank_lines() {
        let input = concat!(
            "{\"category\":\"fiat\",\"symbol\":\"USD\",\"created_at\":\"2025-02-01T00:00:00Z\"}\n",
            "\n",
            "{\"category\":\"crypto\",\"symbol\":\"USDC\",\"chain\":\"ethereum\",\"created_at\":\"2025-03-01T00:00:00Z\"}\n",
        );

        let records = read_records(input.as_bytes()).expect("read");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chain, None);
        assert_eq!(records[1].chain.as_deref(), Some("ethereum"));
    }

    #[test]
    fn malformed_line_is_reported_with_its_number() {
        let input = concat!(
            "{\"category\":\"fiat\",\"symbol\":\"USD\",\"created_at\":\"2025-02-01T00:00:00Z\"}\n",
            "{not json}\n",
        );

        let error = read_records(input.as_bytes()).expect_err("must fail");
        assert!(matches!(error, CliError::Record { line: 2, .. }));
    }
}
