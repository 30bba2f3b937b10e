//! CLI argument definitions for fxrelay.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Relay currency rows from the local store to an NDJSON channel.
#[derive(Debug, Parser)]
#[command(
    name = "fxrelay",
    version,
    about = "Relay currency rows from the local store to an NDJSON channel"
)]
pub struct Cli {
    /// Store home directory (default: $FXRELAY_HOME, then ~/.fxrelay).
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export currencies created after a bound, one JSON line each.
    ///
    /// Records stream to stdout in cursor order; the summary goes to
    /// stderr. A failure stops the run mid-stream and exits non-zero;
    /// lines already written stand.
    ///
    /// # Examples
    ///
    ///   fxrelay export --since 2025-01-01T00:00:00Z
    ///   fxrelay export --since 2025-01-01T00:00:00Z > currencies.ndjson
    Export(ExportArgs),

    /// Load currency records from an NDJSON file (or stdin) into the
    /// store.
    ///
    /// # Examples
    ///
    ///   fxrelay ingest --file currencies.ndjson
    ///   cat currencies.ndjson | fxrelay ingest
    Ingest(IngestArgs),
}

/// Arguments for the `export` command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Exclusive lower bound on created_at (RFC3339 UTC, e.g.
    /// 2025-01-01T00:00:00Z).
    #[arg(long)]
    pub since: String,

    /// Maximum number of rows buffered from one query.
    #[arg(long, default_value_t = 10_000)]
    pub max_rows: usize,
}

/// Arguments for the `ingest` command.
#[derive(Debug, Args)]
pub struct IngestArgs {
    /// NDJSON file of currency records; reads stdin when omitted.
    #[arg(long)]
    pub file: Option<PathBuf>,
}
