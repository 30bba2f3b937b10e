//! Embedded DuckDB store holding the `currencies` table.
//!
//! `CurrencyStore` owns the database file, applies schema migrations on
//! open, ingests currency rows, and implements the core `RecordSource`
//! seam: one bound-parameter query per run, answered with a cursor the
//! orchestrator drains.

mod cursor;
mod migrations;
mod store;

use thiserror::Error;

pub use cursor::BufferedCursor;
pub use store::{CurrencyStore, QueryGuardrails, StoreConfig};

/// Store faults outside a pipeline run (opening, migrating, ingesting).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    DuckDb(#[from] duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
