//! Core contracts for fxrelay.
//!
//! This crate contains:
//! - The canonical currency record and UTC timestamp type
//! - The cursor / source / mapper / sink trait seams
//! - The pipeline orchestrator and its error taxonomy
//!
//! Everything here is backend-neutral: the warehouse crate supplies the
//! real data source, the CLI supplies the real transport, and scripted
//! substitutes drive the orchestrator in tests.

pub mod cursor;
pub mod domain;
pub mod error;
pub mod mapper;
pub mod pipeline;
pub mod sink;
pub mod source;

#[cfg(test)]
mod testing;

pub use cursor::{RowCursor, SqlValue};
pub use domain::{CurrencyRecord, TimestampError, UtcDateTime};
pub use error::{CursorError, DispatchError, MapError, PipelineError, QueryError, ScanError};
pub use mapper::{CurrencyMapper, RecordMapper};
pub use pipeline::{CancelToken, Pipeline, RunReport};
pub use sink::{JsonSink, RecordSink, Transport};
pub use source::{CreatedAfter, RecordSource};
