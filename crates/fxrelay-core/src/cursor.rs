use crate::domain::UtcDateTime;
use crate::error::{CursorError, ScanError};

/// A single column value read from a row, neutral to the backing store.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Text(String),
    Timestamp(UtcDateTime),
}

impl SqlValue {
    /// Column-type name used in mismatch errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Boolean(_) => "BOOLEAN",
            Self::Integer(_) => "BIGINT",
            Self::Double(_) => "DOUBLE",
            Self::Text(_) => "TEXT",
            Self::Timestamp(_) => "TIMESTAMP",
        }
    }
}

/// Stateful handle over a streamed result set, advanced one row at a
/// time.
///
/// Protocol: `advance` positions the cursor on the next row and returns
/// false once the set is exhausted; not an error, and further calls
/// keep returning false. `read_into` is valid only while positioned on
/// a row. `release` is idempotent. A fault the backend detects only at
/// end of stream is reported by `final_error` once `advance` has
/// returned false.
pub trait RowCursor {
    fn advance(&mut self) -> bool;

    /// Reads the current row into `dest`, one value per column.
    fn read_into(&mut self, dest: &mut [SqlValue]) -> Result<(), ScanError>;

    /// Releases underlying resources. Safe to call more than once.
    fn release(&mut self) -> Result<(), CursorError>;

    /// Error encountered during iteration that `advance` did not raise
    /// synchronously.
    fn final_error(&mut self) -> Option<CursorError>;
}
