use thiserror::Error;

/// The data source failed to start iteration (connectivity, malformed
/// query, auth). Fatal to the run; no cursor exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("query failed: {message}")]
pub struct QueryError {
    message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A fault in the underlying result stream: detected at end of
/// iteration (`final_error`) or while releasing the cursor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CursorError {
    message: String,
}

impl CursorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Row read failures raised by `RowCursor::read_into`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Caller-protocol violation: a read before the first advance or
    /// after exhaustion. Indicates a bug in the caller, not an external
    /// failure.
    #[error("cursor is not positioned on a row")]
    CursorState,

    #[error("destination width {expected} does not match row width {found}")]
    Width { expected: usize, found: usize },

    #[error("row read failed: {0}")]
    Backend(String),
}

/// A row's shape or type did not match the record layout. Fatal at the
/// offending row; prior dispatches stand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("column '{column}': expected {expected}, found {found}")]
    ColumnType {
        column: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// The sink rejected or failed to forward a record.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("transport rejected payload: {0}")]
    Rejected(String),
}

/// Terminal error of one pipeline run, returned to the caller of
/// `Pipeline::run`. The cursor has been released on every variant that
/// reached iteration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Fault the cursor reported only at end of stream.
    #[error("result stream failed: {0}")]
    Stream(CursorError),

    /// The run succeeded but the cursor could not be released.
    #[error("cursor release failed: {0}")]
    Release(CursorError),

    #[error("run cancelled between records")]
    Cancelled,
}
