use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cursor::RowCursor;
use crate::error::PipelineError;
use crate::mapper::RecordMapper;
use crate::sink::RecordSink;
use crate::source::{CreatedAfter, RecordSource};

/// Cooperative stop flag consulted between records.
///
/// Clones share the flag; any clone may cancel.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Records handed to the sink, in cursor order.
    pub dispatched: usize,
}

/// Drives one query, iterate, map, dispatch sequence.
///
/// One run executes the source query, walks the cursor row by row, maps
/// each row, and dispatches each record strictly in cursor order. The
/// cursor is released exactly once on every exit path. Every failure
/// propagates to the caller; records dispatched before a failure are
/// not rolled back.
pub struct Pipeline<S, M, K> {
    source: S,
    mapper: M,
    sink: K,
    cancel: Option<CancelToken>,
}

impl<S, M, K> Pipeline<S, M, K>
where
    S: RecordSource,
    M: RecordMapper<S::Cursor>,
    K: RecordSink,
{
    pub fn new(source: S, mapper: M, sink: K) -> Self {
        Self {
            source,
            mapper,
            sink,
            cancel: None,
        }
    }

    /// Installs a stop flag; triggering it between records stops the
    /// run with `PipelineError::Cancelled`, cursor released.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Runs one pass over rows created after the filter bound.
    pub fn run(&mut self, filter: &CreatedAfter) -> Result<RunReport, PipelineError> {
        let mut cursor = self.source.execute(filter)?;

        // The cursor is live from here on: drain first, release exactly
        // once, then decide which result wins. A failing drain keeps
        // its own error; a release failure only surfaces when the run
        // would otherwise succeed.
        let outcome = self.drain(&mut cursor);
        let released = cursor.release();

        let report = outcome?;
        released.map_err(PipelineError::Release)?;
        Ok(report)
    }

    fn drain(&mut self, cursor: &mut S::Cursor) -> Result<RunReport, PipelineError> {
        let mut dispatched = 0;

        while cursor.advance() {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(PipelineError::Cancelled);
            }

            let record = self.mapper.map(cursor)?;
            self.sink.dispatch(record)?;
            dispatched += 1;
        }

        // Faults the backend reports only at end of stream surface
        // here, once, after the loop ends normally. Never mid-loop.
        if let Some(error) = cursor.final_error() {
            return Err(PipelineError::Stream(error));
        }

        Ok(RunReport { dispatched })
    }

    /// Dismantles the pipeline once its runs are over.
    pub fn into_parts(self) -> (S, M, K) {
        (self.source, self.mapper, self.sink)
    }
}
