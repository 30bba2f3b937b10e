//! Scripted substitutes that drive the orchestrator without a database
//! or broker.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::cursor::{RowCursor, SqlValue};
use crate::domain::{CurrencyRecord, UtcDateTime};
use crate::error::{CursorError, DispatchError, QueryError, ScanError};
use crate::sink::RecordSink;
use crate::source::{CreatedAfter, RecordSource};

/// Builds one `currencies` row in column order: type, chain, iso,
/// created_at.
pub fn currency_row(
    category: &str,
    chain: Option<&str>,
    symbol: &str,
    created_at: &str,
) -> Vec<SqlValue> {
    vec![
        SqlValue::Text(category.to_owned()),
        match chain {
            Some(chain) => SqlValue::Text(chain.to_owned()),
            None => SqlValue::Null,
        },
        SqlValue::Text(symbol.to_owned()),
        SqlValue::Timestamp(UtcDateTime::parse(created_at).expect("test timestamp")),
    ]
}

pub struct ScriptedCursor {
    rows: Vec<Vec<SqlValue>>,
    next: usize,
    on_row: bool,
    pending: Option<CursorError>,
    release_error: Option<CursorError>,
    releases: Rc<Cell<usize>>,
}

impl ScriptedCursor {
    pub fn new(rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            rows,
            next: 0,
            on_row: false,
            pending: None,
            release_error: None,
            releases: Rc::new(Cell::new(0)),
        }
    }

    /// Fault surfaced by `final_error` after the loop ends normally.
    pub fn with_final_error(mut self, error: CursorError) -> Self {
        self.pending = Some(error);
        self
    }

    pub fn with_release_error(mut self, error: CursorError) -> Self {
        self.release_error = Some(error);
        self
    }

    /// Shared release counter, usable after the cursor moves into a run.
    pub fn release_count(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.releases)
    }
}

impl RowCursor for ScriptedCursor {
    fn advance(&mut self) -> bool {
        if self.next >= self.rows.len() {
            self.on_row = false;
            return false;
        }
        self.next += 1;
        self.on_row = true;
        true
    }

    fn read_into(&mut self, dest: &mut [SqlValue]) -> Result<(), ScanError> {
        if !self.on_row {
            return Err(ScanError::CursorState);
        }
        let row = &self.rows[self.next - 1];
        if dest.len() != row.len() {
            return Err(ScanError::Width {
                expected: dest.len(),
                found: row.len(),
            });
        }
        for (slot, value) in dest.iter_mut().zip(row.iter()) {
            *slot = value.clone();
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), CursorError> {
        self.releases.set(self.releases.get() + 1);
        match &self.release_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn final_error(&mut self) -> Option<CursorError> {
        self.pending.clone()
    }
}

pub struct ScriptedSource {
    next: Option<Result<ScriptedCursor, QueryError>>,
}

impl ScriptedSource {
    pub fn yielding(cursor: ScriptedCursor) -> Self {
        Self {
            next: Some(Ok(cursor)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            next: Some(Err(QueryError::new(message))),
        }
    }
}

impl RecordSource for ScriptedSource {
    type Cursor = ScriptedCursor;

    fn execute(&mut self, _filter: &CreatedAfter) -> Result<ScriptedCursor, QueryError> {
        self.next.take().expect("scripted source executed twice")
    }
}

#[derive(Default)]
pub struct RecordingSink {
    records: Rc<RefCell<Vec<CurrencyRecord>>>,
    fail_on: Option<usize>,
    seen: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the nth dispatch (1-based); earlier dispatches succeed.
    pub fn failing_on(ordinal: usize) -> Self {
        Self {
            fail_on: Some(ordinal),
            ..Self::default()
        }
    }

    /// Shared view of dispatched records, usable after the sink moves
    /// into a run.
    pub fn records(&self) -> Rc<RefCell<Vec<CurrencyRecord>>> {
        Rc::clone(&self.records)
    }
}

impl RecordSink for RecordingSink {
    fn dispatch(&mut self, record: CurrencyRecord) -> Result<(), DispatchError> {
        self.seen += 1;
        if self.fail_on == Some(self.seen) {
            return Err(DispatchError::Rejected(String::from(
                "scripted sink failure",
            )));
        }
        self.records.borrow_mut().push(record);
        Ok(())
    }
}
