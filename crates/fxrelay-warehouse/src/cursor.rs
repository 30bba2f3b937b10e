use fxrelay_core::{CursorError, RowCursor, ScanError, SqlValue};

/// Cursor over a result set drained from the store at execute time.
///
/// DuckDB statements borrow their connection, so the result set is
/// buffered before the cursor leaves the store. A fault discovered
/// part-way through the drain is deferred: rows read before it iterate
/// normally and the fault surfaces through `final_error`, matching the
/// contract of a streaming backend.
#[derive(Debug)]
pub struct BufferedCursor {
    rows: Vec<Vec<SqlValue>>,
    next: usize,
    on_row: bool,
    deferred: Option<CursorError>,
    released: bool,
}

impl BufferedCursor {
    pub(crate) fn new(rows: Vec<Vec<SqlValue>>, deferred: Option<CursorError>) -> Self {
        Self {
            rows,
            next: 0,
            on_row: false,
            deferred,
            released: false,
        }
    }
}

impl RowCursor for BufferedCursor {
    fn advance(&mut self) -> bool {
        if self.released || self.next >= self.rows.len() {
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
        self.released = true;
        self.on_row = false;
        self.rows.clear();
        self.next = 0;
        Ok(())
    }

    fn final_error(&mut self) -> Option<CursorError> {
        self.deferred.clone()
    }
}
