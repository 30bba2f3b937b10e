use crate::cursor::{RowCursor, SqlValue};
use crate::domain::{CurrencyRecord, UtcDateTime};
use crate::error::MapError;

/// Converts one positioned cursor row into a domain record.
pub trait RecordMapper<C: RowCursor> {
    /// Precondition: the immediately preceding `advance` returned true.
    fn map(&self, cursor: &mut C) -> Result<CurrencyRecord, MapError>;
}

/// Default mapper for the `currencies` row layout: four columns in
/// fixed order (`type`, `chain`, `iso`, `created_at`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyMapper;

impl<C: RowCursor> RecordMapper<C> for CurrencyMapper {
    fn map(&self, cursor: &mut C) -> Result<CurrencyRecord, MapError> {
        let mut columns = [SqlValue::Null, SqlValue::Null, SqlValue::Null, SqlValue::Null];
        cursor.read_into(&mut columns)?;
        let [category, chain, symbol, created_at] = columns;

        Ok(CurrencyRecord {
            category: text(category, "type")?,
            symbol: text(symbol, "iso")?,
            chain: nullable_text(chain, "chain")?,
            created_at: timestamp(created_at, "created_at")?,
        })
    }
}

fn text(value: SqlValue, column: &'static str) -> Result<String, MapError> {
    match value {
        SqlValue::Text(value) => Ok(value),
        other => Err(mismatch(column, "TEXT", &other)),
    }
}

fn nullable_text(value: SqlValue, column: &'static str) -> Result<Option<String>, MapError> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Text(value) => Ok(Some(value)),
        other => Err(mismatch(column, "TEXT or NULL", &other)),
    }
}

fn timestamp(value: SqlValue, column: &'static str) -> Result<UtcDateTime, MapError> {
    match value {
        SqlValue::Timestamp(value) => Ok(value),
        other => Err(mismatch(column, "TIMESTAMP", &other)),
    }
}

fn mismatch(column: &'static str, expected: &'static str, found: &SqlValue) -> MapError {
    MapError::ColumnType {
        column,
        expected,
        found: found.kind(),
    }
}
