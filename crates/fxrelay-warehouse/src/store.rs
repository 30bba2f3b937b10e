use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use duckdb::types::{TimeUnit, Value as DuckValue};
use duckdb::Connection;
use uuid::Uuid;

use fxrelay_core::{
    CreatedAfter, CurrencyRecord, CursorError, QueryError, RecordSource, SqlValue, UtcDateTime,
};

use crate::cursor::BufferedCursor;
use crate::migrations;
use crate::StoreError;

const SELECT_CREATED_AFTER: &str =
    "SELECT type, chain, iso, created_at FROM currencies WHERE created_at > CAST(? AS TIMESTAMP)";

const ROW_WIDTH: usize = 4;

/// Store location, resolved from the process environment.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub home: PathBuf,
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn at_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let db_path = home.join("relay.duckdb");
        Self { home, db_path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::at_home(resolve_home())
    }
}

/// Caps how much of a result set one run will buffer.
#[derive(Debug, Clone, Copy)]
pub struct QueryGuardrails {
    pub max_rows: usize,
}

impl Default for QueryGuardrails {
    fn default() -> Self {
        Self { max_rows: 10_000 }
    }
}

/// Embedded DuckDB store holding the `currencies` table.
pub struct CurrencyStore {
    config: StoreConfig,
    connection: Connection,
    guardrails: QueryGuardrails,
}

impl CurrencyStore {
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(StoreConfig::default())
    }

    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let connection = Connection::open(config.db_path.as_path())?;
        connection.execute_batch("PRAGMA disable_progress_bar;")?;
        migrations::apply_migrations(&connection)?;

        Ok(Self {
            config,
            connection,
            guardrails: QueryGuardrails::default(),
        })
    }

    #[must_use]
    pub fn with_guardrails(mut self, guardrails: QueryGuardrails) -> Self {
        self.guardrails = guardrails;
        self
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        self.config.db_path.as_path()
    }

    /// Inserts currency rows in one transaction and appends an audit
    /// entry. Values are bound, never interpolated.
    pub fn insert_records(&self, records: &[CurrencyRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        self.connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<(), StoreError> {
            let mut statement = self.connection.prepare(
                "INSERT INTO currencies (type, chain, iso, created_at) \
                 VALUES (?, ?, ?, CAST(? AS TIMESTAMP))",
            )?;
            for record in records {
                statement.execute(duckdb::params![
                    record.category,
                    record.chain,
                    record.symbol,
                    record.created_at.format_rfc3339(),
                ])?;
            }

            self.append_relay_log("ingest", records.len())?;
            Ok(())
        })();

        finalize_transaction(&self.connection, result)
    }

    /// Appends one audit entry for a completed operation.
    pub fn append_relay_log(&self, operation: &str, row_count: usize) -> Result<(), StoreError> {
        let request_id = Uuid::new_v4().to_string();
        self.connection.execute(
            "INSERT INTO relay_log (request_id, operation, row_count) VALUES (?, ?, ?)",
            duckdb::params![request_id, operation, row_count as i64],
        )?;
        Ok(())
    }
}

impl RecordSource for CurrencyStore {
    type Cursor = BufferedCursor;

    fn execute(&mut self, filter: &CreatedAfter) -> Result<BufferedCursor, QueryError> {
        let mut statement = self
            .connection
            .prepare(SELECT_CREATED_AFTER)
            .map_err(|error| QueryError::new(error.to_string()))?;

        let mut rows = statement
            .query(duckdb::params![filter.bound().format_rfc3339()])
            .map_err(|error| QueryError::new(error.to_string()))?;

        // Statements borrow the connection, so the result set is
        // drained here. Faults part-way through the drain are deferred
        // into the cursor and surface via `final_error`, after the rows
        // that preceded them.
        let mut buffered = Vec::new();
        let mut deferred = None;

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    if buffered.len() >= self.guardrails.max_rows {
                        deferred = Some(CursorError::new(format!(
                            "result exceeded {} buffered rows; re-run with a later bound",
                            self.guardrails.max_rows
                        )));
                        break;
                    }
                    match read_row(row) {
                        Ok(values) => buffered.push(values),
                        Err(error) => {
                            deferred = Some(error);
                            break;
                        }
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    deferred = Some(CursorError::new(error.to_string()));
                    break;
                }
            }
        }

        Ok(BufferedCursor::new(buffered, deferred))
    }
}

fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}

fn read_row(row: &duckdb::Row<'_>) -> Result<Vec<SqlValue>, CursorError> {
    let mut values = Vec::with_capacity(ROW_WIDTH);
    for index in 0..ROW_WIDTH {
        let value: DuckValue = row
            .get(index)
            .map_err(|error| CursorError::new(error.to_string()))?;
        values.push(to_sql_value(value)?);
    }
    Ok(values)
}

fn to_sql_value(value: DuckValue) -> Result<SqlValue, CursorError> {
    match value {
        DuckValue::Null => Ok(SqlValue::Null),
        DuckValue::Boolean(value) => Ok(SqlValue::Boolean(value)),
        DuckValue::TinyInt(value) => Ok(SqlValue::Integer(i64::from(value))),
        DuckValue::SmallInt(value) => Ok(SqlValue::Integer(i64::from(value))),
        DuckValue::Int(value) => Ok(SqlValue::Integer(i64::from(value))),
        DuckValue::BigInt(value) => Ok(SqlValue::Integer(value)),
        DuckValue::UTinyInt(value) => Ok(SqlValue::Integer(i64::from(value))),
        DuckValue::USmallInt(value) => Ok(SqlValue::Integer(i64::from(value))),
        DuckValue::UInt(value) => Ok(SqlValue::Integer(i64::from(value))),
        DuckValue::Float(value) => Ok(SqlValue::Double(f64::from(value))),
        DuckValue::Double(value) => Ok(SqlValue::Double(value)),
        DuckValue::Text(value) => Ok(SqlValue::Text(value)),
        DuckValue::Timestamp(unit, raw) => timestamp_value(unit, raw),
        other => Err(CursorError::new(format!(
            "unsupported column value: {other:?}"
        ))),
    }
}

fn timestamp_value(unit: TimeUnit, raw: i64) -> Result<SqlValue, CursorError> {
    let micros = match unit {
        TimeUnit::Second => raw.checked_mul(1_000_000),
        TimeUnit::Millisecond => raw.checked_mul(1_000),
        TimeUnit::Microsecond => Some(raw),
        TimeUnit::Nanosecond => Some(raw / 1_000),
    };

    let micros = micros
        .ok_or_else(|| CursorError::new(format!("timestamp out of range: {raw} ({unit:?})")))?;

    UtcDateTime::from_unix_micros(micros)
        .map(SqlValue::Timestamp)
        .map_err(|error| CursorError::new(error.to_string()))
}

fn resolve_home() -> PathBuf {
    if let Some(path) = env::var_os("FXRELAY_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".fxrelay");
    }

    PathBuf::from(".fxrelay")
}
