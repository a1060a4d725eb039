//! SQLite-backed visit store
//!
//! The only way to obtain a `VisitStore` is a successful `open`, which applies
//! the schema; every other operation therefore runs against a ready store.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Datelike, NaiveDate, Utc};
use kaiz_core::errors::{ExError, VisitError};
use kaiz_core::logging_facility::elapsed_ms;
use kaiz_core::rules::{validate_create, validate_month, validate_update};
use kaiz_core::{log_op_end, log_op_error, log_op_start, Visit, VisitFields};
use rusqlite::{params_from_iter, Connection, OptionalExtension};

use super::row::{date_to_sql, to_sql_value, visit_from_row, VISIT_COLUMNS};
use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;

const OP_OPEN: &str = "visit_store_open";
const OP_CREATE: &str = "visit_create";
const OP_UPDATE: &str = "visit_update";
const OP_GET_BY_ID: &str = "visit_get_by_id";
const OP_GET_ALL: &str = "visit_get_all";
const OP_GET_BY_MONTH: &str = "visit_get_by_month";

const ORDER_BY: &str = "ORDER BY visit_date DESC, sr_no DESC";

/// Durable store of visit records
pub struct VisitStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl VisitStore {
    /// Open or create the store at `path` and ensure the schema exists
    ///
    /// Idempotent: reopening an existing file leaves its rows untouched.
    ///
    /// # Errors
    /// `StorageUnavailable` if the file or its directory cannot be created,
    /// opened or written.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let start = Instant::now();
        log_op_start!(OP_OPEN, path = %path.display());

        let result = db::open(path).and_then(|conn| Self::init(conn, Some(path.to_path_buf())));
        finish(OP_OPEN, start, &result);
        result
    }

    /// Open a fresh in-memory store
    ///
    /// # Errors
    /// `StorageUnavailable` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(db::open_in_memory()?, None)
    }

    fn init(mut conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn, path })
    }

    /// Backing file, or `None` for an in-memory store
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert a new visit and return its serial number
    ///
    /// Both timestamps are set to the same instant. Unknown keys and the
    /// system columns are ignored.
    ///
    /// # Errors
    /// `ValidationFailed` for a missing or empty required column, an invalid
    /// enum literal, a negative count or a mistyped value; nothing is written.
    /// `StorageUnavailable` on I/O failure.
    pub fn create(&mut self, fields: &VisitFields) -> Result<i64> {
        let start = Instant::now();
        log_op_start!(OP_CREATE, column_count = fields.len());

        let result = self.create_inner(fields);
        match &result {
            Ok(sr_no) => {
                log_op_end!(OP_CREATE, duration_ms = elapsed_ms(start), sr_no = *sr_no);
            }
            Err(err) => log_op_error!(OP_CREATE, err.clone(), duration_ms = elapsed_ms(start)),
        }
        result
    }

    fn create_inner(&mut self, fields: &VisitFields) -> Result<i64> {
        log_ignored_keys(OP_CREATE, fields);
        let columns = validate_create(fields).map_err(|e| validation(OP_CREATE, e))?;

        let now = Utc::now().timestamp_millis();
        let mut names: Vec<&str> = columns.iter().map(|(f, _)| f.column()).collect();
        names.extend(["created_at", "updated_at"]);
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO visits ({}) VALUES ({})",
            names.join(", "),
            placeholders.join(", ")
        );

        let mut values: Vec<rusqlite::types::Value> =
            columns.iter().map(|(_, v)| to_sql_value(v)).collect();
        values.push(now.into());
        values.push(now.into());

        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        tx.execute(&sql, params_from_iter(values))
            .map_err(|e| from_rusqlite(e).with_op(OP_CREATE))?;
        let sr_no = tx.last_insert_rowid();
        tx.commit().map_err(from_rusqlite)?;

        Ok(sr_no)
    }

    /// Apply a partial update to one visit
    ///
    /// Writes exactly the known, non-null columns in `fields` plus a fresh
    /// `updated_at`, in a single statement. Returns `false` when no row has
    /// `sr_no` or when `fields` holds nothing applicable; in the latter case
    /// the store is not touched at all.
    ///
    /// # Errors
    /// `ValidationFailed` if any supplied column is invalid; no column is
    /// written in that case. `StorageUnavailable` on I/O failure.
    pub fn update(&mut self, sr_no: i64, fields: &VisitFields) -> Result<bool> {
        let start = Instant::now();
        log_op_start!(OP_UPDATE, sr_no = sr_no, column_count = fields.len());

        let result = self.update_inner(sr_no, fields);
        match &result {
            Ok(updated) => {
                log_op_end!(
                    OP_UPDATE,
                    duration_ms = elapsed_ms(start),
                    sr_no = sr_no,
                    updated = *updated
                );
            }
            Err(err) => log_op_error!(
                OP_UPDATE,
                err.clone(),
                duration_ms = elapsed_ms(start),
                sr_no = sr_no
            ),
        }
        result
    }

    fn update_inner(&mut self, sr_no: i64, fields: &VisitFields) -> Result<bool> {
        log_ignored_keys(OP_UPDATE, fields);
        let columns = validate_update(fields)
            .map_err(|e| validation(OP_UPDATE, e).with_sr_no(sr_no))?;

        if columns.is_empty() {
            tracing::debug!(sr_no, "no applicable columns; update skipped");
            return Ok(false);
        }

        let mut assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, (f, _))| format!("{} = ?{}", f.column(), i + 1))
            .collect();
        assignments.push(format!("updated_at = ?{}", columns.len() + 1));
        let sql = format!(
            "UPDATE visits SET {} WHERE sr_no = ?{}",
            assignments.join(", "),
            columns.len() + 2
        );

        let mut values: Vec<rusqlite::types::Value> =
            columns.iter().map(|(_, v)| to_sql_value(v)).collect();
        values.push(Utc::now().timestamp_millis().into());
        values.push(sr_no.into());

        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        let changed = tx
            .execute(&sql, params_from_iter(values))
            .map_err(|e| from_rusqlite(e).with_op(OP_UPDATE).with_sr_no(sr_no))?;
        tx.commit().map_err(from_rusqlite)?;

        Ok(changed > 0)
    }

    /// Fetch one visit by serial number; `None` when it does not exist
    ///
    /// # Errors
    /// `StorageUnavailable` on I/O failure.
    pub fn get_by_id(&self, sr_no: i64) -> Result<Option<Visit>> {
        let start = Instant::now();
        log_op_start!(OP_GET_BY_ID, sr_no = sr_no);

        let result = self
            .conn
            .query_row(
                &format!("SELECT {} FROM visits WHERE sr_no = ?1", VISIT_COLUMNS),
                [sr_no],
                visit_from_row,
            )
            .optional()
            .map_err(|e| from_rusqlite(e).with_op(OP_GET_BY_ID).with_sr_no(sr_no));

        match &result {
            Ok(found) => {
                log_op_end!(
                    OP_GET_BY_ID,
                    duration_ms = elapsed_ms(start),
                    found = found.is_some()
                );
            }
            Err(err) => log_op_error!(OP_GET_BY_ID, err.clone(), duration_ms = elapsed_ms(start)),
        }
        result
    }

    /// Every visit, newest visit date first, ties by newest serial number
    ///
    /// # Errors
    /// `StorageUnavailable` on I/O failure.
    pub fn get_all(&self) -> Result<Vec<Visit>> {
        let start = Instant::now();
        log_op_start!(OP_GET_ALL);

        let sql = format!("SELECT {} FROM visits {}", VISIT_COLUMNS, ORDER_BY);
        let result = self.query_visits(&sql, Vec::new());
        finish_listing(OP_GET_ALL, start, &result);
        result
    }

    /// Visits dated within one calendar month, in `get_all` order
    ///
    /// # Errors
    /// `ValidationFailed` if `month` is outside 1..=12 or the year is outside
    /// the supported calendar range. `StorageUnavailable` on I/O failure.
    pub fn get_by_month(&self, year: i32, month: u32) -> Result<Vec<Visit>> {
        let start = Instant::now();
        log_op_start!(OP_GET_BY_MONTH, year = year, month = month);

        let result = month_bounds(year, month).and_then(|(first, next)| {
            let sql = format!(
                "SELECT {} FROM visits WHERE visit_date >= ?1 AND visit_date < ?2 {}",
                VISIT_COLUMNS, ORDER_BY
            );
            self.query_visits(&sql, vec![date_to_sql(first), date_to_sql(next)])
        });
        finish_listing(OP_GET_BY_MONTH, start, &result);
        result
    }

    /// Number of stored visits
    ///
    /// # Errors
    /// `StorageUnavailable` on I/O failure.
    pub fn count(&self) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM visits", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(u64::try_from(n).unwrap_or_default())
    }

    fn query_visits(&self, sql: &str, params: Vec<String>) -> Result<Vec<Visit>> {
        let mut stmt = self.conn.prepare(sql).map_err(from_rusqlite)?;
        let visits = stmt
            .query_map(params_from_iter(params), visit_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(visits)
    }
}

/// First day of the month and first day of the following month
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    validate_month(month).map_err(|e| validation(OP_GET_BY_MONTH, e))?;

    let out_of_range = || {
        validation(
            OP_GET_BY_MONTH,
            VisitError::InvalidDate {
                field: "visit_date".to_string(),
                value: format!("{}-{:02}", year, month),
            },
        )
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(out_of_range)?;

    Ok((first, next))
}

fn validation(op: &str, err: VisitError) -> ExError {
    ExError::from(err).with_op(op)
}

fn log_ignored_keys(op: &str, fields: &VisitFields) {
    for key in fields.unknown_keys() {
        tracing::debug!(op, column = key, "ignoring unknown column");
    }
}

fn finish<T>(op: &str, start: Instant, result: &Result<T>) {
    match result {
        Ok(_) => {
            log_op_end!(op, duration_ms = elapsed_ms(start));
        }
        Err(err) => log_op_error!(op, err.clone(), duration_ms = elapsed_ms(start)),
    }
}

fn finish_listing(op: &str, start: Instant, result: &Result<Vec<Visit>>) {
    match result {
        Ok(visits) => {
            log_op_end!(op, duration_ms = elapsed_ms(start), row_count = visits.len());
        }
        Err(err) => log_op_error!(op, err.clone(), duration_ms = elapsed_ms(start)),
    }
}
