//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define owner-scoped data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `TrackedPayment::validate()` before persistence.
//! - Every query is filtered by owner; other owners' rows read as `NotFound`.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod payment_repo;
pub mod settings_repo;

use crate::db::migrations::{current_version, latest_version};
use payment_repo::{RepoError, RepoResult};
use rusqlite::Connection;

/// Rejects connections that were not opened through `db::open_db*`.
pub(crate) fn ensure_schema_ready(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let actual_version = current_version(conn)?;
    let expected_version = latest_version();
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
