//! Connection bootstrap for the tracker store.
//!
//! Every connection handed out here has `foreign_keys=ON`, a busy timeout,
//! and a schema at `migrations::latest_version()`.

use super::migrations::{apply_migrations, current_version};
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

enum Target<'a> {
    File(&'a Path),
    Memory,
}

impl Target<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        match self {
            Self::File(path) => Connection::open(path),
            Self::Memory => Connection::open_in_memory(),
        }
    }
}

/// Opens (creating if needed) the store at `path` and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open(Target::File(path.as_ref()))
}

/// Opens a throwaway in-memory store, fully migrated.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open(Target::Memory)
}

fn open(target: Target<'_>) -> DbResult<Connection> {
    let started = Instant::now();
    let result: DbResult<Connection> =
        target.connect().map_err(Into::into).and_then(|mut conn| {
            prepare(&mut conn)?;
            Ok(conn)
        });
    let elapsed_ms = started.elapsed().as_millis();

    match &result {
        Ok(conn) => info!(
            "event=db_open module=db status=ok target={} schema={} duration_ms={elapsed_ms}",
            target.kind(),
            current_version(conn).unwrap_or_default()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={} duration_ms={elapsed_ms} error={err}",
            target.kind()
        ),
    }
    result
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
