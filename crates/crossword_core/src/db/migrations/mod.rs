//! Schema migrations for the entry store.
//!
//! # Responsibility
//! - List schema scripts in the order they must run.
//! - Bring an opened connection up to the newest known schema.
//!
//! # Invariants
//! - Versions increase by one per script.
//! - `PRAGMA user_version` equals the last script applied.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema scripts indexed by version; entry `n` produces version `n + 1`.
const SCHEMA_SCRIPTS: &[&str] = &[include_str!("0001_entries.sql")];

/// Returns the newest schema version this binary can write.
pub fn latest_version() -> u32 {
    SCHEMA_SCRIPTS.len() as u32
}

/// Upgrades `conn` to [`latest_version`].
///
/// Pending scripts run in one transaction; a failing script leaves the
/// previous version untouched.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is newer than this binary.
/// - `DbError::Sqlite` when a script or the version bump fails.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let latest = latest_version();

    if found > latest {
        return Err(DbError::SchemaTooNew {
            found,
            supported: latest,
        });
    }
    if found == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (index, script) in SCHEMA_SCRIPTS.iter().enumerate().skip(found as usize) {
        let version = index as u32 + 1;
        tx.execute_batch(script)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={latest}");
    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    Ok(version)
}
