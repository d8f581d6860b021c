//! Versioned schema scripts for the key-value store.
//!
//! Pending scripts run inside a single transaction, each followed by a
//! bump of `PRAGMA user_version`, so a failure leaves the file untouched.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

/// `(version, script)` pairs in ascending version order.
const SCRIPTS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Highest schema version this build can open.
pub fn latest_version() -> u32 {
    SCRIPTS.last().map_or(0, |(version, _)| *version)
}

/// Brings the schema of `conn` up to `latest_version()`.
///
/// # Errors
/// - `SchemaTooNew` when the file is ahead of this build.
/// - `Migration` when a script fails; the transaction is rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = current_user_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<_> = SCRIPTS
        .iter()
        .filter(|(version, _)| *version > found)
        .collect();
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=noop version={found}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, script) in pending {
        run_script(&tx, *version, script)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}

fn run_script(tx: &Transaction<'_>, version: u32, script: &str) -> DbResult<()> {
    tx.execute_batch(script)
        .and_then(|()| tx.pragma_update(None, "user_version", version))
        .map_err(|source| DbError::Migration { version, source })
}

/// Reads the schema version recorded on the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
