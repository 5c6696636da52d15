//! Roster schema steps and `user_version` bookkeeping.
//!
//! # Invariants
//! - Step versions start at 1 and strictly increase.
//! - `PRAGMA user_version` holds the last applied step.
//! - Pending steps apply in a single transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::cmp::Ordering;

struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Where a connection's schema stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    Current,
    Behind { found: u32 },
}

/// Schema version this build writes and expects.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads `user_version`; a version newer than this build is an error.
pub fn schema_state(conn: &Connection) -> DbResult<SchemaState> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let latest = latest_version();
    match found.cmp(&latest) {
        Ordering::Greater => Err(DbError::SchemaAhead {
            found,
            supported: latest,
        }),
        Ordering::Equal => Ok(SchemaState::Current),
        Ordering::Less => Ok(SchemaState::Behind { found }),
    }
}

/// Fails unless the connection is exactly at `latest_version()`.
pub fn require_current(conn: &Connection) -> DbResult<()> {
    match schema_state(conn)? {
        SchemaState::Current => Ok(()),
        SchemaState::Behind { found } => Err(DbError::SchemaBehind {
            found,
            expected: latest_version(),
        }),
    }
}

/// Brings the connection up to `latest_version()`.
pub fn upgrade(conn: &mut Connection) -> DbResult<()> {
    let SchemaState::Behind { found } = schema_state(conn)? else {
        return Ok(());
    };

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > found) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={found} to_version={}",
        latest_version()
    );
    Ok(())
}
