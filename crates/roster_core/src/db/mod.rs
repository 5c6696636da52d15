//! Roster database access: connection bootstrap and schema versioning.
//!
//! Every connection handed to a repository comes from `open_db` or
//! `open_db_in_memory` and sits at `schema::latest_version()`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open `target` (a file path or `:memory:`).
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// A statement failed on an open connection.
    Sqlite(rusqlite::Error),
    /// The stored roster schema was written by a newer build.
    SchemaAhead { found: u32, supported: u32 },
    /// The connection skipped `open_db*` and was never upgraded.
    SchemaBehind { found: u32, expected: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open roster database `{target}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaAhead { found, supported } => write!(
                f,
                "roster schema v{found} is newer than this build supports (v{supported})"
            ),
            Self::SchemaBehind { found, expected } => write!(
                f,
                "roster schema v{found} is behind v{expected}; open the database via db::open_db"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaAhead { .. } | Self::SchemaBehind { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
