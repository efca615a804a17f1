//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts per tracker record type.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes call `validate()` on the record before SQL mutations.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateEmail`)
//!   instead of raw constraint failures.

pub mod application_repo;
pub mod company_repo;
pub mod contact_repo;
pub mod job_repo;

use crate::db::migrations::{current_user_version, latest_version, REQUIRED_TABLES};
use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::{ffi, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Record type named in repository errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Company,
    Contact,
    Job,
    Application,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Contact => "contact",
            Self::Job => "job",
            Self::Application => "job application",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository error shared by all tracker tables.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        entity: EntityKind,
        id: i64,
    },
    /// Another contact already uses this email.
    DuplicateEmail(String),
    /// Write referenced a missing row or would orphan existing rows.
    ForeignKey(EntityKind),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateEmail(email) => {
                write!(f, "a contact with email `{email}` already exists")
            }
            Self::ForeignKey(entity) => {
                write!(f, "{entity} write violates a foreign key reference")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "tracker repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "tracker repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps constraint failures raised by a write on `entity` to semantic errors.
pub(crate) fn map_write_error(
    err: rusqlite::Error,
    entity: EntityKind,
    email: Option<&str>,
) -> RepoError {
    let extended_code = match &err {
        rusqlite::Error::SqliteFailure(failure, _) => Some(failure.extended_code),
        _ => None,
    };

    match (extended_code, email) {
        (Some(ffi::SQLITE_CONSTRAINT_UNIQUE), Some(email)) => {
            RepoError::DuplicateEmail(email.to_string())
        }
        (Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY), _) => RepoError::ForeignKey(entity),
        _ => err.into(),
    }
}

/// Checks that `conn` went through `open_db` bootstrap.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Converts a `COUNT(*)` result to an unsigned count.
pub(crate) fn count_to_u64(value: i64) -> RepoResult<u64> {
    u64::try_from(value).map_err(|_| RepoError::InvalidData(format!("negative row count {value}")))
}
