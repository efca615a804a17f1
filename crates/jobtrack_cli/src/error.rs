//! CLI-level errors.
//!
//! These are the top-level errors shown to the user; each maps to one exit
//! code.

use jobtrack_core::db::DbError;
use jobtrack_core::{RepoError, ServiceError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

use crate::exitcode;

#[derive(Debug)]
pub enum CliError {
    /// Use-case failure (validation, not found, duplicate, ...).
    Service(ServiceError),
    /// Database could not be opened or bootstrapped.
    Db(DbError),
    /// Repository could not be built over the connection.
    Repo(RepoError),
    Output(io::Error),
    Json(serde_json::Error),
    Logging(String),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Service(err) => match err {
                ServiceError::Validation(_)
                | ServiceError::DuplicateEmail(_)
                | ServiceError::HasDependents { .. } => exitcode::DATAERR,
                ServiceError::CompanyNotFound(_) | ServiceError::NotFound { .. } => {
                    exitcode::NOINPUT
                }
                ServiceError::Repo(_) | ServiceError::InconsistentState(_) => exitcode::SOFTWARE,
            },
            Self::Db(_) | Self::Repo(_) => exitcode::SOFTWARE,
            Self::Output(_) | Self::Json(_) => exitcode::IOERR,
            Self::Logging(_) => exitcode::CONFIG,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "failed to open database: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
            Self::Json(err) => write!(f, "failed to encode JSON output: {err}"),
            Self::Logging(message) => write!(f, "failed to initialize logging: {message}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
