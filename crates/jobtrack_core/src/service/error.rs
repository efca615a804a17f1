//! Error taxonomy returned by every service operation.

use crate::model::validation::ValidationError;
use crate::repo::{EntityKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Categorized failure of one tracker use-case.
#[derive(Debug)]
pub enum ServiceError {
    /// Bad field value (missing required text, malformed date).
    Validation(ValidationError),
    /// No company carries the referenced name.
    CompanyNotFound(String),
    /// Target id does not exist.
    NotFound { entity: EntityKind, id: i64 },
    /// Contact email is already taken.
    DuplicateEmail(String),
    /// Delete was refused because other rows still reference the target.
    HasDependents {
        entity: EntityKind,
        id: i64,
        dependents: String,
    },
    /// Storage-level failure.
    Repo(RepoError),
    /// Write succeeded but the read-back did not find the row.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CompanyNotFound(name) => write!(f, "company '{name}' not found"),
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::DuplicateEmail(email) => {
                write!(f, "a contact with email '{email}' already exists")
            }
            Self::HasDependents {
                entity,
                id,
                dependents,
            } => write!(
                f,
                "{entity} {id} still has {dependents}; use --cascade to delete them too"
            ),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent tracker state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            other => Self::Repo(other),
        }
    }
}
