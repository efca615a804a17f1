//! Company record.
//!
//! # Invariants
//! - `name` is non-empty after trim.
//! - Blank `website` / `contact_info` are stored as `None`.

use crate::model::validation::{ensure_not_blank, optional_text, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// System-assigned company identifier.
pub type CompanyId = i64;

/// Employer that owns jobs, contacts and applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// `None` until the record is persisted.
    pub id: Option<CompanyId>,
    pub name: String,
    pub website: Option<String>,
    pub contact_info: Option<String>,
}

impl Company {
    /// Creates an unsaved company draft.
    pub fn new(
        name: &str,
        website: Option<String>,
        contact_info: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            name: require_text("name", name)?,
            website: optional_text(website),
            contact_info: optional_text(contact_info),
        })
    }

    /// Re-checks invariants on a possibly hand-edited record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("name", &self.name)
    }
}

impl Display for Company {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{id} {}", self.name)?,
            None => write!(f, "{}", self.name)?,
        }
        if let Some(website) = &self.website {
            write!(f, " website={website}")?;
        }
        if let Some(contact_info) = &self.contact_info {
            write!(f, " contact_info={contact_info}")?;
        }
        Ok(())
    }
}
