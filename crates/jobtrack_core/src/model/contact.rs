//! Contact record.
//!
//! # Invariants
//! - `name` and `email` are non-empty after trim.
//! - `email` uniqueness is enforced by storage, not here.

use crate::model::company::CompanyId;
use crate::model::validation::{ensure_not_blank, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type ContactId = i64;

/// Person at a company through whom applications are routed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Option<ContactId>,
    pub company_id: CompanyId,
    pub name: String,
    pub email: String,
}

impl Contact {
    /// Creates an unsaved contact draft for `company_id`.
    pub fn new(company_id: CompanyId, name: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            company_id,
            name: require_text("name", name)?,
            email: require_text("email", email)?,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("email", &self.email)
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(id) = self.id {
            write!(f, "#{id} ")?;
        }
        write!(f, "{} <{}>", self.name, self.email)?;
        write!(f, " company={}", self.company_id)
    }
}
