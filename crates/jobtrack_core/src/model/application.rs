//! Job application record.
//!
//! An application is made to a company through one specific contact and is
//! tracked separately from bare job postings.
//!
//! # Invariants
//! - `title` is non-empty after trim.
//! - `applied_date` is optional but valid when present.

use crate::model::company::CompanyId;
use crate::model::contact::ContactId;
use crate::model::validation::{
    ensure_not_blank, optional_text, require_text, AppliedDate, ValidationError, DEFAULT_STATUS,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type ApplicationId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Option<ApplicationId>,
    pub company_id: CompanyId,
    pub contact_id: ContactId,
    pub title: String,
    pub description: Option<String>,
    pub applied_date: Option<AppliedDate>,
    pub link: Option<String>,
    pub status: Option<String>,
}

impl JobApplication {
    /// Creates an unsaved application draft with the default status.
    ///
    /// `contact_id` may be a placeholder when the contact is inserted in the
    /// same transaction; the repository fills in the real id.
    pub fn new(
        company_id: CompanyId,
        contact_id: ContactId,
        title: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            company_id,
            contact_id,
            title: require_text("title", title)?,
            description: None,
            applied_date: None,
            link: None,
            status: Some(DEFAULT_STATUS.to_string()),
        })
    }

    /// Sets optional fields, dropping blank text values.
    pub fn with_details(
        mut self,
        description: Option<String>,
        applied_date: Option<AppliedDate>,
        link: Option<String>,
    ) -> Self {
        self.description = optional_text(description);
        self.applied_date = applied_date;
        self.link = optional_text(link);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank("title", &self.title)?;
        if let Some(status) = &self.status {
            ensure_not_blank("status", status)?;
        }
        Ok(())
    }
}

impl Display for JobApplication {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(id) = self.id {
            write!(f, "#{id} ")?;
        }
        write!(f, "{} contact={}", self.title, self.contact_id)?;
        if let Some(date) = &self.applied_date {
            write!(f, " applied={date}")?;
        }
        if let Some(status) = &self.status {
            write!(f, " status={status}")?;
        }
        if let Some(link) = &self.link {
            write!(f, " link={link}")?;
        }
        Ok(())
    }
}
