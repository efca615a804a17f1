//! Job posting record.
//!
//! # Invariants
//! - `title` is non-empty after trim.
//! - `applied_date` is always present and valid.
//! - `status` is free text; `Job::new` starts it at `applied`.

use crate::model::company::CompanyId;
use crate::model::validation::{
    ensure_not_blank, optional_text, require_text, AppliedDate, ValidationError, DEFAULT_STATUS,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type JobId = i64;

/// Job posting associated with one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: Option<JobId>,
    pub company_id: CompanyId,
    pub title: String,
    pub description: Option<String>,
    pub applied_date: AppliedDate,
    pub link: Option<String>,
    /// Free text; not a constrained state machine.
    pub status: Option<String>,
}

impl Job {
    /// Creates an unsaved job draft with the default status.
    pub fn new(
        company_id: CompanyId,
        title: &str,
        applied_date: AppliedDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            company_id,
            title: require_text("title", title)?,
            description: None,
            applied_date,
            link: None,
            status: Some(DEFAULT_STATUS.to_string()),
        })
    }

    /// Sets optional description/link, dropping blank values.
    pub fn with_details(mut self, description: Option<String>, link: Option<String>) -> Self {
        self.description = optional_text(description);
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

impl Display for Job {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(id) = self.id {
            write!(f, "#{id} ")?;
        }
        write!(f, "{} applied={}", self.title, self.applied_date)?;
        if let Some(status) = &self.status {
            write!(f, " status={status}")?;
        }
        if let Some(link) = &self.link {
            write!(f, " link={link}")?;
        }
        Ok(())
    }
}
