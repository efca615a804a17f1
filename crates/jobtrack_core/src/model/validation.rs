//! Field validation shared by all tracker records.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static APPLIED_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid applied date regex"));

/// Status assigned to jobs and applications when none is given.
pub const DEFAULT_STATUS: &str = "applied";

/// Validation failures raised by model constructors and `validate()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    EmptyField(&'static str),
    /// `applied_date` is not a `YYYY-MM-DD` calendar date.
    InvalidAppliedDate(String),
    /// Application details were given without the job title they belong to.
    MissingJobTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::InvalidAppliedDate(value) => {
                write!(f, "invalid applied date `{value}` (expected YYYY-MM-DD)")
            }
            Self::MissingJobTitle => {
                f.write_str("job_title is required when other job fields are given")
            }
        }
    }
}

impl Error for ValidationError {}

/// Date an application was sent, kept verbatim as entered.
///
/// Only values shaped exactly `YYYY-MM-DD` that name a real calendar day are
/// accepted, so `2024-1-05` and `2023-02-29` are both rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppliedDate(String);

impl AppliedDate {
    /// Parses and validates one applied date.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let well_formed = APPLIED_DATE_RE.is_match(value);
        if !well_formed || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
            return Err(ValidationError::InvalidAppliedDate(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Builds an applied date from a calendar day.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AppliedDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AppliedDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AppliedDate> for String {
    fn from(value: AppliedDate) -> Self {
        value.0
    }
}

/// Trims a required field, failing when nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional field; blank input becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

pub(crate) fn ensure_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
