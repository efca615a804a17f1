//! Tracker domain model.
//!
//! # Responsibility
//! - Define companies, contacts, jobs and applications as plain records.
//! - Reject invalid field values before anything reaches storage.
//!
//! # Invariants
//! - Persisted records always carry `Some(id)`; drafts carry `None`.
//! - Required text fields are never empty or whitespace only.
//! - `applied_date` values are strict `YYYY-MM-DD` calendar dates.

pub mod application;
pub mod company;
pub mod contact;
pub mod job;
pub mod validation;
