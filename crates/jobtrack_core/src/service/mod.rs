//! Tracker use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Resolve references by name and apply delete policies.
//! - Return typed `ServiceError`s and leave presentation to callers.

pub mod application_service;
pub mod company_service;
pub mod contact_service;
pub mod error;
pub mod job_service;
