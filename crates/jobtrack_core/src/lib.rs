//! Core domain logic for the job tracker.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::application::{ApplicationId, JobApplication};
pub use model::company::{Company, CompanyId};
pub use model::contact::{Contact, ContactId};
pub use model::job::{Job, JobId};
pub use model::validation::{AppliedDate, ValidationError, DEFAULT_STATUS};
pub use repo::application_repo::{
    ApplicationListing, ApplicationRepository, SqliteApplicationRepository,
};
pub use repo::company_repo::{CompanyDependents, CompanyRepository, SqliteCompanyRepository};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::job_repo::{JobListing, JobRepository, SqliteJobRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::application_service::ApplicationService;
pub use service::company_service::{CompanyService, DeletePolicy};
pub use service::contact_service::{ContactCreated, ContactService, NewContact};
pub use service::error::{ServiceError, ServiceResult};
pub use service::job_service::{JobService, NewJob};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
