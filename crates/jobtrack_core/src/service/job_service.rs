//! Job use-case service.
//!
//! # Responsibility
//! - Create jobs under a company resolved by name.
//! - List, find, delete jobs and update their free-text status.
//!
//! # Invariants
//! - A job for an unknown company is never inserted.
//! - Status updates reject blank values.

use crate::model::company::CompanyId;
use crate::model::job::{Job, JobId};
use crate::model::validation::{require_text, AppliedDate};
use crate::repo::company_repo::CompanyRepository;
use crate::repo::job_repo::{JobListing, JobRepository};
use crate::repo::EntityKind;
use crate::service::company_service::resolve_company_id;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Request model for `job create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub company_name: String,
    pub title: String,
    pub description: Option<String>,
    /// Must be `YYYY-MM-DD`.
    pub applied_date: String,
    pub link: Option<String>,
}

/// Use-case service for job postings.
pub struct JobService<J: JobRepository, C: CompanyRepository> {
    jobs: J,
    companies: C,
}

impl<J: JobRepository, C: CompanyRepository> JobService<J, C> {
    pub fn new(jobs: J, companies: C) -> Self {
        Self { jobs, companies }
    }

    /// Creates one job and returns it joined with its company name.
    pub fn create(&self, request: &NewJob) -> ServiceResult<JobListing> {
        let company_id = match resolve_company_id(&self.companies, &request.company_name) {
            Ok(id) => id,
            Err(err) => {
                warn!("event=job_create module=service status=rejected error={err}");
                return Err(err);
            }
        };

        let applied_date = AppliedDate::parse(&request.applied_date)?;
        let job = Job::new(company_id, &request.title, applied_date)?
            .with_details(request.description.clone(), request.link.clone());
        let id = self.jobs.create_job(&job)?;
        info!("event=job_create module=service status=ok id={id} company_id={company_id}");

        self.jobs
            .get_job(id)?
            .ok_or(ServiceError::InconsistentState(
                "created job not found in read-back",
            ))
    }

    pub fn list(&self) -> ServiceResult<Vec<JobListing>> {
        Ok(self.jobs.list_jobs()?)
    }

    /// Lists jobs of one company, failing when the company does not exist.
    pub fn list_for_company(&self, company_id: CompanyId) -> ServiceResult<Vec<JobListing>> {
        if self.companies.get_company(company_id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: EntityKind::Company,
                id: company_id,
            });
        }
        Ok(self.jobs.list_jobs_for_company(company_id)?)
    }

    pub fn find(&self, id: JobId) -> ServiceResult<JobListing> {
        self.jobs.get_job(id)?.ok_or(ServiceError::NotFound {
            entity: EntityKind::Job,
            id,
        })
    }

    pub fn delete(&self, id: JobId) -> ServiceResult<()> {
        self.jobs.delete_job(id)?;
        info!("event=job_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Replaces the free-text status of one job.
    pub fn update_status(&self, id: JobId, status: &str) -> ServiceResult<JobListing> {
        let status = require_text("status", status)?;
        self.jobs.update_job_status(id, &status)?;
        info!("event=job_status_update module=service status=ok id={id}");
        self.find(id)
    }
}
