//! Company use-case service.
//!
//! # Responsibility
//! - Create, list, find and delete companies.
//! - Resolve companies by name for the other services.
//!
//! # Invariants
//! - `DeletePolicy::Restrict` never removes a company that still has jobs,
//!   contacts or applications.

use crate::model::company::{Company, CompanyId};
use crate::repo::company_repo::{CompanyDependents, CompanyRepository};
use crate::repo::EntityKind;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// How deletes treat rows that still reference the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refuse the delete while dependents exist.
    #[default]
    Restrict,
    /// Delete dependents together with the target.
    Cascade,
}

/// Use-case service wrapper for company operations.
pub struct CompanyService<R: CompanyRepository> {
    repo: R,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one company and returns the stored record.
    pub fn create(
        &self,
        name: &str,
        website: Option<String>,
        contact_info: Option<String>,
    ) -> ServiceResult<Company> {
        let company = Company::new(name, website, contact_info).inspect_err(|err| {
            warn!("event=company_create module=service status=rejected error={err}");
        })?;
        let id = self.repo.create_company(&company)?;
        info!("event=company_create module=service status=ok id={id}");

        self.repo
            .get_company(id)?
            .ok_or(ServiceError::InconsistentState(
                "created company not found in read-back",
            ))
    }

    pub fn list(&self) -> ServiceResult<Vec<Company>> {
        Ok(self.repo.list_companies()?)
    }

    /// Gets one company by id, failing with `NotFound` when absent.
    pub fn find(&self, id: CompanyId) -> ServiceResult<Company> {
        self.repo.get_company(id)?.ok_or(ServiceError::NotFound {
            entity: EntityKind::Company,
            id,
        })
    }

    /// Resolves a company by exact name.
    pub fn find_by_name(&self, name: &str) -> ServiceResult<Company> {
        resolve_company_by_name(&self.repo, name)
    }

    /// Deletes one company according to `policy`.
    ///
    /// Returns the dependents removed alongside it (always empty for
    /// `DeletePolicy::Restrict`).
    pub fn delete(&self, id: CompanyId, policy: DeletePolicy) -> ServiceResult<CompanyDependents> {
        let dependents = self.repo.count_dependents(id)?;

        match policy {
            DeletePolicy::Restrict => {
                if !dependents.is_empty() {
                    warn!(
                        "event=company_delete module=service status=rejected id={id} reason=has_dependents"
                    );
                    return Err(ServiceError::HasDependents {
                        entity: EntityKind::Company,
                        id,
                        dependents: dependents.to_string(),
                    });
                }
                self.repo.delete_company(id)?;
                info!("event=company_delete module=service status=ok id={id} policy=restrict");
                Ok(CompanyDependents::default())
            }
            DeletePolicy::Cascade => {
                let removed = self.repo.delete_company_cascade(id)?;
                info!(
                    "event=company_delete module=service status=ok id={id} policy=cascade removed_jobs={} removed_contacts={} removed_applications={}",
                    removed.jobs, removed.contacts, removed.applications
                );
                Ok(removed)
            }
        }
    }
}

/// Returns the lowest-id company named exactly `name`.
pub(crate) fn resolve_company_by_name<R: CompanyRepository>(
    repo: &R,
    name: &str,
) -> ServiceResult<Company> {
    let mut matches = repo.find_companies_by_name(name)?;
    if matches.len() > 1 {
        warn!(
            "event=company_resolve module=service status=ambiguous matches={} using=lowest_id",
            matches.len()
        );
    }
    if matches.is_empty() {
        return Err(ServiceError::CompanyNotFound(name.trim().to_string()));
    }
    Ok(matches.swap_remove(0))
}

/// Resolves a company by name and returns its row id.
pub(crate) fn resolve_company_id<R: CompanyRepository>(
    repo: &R,
    name: &str,
) -> ServiceResult<CompanyId> {
    let company = resolve_company_by_name(repo, name)?;
    let Some(id) = company.id else {
        return Err(ServiceError::InconsistentState("company has no id"));
    };
    Ok(id)
}
