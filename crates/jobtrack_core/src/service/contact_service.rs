//! Contact use-case service.
//!
//! # Responsibility
//! - Add contacts under a company resolved by name.
//! - Optionally record the first application routed through the contact.
//!
//! # Invariants
//! - All field validation happens before any row is written.
//! - Contact and application are inserted atomically.

use crate::model::application::{ApplicationId, JobApplication};
use crate::model::company::CompanyId;
use crate::model::contact::{Contact, ContactId};
use crate::model::validation::{AppliedDate, ValidationError};
use crate::repo::application_repo::{ApplicationListing, ApplicationRepository};
use crate::repo::company_repo::CompanyRepository;
use crate::repo::contact_repo::ContactRepository;
use crate::repo::EntityKind;
use crate::service::company_service::{resolve_company_id, DeletePolicy};
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Request model for `contact add`.
///
/// Any `job_*` field (or `applied_date`/`link`) marks the request as also
/// creating an application; `job_title` is then required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub company_name: String,
    pub name: String,
    pub email: String,
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    pub applied_date: Option<String>,
    pub link: Option<String>,
}

impl NewContact {
    fn wants_application(&self) -> bool {
        let details = [
            &self.job_title,
            &self.job_description,
            &self.applied_date,
            &self.link,
        ];
        details
            .into_iter()
            .flatten()
            .any(|value| !value.trim().is_empty())
    }
}

/// Result of `ContactService::add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCreated {
    pub contact: Contact,
    pub application: Option<ApplicationListing>,
}

/// Use-case service for contact operations.
pub struct ContactService<P, C, A>
where
    P: ContactRepository,
    C: CompanyRepository,
    A: ApplicationRepository,
{
    contacts: P,
    companies: C,
    applications: A,
}

impl<P, C, A> ContactService<P, C, A>
where
    P: ContactRepository,
    C: CompanyRepository,
    A: ApplicationRepository,
{
    pub fn new(contacts: P, companies: C, applications: A) -> Self {
        Self {
            contacts,
            companies,
            applications,
        }
    }

    /// Adds one contact, plus a linked application when requested.
    pub fn add(&self, request: &NewContact) -> ServiceResult<ContactCreated> {
        let company_id = resolve_company_id(&self.companies, &request.company_name)?;

        let contact = Contact::new(company_id, &request.name, &request.email)?;
        let application = if request.wants_application() {
            let applied_date = request
                .applied_date
                .as_deref()
                .map(AppliedDate::parse)
                .transpose()?;
            let title = request
                .job_title
                .as_deref()
                .filter(|title| !title.trim().is_empty())
                .ok_or(ValidationError::MissingJobTitle)?;
            // Contact id is assigned inside the insert transaction.
            let application = JobApplication::new(company_id, 0, title)?;
            Some(application.with_details(
                request.job_description.clone(),
                applied_date,
                request.link.clone(),
            ))
        } else {
            None
        };

        let (contact_id, application_id) = self
            .contacts
            .create_contact_with_application(&contact, application.as_ref())
            .inspect_err(|err| {
                warn!("event=contact_add module=service status=rejected error={err}");
            })?;
        info!(
            "event=contact_add module=service status=ok id={contact_id} company_id={company_id} application_id={}",
            application_id.map_or_else(|| "none".to_string(), |id| id.to_string())
        );

        let contact = self
            .contacts
            .get_contact(contact_id)?
            .ok_or(ServiceError::InconsistentState(
                "created contact not found in read-back",
            ))?;
        let application = match application_id {
            Some(id) => Some(self.read_back_application(id)?),
            None => None,
        };

        Ok(ContactCreated {
            contact,
            application,
        })
    }

    pub fn list(&self) -> ServiceResult<Vec<Contact>> {
        Ok(self.contacts.list_contacts()?)
    }

    fn read_back_application(&self, id: ApplicationId) -> ServiceResult<ApplicationListing> {
        self.applications
            .get_application(id)?
            .ok_or(ServiceError::InconsistentState(
                "created application not found in read-back",
            ))
    }

    pub fn find(&self, id: ContactId) -> ServiceResult<Contact> {
        self.contacts
            .get_contact(id)?
            .ok_or(ServiceError::NotFound {
                entity: EntityKind::Contact,
                id,
            })
    }

    /// Lists contacts of one company, failing when the company does not exist.
    pub fn list_for_company(&self, company_id: CompanyId) -> ServiceResult<Vec<Contact>> {
        if self.companies.get_company(company_id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: EntityKind::Company,
                id: company_id,
            });
        }
        Ok(self.contacts.list_contacts_for_company(company_id)?)
    }

    /// Lists applications routed through one contact.
    pub fn applications(&self, id: ContactId) -> ServiceResult<Vec<ApplicationListing>> {
        self.find(id)?;
        Ok(self.applications.list_applications_for_contact(id)?)
    }

    /// Deletes one contact; returns how many applications went with it.
    pub fn delete(&self, id: ContactId, policy: DeletePolicy) -> ServiceResult<u64> {
        match policy {
            DeletePolicy::Restrict => {
                let applications = self.contacts.count_applications(id)?;
                if applications > 0 {
                    warn!(
                        "event=contact_delete module=service status=rejected id={id} reason=has_dependents"
                    );
                    return Err(ServiceError::HasDependents {
                        entity: EntityKind::Contact,
                        id,
                        dependents: format!("{applications} application(s)"),
                    });
                }
                self.contacts.delete_contact(id)?;
                info!("event=contact_delete module=service status=ok id={id} policy=restrict");
                Ok(0)
            }
            DeletePolicy::Cascade => {
                let removed = self.contacts.delete_contact_cascade(id)?;
                info!(
                    "event=contact_delete module=service status=ok id={id} policy=cascade removed_applications={removed}"
                );
                Ok(removed)
            }
        }
    }
}
