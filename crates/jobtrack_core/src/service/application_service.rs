//! Job application use-case service.
//!
//! Applications are created through `ContactService::add`; this service
//! covers the read, status and delete paths.

use crate::model::application::ApplicationId;
use crate::model::validation::require_text;
use crate::repo::application_repo::{ApplicationListing, ApplicationRepository};
use crate::repo::EntityKind;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;

pub struct ApplicationService<A: ApplicationRepository> {
    repo: A,
}

impl<A: ApplicationRepository> ApplicationService<A> {
    pub fn new(repo: A) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> ServiceResult<Vec<ApplicationListing>> {
        Ok(self.repo.list_applications()?)
    }

    pub fn find(&self, id: ApplicationId) -> ServiceResult<ApplicationListing> {
        self.repo
            .get_application(id)?
            .ok_or(ServiceError::NotFound {
                entity: EntityKind::Application,
                id,
            })
    }

    pub fn delete(&self, id: ApplicationId) -> ServiceResult<()> {
        self.repo.delete_application(id)?;
        info!("event=application_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Replaces the free-text status of one application.
    ///
    /// Fails with `NotFound` when the application id does not exist.
    pub fn update_status(
        &self,
        id: ApplicationId,
        status: &str,
    ) -> ServiceResult<ApplicationListing> {
        let status = require_text("status", status)?;
        self.repo.update_application_status(id, &status)?;
        info!("event=application_status_update module=service status=ok id={id}");
        self.find(id)
    }
}
