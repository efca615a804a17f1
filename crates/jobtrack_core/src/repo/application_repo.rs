//! Job application repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Every stored application references an existing company and contact
//!   (enforced by foreign keys).
//! - Listing order is `id ASC`.

use crate::model::application::{ApplicationId, JobApplication};
use crate::model::contact::ContactId;
use crate::model::validation::AppliedDate;
use crate::repo::{ensure_connection_ready, map_write_error, EntityKind, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use serde::Serialize;

const APPLICATION_SELECT_SQL: &str = "SELECT
    a.id,
    a.company_id,
    a.contact_id,
    a.title,
    a.description,
    a.applied_date,
    a.link,
    a.status,
    c.name AS company_name,
    p.name AS contact_name
FROM job_applications a
JOIN companies c ON c.id = a.company_id
JOIN contacts p ON p.id = a.contact_id";

/// Application read model joined with company and contact names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationListing {
    #[serde(flatten)]
    pub application: JobApplication,
    pub company_name: String,
    pub contact_name: String,
}

/// Repository interface for job application records.
pub trait ApplicationRepository {
    fn create_application(&self, application: &JobApplication) -> RepoResult<ApplicationId>;
    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<ApplicationListing>>;
    fn list_applications(&self) -> RepoResult<Vec<ApplicationListing>>;
    fn list_applications_for_contact(
        &self,
        contact_id: ContactId,
    ) -> RepoResult<Vec<ApplicationListing>>;
    fn update_application_status(&self, id: ApplicationId, status: &str) -> RepoResult<()>;
    fn delete_application(&self, id: ApplicationId) -> RepoResult<()>;
}

/// SQLite-backed job application repository.
pub struct SqliteApplicationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteApplicationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ApplicationRepository for SqliteApplicationRepository<'_> {
    fn create_application(&self, application: &JobApplication) -> RepoResult<ApplicationId> {
        insert_application(self.conn, application)
    }

    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<ApplicationListing>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{APPLICATION_SELECT_SQL} WHERE a.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_application_row(row)?));
        }

        Ok(None)
    }

    fn list_applications(&self) -> RepoResult<Vec<ApplicationListing>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{APPLICATION_SELECT_SQL} ORDER BY a.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut applications = Vec::new();
        while let Some(row) = rows.next()? {
            applications.push(parse_application_row(row)?);
        }
        Ok(applications)
    }

    fn list_applications_for_contact(
        &self,
        contact_id: ContactId,
    ) -> RepoResult<Vec<ApplicationListing>> {
        let mut stmt = self.conn.prepare(&format!(
            "{APPLICATION_SELECT_SQL} WHERE a.contact_id = ?1 ORDER BY a.id ASC;"
        ))?;
        let mut rows = stmt.query([contact_id])?;
        let mut applications = Vec::new();
        while let Some(row) = rows.next()? {
            applications.push(parse_application_row(row)?);
        }
        Ok(applications)
    }

    fn update_application_status(&self, id: ApplicationId, status: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE job_applications SET status = ?2 WHERE id = ?1;",
            params![id, status],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Application,
                id,
            });
        }

        Ok(())
    }

    fn delete_application(&self, id: ApplicationId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM job_applications WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Application,
                id,
            });
        }

        Ok(())
    }
}

/// Inserts one application on `conn`, which may be an open transaction.
pub(crate) fn insert_application(
    conn: &Connection,
    application: &JobApplication,
) -> RepoResult<ApplicationId> {
    application.validate()?;

    conn.execute(
        "INSERT INTO job_applications (
            company_id,
            contact_id,
            title,
            description,
            applied_date,
            link,
            status
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            application.company_id,
            application.contact_id,
            application.title.as_str(),
            application.description.as_deref(),
            application.applied_date.as_ref().map(AppliedDate::as_str),
            application.link.as_deref(),
            application.status.as_deref(),
        ],
    )
    .map_err(|err| map_write_error(err, EntityKind::Application, None))?;

    Ok(conn.last_insert_rowid())
}

fn parse_application_row(row: &Row<'_>) -> RepoResult<ApplicationListing> {
    let applied_date = match row.get::<_, Option<String>>("applied_date")? {
        Some(value) => Some(AppliedDate::parse(&value).map_err(|err| {
            RepoError::InvalidData(format!("job_applications.applied_date: {err}"))
        })?),
        None => None,
    };

    let application = JobApplication {
        id: Some(row.get("id")?),
        company_id: row.get("company_id")?,
        contact_id: row.get("contact_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        applied_date,
        link: row.get("link")?,
        status: row.get("status")?,
    };
    application
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("job_applications row: {err}")))?;

    Ok(ApplicationListing {
        application,
        company_name: row.get("company_name")?,
        contact_name: row.get("contact_name")?,
    })
}
