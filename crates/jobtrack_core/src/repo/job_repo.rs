//! Job repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Every stored job references an existing company.
//! - `applied_date` read back from storage must still parse; rows that do
//!   not are reported as `RepoError::InvalidData`.

use crate::model::company::CompanyId;
use crate::model::job::{Job, JobId};
use crate::model::validation::AppliedDate;
use crate::repo::{ensure_connection_ready, map_write_error, EntityKind, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use serde::Serialize;

const JOB_SELECT_SQL: &str = "SELECT
    j.id,
    j.company_id,
    j.title,
    j.description,
    j.applied_date,
    j.link,
    j.status,
    c.name AS company_name
FROM jobs j
JOIN companies c ON c.id = j.company_id";

/// Job read model joined with its company name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub company_name: String,
}

/// Repository interface for job records.
pub trait JobRepository {
    fn create_job(&self, job: &Job) -> RepoResult<JobId>;
    fn get_job(&self, id: JobId) -> RepoResult<Option<JobListing>>;
    fn list_jobs(&self) -> RepoResult<Vec<JobListing>>;
    fn list_jobs_for_company(&self, company_id: CompanyId) -> RepoResult<Vec<JobListing>>;
    fn update_job_status(&self, id: JobId, status: &str) -> RepoResult<()>;
    fn delete_job(&self, id: JobId) -> RepoResult<()>;
}

/// SQLite-backed job repository.
pub struct SqliteJobRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJobRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_jobs(&self, sql: &str, company_id: Option<CompanyId>) -> RepoResult<Vec<JobListing>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match company_id {
            Some(company_id) => stmt.query([company_id])?,
            None => stmt.query([])?,
        };
        let mut jobs = Vec::new();
        while let Some(row) = rows.next()? {
            jobs.push(parse_job_row(row)?);
        }
        Ok(jobs)
    }
}

impl JobRepository for SqliteJobRepository<'_> {
    fn create_job(&self, job: &Job) -> RepoResult<JobId> {
        job.validate()?;

        self.conn
            .execute(
                "INSERT INTO jobs (
                    company_id,
                    title,
                    description,
                    applied_date,
                    link,
                    status
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    job.company_id,
                    job.title.as_str(),
                    job.description.as_deref(),
                    job.applied_date.as_str(),
                    job.link.as_deref(),
                    job.status.as_deref(),
                ],
            )
            .map_err(|err| map_write_error(err, EntityKind::Job, None))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_job(&self, id: JobId) -> RepoResult<Option<JobListing>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{JOB_SELECT_SQL} WHERE j.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_job_row(row)?));
        }

        Ok(None)
    }

    fn list_jobs(&self) -> RepoResult<Vec<JobListing>> {
        self.query_jobs(&format!("{JOB_SELECT_SQL} ORDER BY j.id ASC;"), None)
    }

    fn list_jobs_for_company(&self, company_id: CompanyId) -> RepoResult<Vec<JobListing>> {
        self.query_jobs(
            &format!("{JOB_SELECT_SQL} WHERE j.company_id = ?1 ORDER BY j.id ASC;"),
            Some(company_id),
        )
    }

    fn update_job_status(&self, id: JobId, status: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE jobs SET status = ?2 WHERE id = ?1;",
            params![id, status],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Job,
                id,
            });
        }

        Ok(())
    }

    fn delete_job(&self, id: JobId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM jobs WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Job,
                id,
            });
        }

        Ok(())
    }
}

fn parse_job_row(row: &Row<'_>) -> RepoResult<JobListing> {
    let applied_text: String = row.get("applied_date")?;
    let applied_date = AppliedDate::parse(&applied_text)
        .map_err(|err| RepoError::InvalidData(format!("jobs.applied_date: {err}")))?;

    let job = Job {
        id: Some(row.get("id")?),
        company_id: row.get("company_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        applied_date,
        link: row.get("link")?,
        status: row.get("status")?,
    };
    job.validate()
        .map_err(|err| RepoError::InvalidData(format!("jobs row: {err}")))?;

    Ok(JobListing {
        job,
        company_name: row.get("company_name")?,
    })
}
