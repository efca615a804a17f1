//! Company repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and name lookup over the `companies` table.
//! - Report rows that still reference a company before it is removed.
//!
//! # Invariants
//! - Listing order is `id ASC`.
//! - Cascade delete removes applications, contacts and jobs in one
//!   transaction before the company row itself.

use crate::model::company::{Company, CompanyId};
use crate::repo::{
    count_to_u64, ensure_connection_ready, map_write_error, EntityKind, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use serde::Serialize;
use std::fmt::{Display, Formatter};

const COMPANY_SELECT_SQL: &str = "SELECT
    id,
    name,
    website,
    contact_info
FROM companies";

/// Counts of rows referencing one company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompanyDependents {
    pub jobs: u64,
    pub contacts: u64,
    pub applications: u64,
}

impl CompanyDependents {
    pub fn is_empty(&self) -> bool {
        self.jobs == 0 && self.contacts == 0 && self.applications == 0
    }
}

impl Display for CompanyDependents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} job(s), {} contact(s), {} application(s)",
            self.jobs, self.contacts, self.applications
        )
    }
}

/// Repository interface for company records.
pub trait CompanyRepository {
    fn create_company(&self, company: &Company) -> RepoResult<CompanyId>;
    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>>;
    fn list_companies(&self) -> RepoResult<Vec<Company>>;
    /// Exact, case-sensitive name match ordered by id.
    fn find_companies_by_name(&self, name: &str) -> RepoResult<Vec<Company>>;
    fn count_dependents(&self, id: CompanyId) -> RepoResult<CompanyDependents>;
    fn delete_company(&self, id: CompanyId) -> RepoResult<()>;
    /// Deletes the company and every row referencing it.
    ///
    /// Returns what was removed alongside the company.
    fn delete_company_cascade(&self, id: CompanyId) -> RepoResult<CompanyDependents>;
}

/// SQLite-backed company repository.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn create_company(&self, company: &Company) -> RepoResult<CompanyId> {
        company.validate()?;

        self.conn
            .execute(
                "INSERT INTO companies (name, website, contact_info) VALUES (?1, ?2, ?3);",
                params![
                    company.name.as_str(),
                    company.website.as_deref(),
                    company.contact_info.as_deref(),
                ],
            )
            .map_err(|err| map_write_error(err, EntityKind::Company, None))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPANY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_company_row(row)?));
        }

        Ok(None)
    }

    fn list_companies(&self) -> RepoResult<Vec<Company>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPANY_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row)?);
        }
        Ok(companies)
    }

    fn find_companies_by_name(&self, name: &str) -> RepoResult<Vec<Company>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMPANY_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([name.trim()])?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row)?);
        }
        Ok(companies)
    }

    fn count_dependents(&self, id: CompanyId) -> RepoResult<CompanyDependents> {
        count_company_dependents(self.conn, id)
    }

    fn delete_company(&self, id: CompanyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM companies WHERE id = ?1;", [id])
            .map_err(|err| map_write_error(err, EntityKind::Company, None))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Company,
                id,
            });
        }

        Ok(())
    }

    fn delete_company_cascade(&self, id: CompanyId) -> RepoResult<CompanyDependents> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let removed = count_company_dependents(&tx, id)?;

        tx.execute("DELETE FROM job_applications WHERE company_id = ?1;", [id])?;
        tx.execute("DELETE FROM contacts WHERE company_id = ?1;", [id])?;
        tx.execute("DELETE FROM jobs WHERE company_id = ?1;", [id])?;
        let changed = tx
            .execute("DELETE FROM companies WHERE id = ?1;", [id])
            .map_err(|err| map_write_error(err, EntityKind::Company, None))?;

        if changed == 0 {
            // Dropping `tx` rolls back; nothing was there to remove anyway.
            return Err(RepoError::NotFound {
                entity: EntityKind::Company,
                id,
            });
        }

        tx.commit()?;
        Ok(removed)
    }
}

fn count_company_dependents(conn: &Connection, id: CompanyId) -> RepoResult<CompanyDependents> {
    let (jobs, contacts, applications): (i64, i64, i64) = conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM jobs WHERE company_id = ?1),
            (SELECT COUNT(*) FROM contacts WHERE company_id = ?1),
            (SELECT COUNT(*) FROM job_applications WHERE company_id = ?1);",
        [id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    Ok(CompanyDependents {
        jobs: count_to_u64(jobs)?,
        contacts: count_to_u64(contacts)?,
        applications: count_to_u64(applications)?,
    })
}

fn parse_company_row(row: &Row<'_>) -> RepoResult<Company> {
    let company = Company {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        website: row.get("website")?,
        contact_info: row.get("contact_info")?,
    };
    company
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("companies row: {err}")))?;
    Ok(company)
}
