//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `contacts` table.
//! - Insert a contact and its first application atomically.
//!
//! # Invariants
//! - `email` uniqueness violations surface as `RepoError::DuplicateEmail`.
//! - A failed application insert leaves no contact row behind.

use crate::model::application::{ApplicationId, JobApplication};
use crate::model::company::CompanyId;
use crate::model::contact::{Contact, ContactId};
use crate::repo::application_repo::insert_application;
use crate::repo::{
    count_to_u64, ensure_connection_ready, map_write_error, EntityKind, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    company_id,
    name,
    email
FROM contacts";

/// Repository interface for contact records.
pub trait ContactRepository {
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    /// Inserts `contact` and, when given, one application routed through it.
    ///
    /// The application's `contact_id` is replaced by the new contact id.
    fn create_contact_with_application(
        &self,
        contact: &Contact,
        application: Option<&JobApplication>,
    ) -> RepoResult<(ContactId, Option<ApplicationId>)>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn find_contact_by_email(&self, email: &str) -> RepoResult<Option<Contact>>;
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn list_contacts_for_company(&self, company_id: CompanyId) -> RepoResult<Vec<Contact>>;
    fn count_applications(&self, id: ContactId) -> RepoResult<u64>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    /// Deletes the contact and its applications; returns how many
    /// applications were removed.
    fn delete_contact_cascade(&self, id: ContactId) -> RepoResult<u64>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        insert_contact(self.conn, contact)
    }

    fn create_contact_with_application(
        &self,
        contact: &Contact,
        application: Option<&JobApplication>,
    ) -> RepoResult<(ContactId, Option<ApplicationId>)> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let contact_id = insert_contact(&tx, contact)?;

        let application_id = match application {
            Some(application) => {
                let mut linked = application.clone();
                linked.contact_id = contact_id;
                Some(insert_application(&tx, &linked)?)
            }
            None => None,
        };

        tx.commit()?;
        Ok((contact_id, application_id))
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn find_contact_by_email(&self, email: &str) -> RepoResult<Option<Contact>> {
        let id: Option<ContactId> = self
            .conn
            .query_row(
                "SELECT id FROM contacts WHERE email = ?1;",
                [email.trim()],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => self.get_contact(id),
            None => Ok(None),
        }
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn list_contacts_for_company(&self, company_id: CompanyId) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} WHERE company_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([company_id])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn count_applications(&self, id: ContactId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM job_applications WHERE contact_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        count_to_u64(count)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])
            .map_err(|err| map_write_error(err, EntityKind::Contact, None))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Contact,
                id,
            });
        }

        Ok(())
    }

    fn delete_contact_cascade(&self, id: ContactId) -> RepoResult<u64> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM job_applications WHERE contact_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Contact,
                id,
            });
        }

        tx.commit()?;
        Ok(removed as u64)
    }
}

fn insert_contact(conn: &Connection, contact: &Contact) -> RepoResult<ContactId> {
    contact.validate()?;

    conn.execute(
        "INSERT INTO contacts (company_id, name, email) VALUES (?1, ?2, ?3);",
        params![
            contact.company_id,
            contact.name.as_str(),
            contact.email.as_str()
        ],
    )
    .map_err(|err| map_write_error(err, EntityKind::Contact, Some(contact.email.as_str())))?;

    Ok(conn.last_insert_rowid())
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let contact = Contact {
        id: Some(row.get("id")?),
        company_id: row.get("company_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
    };
    contact
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("contacts row: {err}")))?;
    Ok(contact)
}
