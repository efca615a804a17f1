use jobtrack_core::db::open_db_in_memory;
use jobtrack_core::{
    ApplicationService, CompanyService, ContactService, DeletePolicy, EntityKind, JobService,
    NewContact, NewJob, ServiceError, SqliteApplicationRepository, SqliteCompanyRepository,
    SqliteContactRepository, SqliteJobRepository, ValidationError,
};
use rusqlite::Connection;

fn company_service(conn: &Connection) -> CompanyService<SqliteCompanyRepository<'_>> {
    CompanyService::new(SqliteCompanyRepository::try_new(conn).unwrap())
}

fn job_service(
    conn: &Connection,
) -> JobService<SqliteJobRepository<'_>, SqliteCompanyRepository<'_>> {
    JobService::new(
        SqliteJobRepository::try_new(conn).unwrap(),
        SqliteCompanyRepository::try_new(conn).unwrap(),
    )
}

fn contact_service(
    conn: &Connection,
) -> ContactService<
    SqliteContactRepository<'_>,
    SqliteCompanyRepository<'_>,
    SqliteApplicationRepository<'_>,
> {
    ContactService::new(
        SqliteContactRepository::try_new(conn).unwrap(),
        SqliteCompanyRepository::try_new(conn).unwrap(),
        SqliteApplicationRepository::try_new(conn).unwrap(),
    )
}

fn new_job(company_name: &str, title: &str, applied_date: &str) -> NewJob {
    NewJob {
        company_name: company_name.to_string(),
        title: title.to_string(),
        description: None,
        applied_date: applied_date.to_string(),
        link: None,
    }
}

fn new_contact(company_name: &str, name: &str, email: &str) -> NewContact {
    NewContact {
        company_name: company_name.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        ..NewContact::default()
    }
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table};");
    conn.query_row(&sql, [], |row| row.get(0)).unwrap()
}

#[test]
fn create_company_then_job_lists_exactly_one_entry() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();

    let jobs = job_service(&conn);
    let request = new_job("Acme", "Backend Engineer", "2024-01-15");
    jobs.create(&request).unwrap();

    let listed = jobs.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].company_name, "Acme");
    assert_eq!(listed[0].job.title, "Backend Engineer");
    assert_eq!(listed[0].job.applied_date.as_str(), "2024-01-15");
}

#[test]
fn job_for_unknown_company_is_never_inserted() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();

    let err = job_service(&conn)
        .create(&new_job("Unknown Co", "X", "2024-01-01"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::CompanyNotFound(ref name) if name == "Unknown Co"
    ));
    assert_eq!(row_count(&conn, "jobs"), 0);
    assert_eq!(row_count(&conn, "companies"), 1);
}

#[test]
fn job_with_invalid_date_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();

    let err = job_service(&conn)
        .create(&new_job("Acme", "Backend Engineer", "2024-13-01"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidAppliedDate(_))
    ));
    assert_eq!(row_count(&conn, "jobs"), 0);
}

#[test]
fn create_company_without_name_fails() {
    let conn = open_db_in_memory().unwrap();
    let service = company_service(&conn);
    let err = service.create("  ", None, None).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EmptyField("name"))
    ));
    assert_eq!(row_count(&conn, "companies"), 0);
}

#[test]
fn delete_never_issued_company_id_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = company_service(&conn);
    service.create("Acme", None, None).unwrap();

    let err = service.delete(999, DeletePolicy::Restrict).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Company,
            id: 999
        }
    ));
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn delete_company_with_jobs_requires_cascade() {
    let conn = open_db_in_memory().unwrap();
    let company = company_service(&conn).create("Acme", None, None).unwrap();
    let company_id = company.id.unwrap();
    job_service(&conn)
        .create(&new_job("Acme", "Backend Engineer", "2024-01-15"))
        .unwrap();

    let err = company_service(&conn)
        .delete(company_id, DeletePolicy::Restrict)
        .unwrap_err();
    assert!(matches!(err, ServiceError::HasDependents { .. }));
    assert_eq!(row_count(&conn, "jobs"), 1);

    let removed = company_service(&conn)
        .delete(company_id, DeletePolicy::Cascade)
        .unwrap();
    assert_eq!(removed.jobs, 1);
    assert_eq!(row_count(&conn, "jobs"), 0);
    assert_eq!(row_count(&conn, "companies"), 0);
}

#[test]
fn company_jobs_for_unknown_company_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = job_service(&conn).list_for_company(5).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Company,
            id: 5
        }
    ));
}

#[test]
fn company_contacts_lists_only_that_company() {
    let conn = open_db_in_memory().unwrap();
    let companies = company_service(&conn);
    let acme = companies.create("Acme", None, None).unwrap();
    let globex = companies.create("Globex", None, None).unwrap();
    let contacts = contact_service(&conn);
    let jane = contacts
        .add(&new_contact("Acme", "Jane", "jane@example.test"))
        .unwrap();
    contacts
        .add(&new_contact("Globex", "Gus", "gus@example.test"))
        .unwrap();

    let listed = contacts.list_for_company(acme.id.unwrap()).unwrap();
    assert_eq!(listed, vec![jane.contact]);
    let listed = contacts.list_for_company(globex.id.unwrap()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Gus");
}

#[test]
fn company_contacts_for_unknown_company_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = contact_service(&conn).list_for_company(8).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Company,
            id: 8
        }
    ));
}

#[test]
fn duplicate_email_fails_and_keeps_original_contact() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();
    company_service(&conn).create("Globex", None, None).unwrap();
    let contacts = contact_service(&conn);

    let original = contacts
        .add(&new_contact("Acme", "Jane", "jane@example.test"))
        .unwrap();
    let err = contacts
        .add(&new_contact("Globex", "Janet", "jane@example.test"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateEmail(_)));

    let listed = contacts.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], original.contact);
}

#[test]
fn contact_add_requires_existing_company() {
    let conn = open_db_in_memory().unwrap();
    let err = contact_service(&conn)
        .add(&new_contact("Nobody Inc", "Jane", "jane@example.test"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::CompanyNotFound(_)));
    assert_eq!(row_count(&conn, "contacts"), 0);
}

#[test]
fn contact_add_with_job_fields_creates_linked_application() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();

    let request = NewContact {
        job_title: Some("Platform Engineer".to_string()),
        applied_date: Some("2024-02-01".to_string()),
        link: Some("https://acme.test/jobs/7".to_string()),
        ..new_contact("Acme", "Jane", "jane@example.test")
    };
    let created = contact_service(&conn).add(&request).unwrap();

    let listing = created.application.expect("application should be created");
    assert_eq!(listing.application.contact_id, created.contact.id.unwrap());
    assert_eq!(listing.application.title, "Platform Engineer");
    assert_eq!(listing.contact_name, "Jane");
    assert_eq!(row_count(&conn, "job_applications"), 1);
}

#[test]
fn contact_add_without_job_title_creates_nothing() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();

    let request = NewContact {
        applied_date: Some("2024-02-01".to_string()),
        ..new_contact("Acme", "Jane", "jane@example.test")
    };
    let err = contact_service(&conn).add(&request).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingJobTitle)
    ));
    assert!(err.to_string().contains("job_title is required"));
    assert_eq!(row_count(&conn, "contacts"), 0);
    assert_eq!(row_count(&conn, "job_applications"), 0);
}

#[test]
fn contact_add_with_blank_job_title_names_the_missing_field() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();

    let request = NewContact {
        job_title: Some("   ".to_string()),
        link: Some("https://acme.test/jobs/7".to_string()),
        ..new_contact("Acme", "Jane", "jane@example.test")
    };
    let err = contact_service(&conn).add(&request).unwrap_err();
    assert_eq!(
        err.to_string(),
        "job_title is required when other job fields are given"
    );
    assert_eq!(row_count(&conn, "contacts"), 0);
}

#[test]
fn contact_add_with_bad_applied_date_creates_nothing() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();

    let request = NewContact {
        job_title: Some("Platform Engineer".to_string()),
        applied_date: Some("01/02/2024".to_string()),
        ..new_contact("Acme", "Jane", "jane@example.test")
    };
    let err = contact_service(&conn).add(&request).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidAppliedDate(_))
    ));
    assert_eq!(row_count(&conn, "contacts"), 0);
}

#[test]
fn contact_delete_policy_controls_applications() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();
    let request = NewContact {
        job_title: Some("Platform Engineer".to_string()),
        ..new_contact("Acme", "Jane", "jane@example.test")
    };
    let contacts = contact_service(&conn);
    let created = contacts.add(&request).unwrap();
    let contact_id = created.contact.id.unwrap();

    assert_eq!(contacts.applications(contact_id).unwrap().len(), 1);
    assert!(matches!(
        contacts.delete(contact_id, DeletePolicy::Restrict).unwrap_err(),
        ServiceError::HasDependents {
            entity: EntityKind::Contact,
            ..
        }
    ));
    let removed = contacts.delete(contact_id, DeletePolicy::Cascade).unwrap();
    assert_eq!(removed, 1);
    assert!(matches!(
        contacts.find(contact_id).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[test]
fn job_status_update_is_free_text_but_not_blank() {
    let conn = open_db_in_memory().unwrap();
    company_service(&conn).create("Acme", None, None).unwrap();
    let jobs = job_service(&conn);
    let created = jobs
        .create(&new_job("Acme", "Backend Engineer", "2024-01-15"))
        .unwrap();
    let job_id = created.job.id.unwrap();

    let updated = jobs.update_status(job_id, "  second interview ").unwrap();
    assert_eq!(updated.job.status.as_deref(), Some("second interview"));

    assert!(matches!(
        jobs.update_status(job_id, " ").unwrap_err(),
        ServiceError::Validation(ValidationError::EmptyField("status"))
    ));
    assert!(matches!(
        jobs.update_status(job_id + 10, "offer").unwrap_err(),
        ServiceError::NotFound {
            entity: EntityKind::Job,
            ..
        }
    ));
}

#[test]
fn application_status_update_fails_for_unknown_id() {
    let conn = open_db_in_memory().unwrap();
    let service = ApplicationService::new(SqliteApplicationRepository::try_new(&conn).unwrap());

    let err = service.update_status(3, "offer").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Application,
            id: 3
        }
    ));
}

#[test]
fn find_by_name_prefers_lowest_id() {
    let conn = open_db_in_memory().unwrap();
    let service = company_service(&conn);
    let first = service
        .create("Acme", Some("https://one.test".to_string()), None)
        .unwrap();
    service
        .create("Acme", Some("https://two.test".to_string()), None)
        .unwrap();

    assert_eq!(service.find_by_name("Acme").unwrap(), first);
}
