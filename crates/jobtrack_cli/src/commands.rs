//! Command dispatch and result rendering.
//!
//! # Responsibility
//! - Build services over repositories borrowing one open connection.
//! - Render successful results as text lines or JSON on `out`.
//!
//! # Invariants
//! - Errors are returned to the caller, never printed here.
//! - Nothing is written to `out` for a failed command.

use chrono::Local;
use jobtrack_core::{
    ApplicationListing, ApplicationService, AppliedDate, CompanyService, Contact, ContactService,
    DeletePolicy, JobListing, JobService, NewContact, NewJob, SqliteApplicationRepository,
    SqliteCompanyRepository, SqliteContactRepository, SqliteJobRepository,
};
use log::debug;
use rusqlite::Connection;
use serde::Serialize;
use std::io::Write;

use crate::args::{Cli, Commands, CompanyCommands, ContactCommands, JobCommands};
use crate::error::CliResult;

type SqliteContactService<'conn> = ContactService<
    SqliteContactRepository<'conn>,
    SqliteCompanyRepository<'conn>,
    SqliteApplicationRepository<'conn>,
>;
type SqliteJobService<'conn> =
    JobService<SqliteJobRepository<'conn>, SqliteCompanyRepository<'conn>>;

/// Runs one parsed command against `conn`, writing its output to `out`.
pub fn execute_command(cli: &Cli, conn: &Connection, out: &mut dyn Write) -> CliResult<()> {
    debug!(
        "event=command_dispatch module=cli status=start command={:?}",
        cli.command
    );
    let json = cli.json;

    match &cli.command {
        Commands::Company { command } => run_company(command, conn, json, out),
        Commands::Contact { command } => run_contact(command, conn, json, out),
        Commands::Job { command } => run_job(command, conn, json, out),
    }
}

fn run_company(
    command: &CompanyCommands,
    conn: &Connection,
    json: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let service = CompanyService::new(SqliteCompanyRepository::try_new(conn)?);

    match command {
        CompanyCommands::Create {
            name,
            website,
            contact_info,
        } => {
            let company = service.create(name, website.clone(), contact_info.clone())?;
            if json {
                return write_json(out, &company);
            }
            writeln!(
                out,
                "Company '{}' created successfully! (id {})",
                company.name,
                display_id(company.id)
            )?;
        }
        CompanyCommands::List => {
            let companies = service.list()?;
            if json {
                return write_json(out, &companies);
            }
            if companies.is_empty() {
                writeln!(out, "No companies found.")?;
            }
            for company in &companies {
                writeln!(out, "{company}")?;
            }
        }
        CompanyCommands::Delete { id, cascade } => {
            let removed = service.delete(*id, delete_policy(*cascade))?;
            if json {
                return write_json(out, &removed);
            }
            if removed.is_empty() {
                writeln!(out, "Company {id} deleted.")?;
            } else {
                writeln!(out, "Company {id} deleted along with {removed}.")?;
            }
        }
        CompanyCommands::Find { id } => {
            let company = service.find(*id)?;
            write_record(out, json, &company)?;
        }
        CompanyCommands::Jobs { id } => {
            let jobs = job_service(conn)?.list_for_company(*id)?;
            write_jobs(out, json, &jobs)?;
        }
        CompanyCommands::Contacts { id } => {
            let contacts = contact_service(conn)?.list_for_company(*id)?;
            write_contacts(out, json, &contacts)?;
        }
    }

    Ok(())
}

fn run_contact(
    command: &ContactCommands,
    conn: &Connection,
    json: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let service = contact_service(conn)?;

    match command {
        ContactCommands::Add {
            company_name,
            name,
            email,
            job_title,
            job_description,
            applied_date,
            link,
        } => {
            let created = service.add(&NewContact {
                company_name: company_name.clone(),
                name: name.clone(),
                email: email.clone(),
                job_title: job_title.clone(),
                job_description: job_description.clone(),
                applied_date: applied_date.clone(),
                link: link.clone(),
            })?;
            if json {
                let record = serde_json::json!({
                    "contact": created.contact,
                    "application": created.application,
                });
                return write_json(out, &record);
            }
            writeln!(
                out,
                "Contact '{}' added to '{}'! (id {})",
                created.contact.name,
                company_name.trim(),
                display_id(created.contact.id)
            )?;
            if let Some(listing) = &created.application {
                writeln!(
                    out,
                    "Job application '{}' recorded (id {}).",
                    listing.application.title,
                    display_id(listing.application.id)
                )?;
            }
        }
        ContactCommands::List => {
            let contacts = service.list()?;
            write_contacts(out, json, &contacts)?;
        }
        ContactCommands::Find { id } => {
            let contact = service.find(*id)?;
            write_record(out, json, &contact)?;
        }
        ContactCommands::Delete { id, cascade } => {
            let removed = service.delete(*id, delete_policy(*cascade))?;
            if json {
                let record = serde_json::json!({ "removed_applications": removed });
                return write_json(out, &record);
            }
            if removed == 0 {
                writeln!(out, "Contact {id} deleted.")?;
            } else {
                writeln!(
                    out,
                    "Contact {id} deleted along with {removed} application(s)."
                )?;
            }
        }
        ContactCommands::Applications { id } => {
            let applications = service.applications(*id)?;
            write_applications(out, json, &applications)?;
        }
    }

    Ok(())
}

fn run_job(
    command: &JobCommands,
    conn: &Connection,
    json: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    match command {
        JobCommands::Create {
            company_name,
            title,
            description,
            applied_date,
            link,
        } => {
            let applied_date = applied_date
                .clone()
                .unwrap_or_else(|| today().as_str().to_string());
            let listing = job_service(conn)?.create(&NewJob {
                company_name: company_name.clone(),
                title: title.clone(),
                description: description.clone(),
                applied_date,
                link: link.clone(),
            })?;
            if json {
                return write_json(out, &listing);
            }
            writeln!(
                out,
                "Job '{}' at '{}' created successfully! (id {})",
                listing.job.title,
                listing.company_name,
                display_id(listing.job.id)
            )?;
        }
        JobCommands::Delete { id, application } => {
            if *application {
                application_service(conn)?.delete(*id)?;
                if json {
                    let record = serde_json::json!({ "deleted_application": id });
                    return write_json(out, &record);
                }
                writeln!(out, "Job application {id} deleted.")?;
            } else {
                job_service(conn)?.delete(*id)?;
                if json {
                    let record = serde_json::json!({ "deleted_job": id });
                    return write_json(out, &record);
                }
                writeln!(out, "Job {id} deleted.")?;
            }
        }
        JobCommands::Find { id, application } => {
            if *application {
                let listing = application_service(conn)?.find(*id)?;
                write_applications(out, json, std::slice::from_ref(&listing))?;
            } else {
                let listing = job_service(conn)?.find(*id)?;
                write_jobs(out, json, std::slice::from_ref(&listing))?;
            }
        }
        JobCommands::List => {
            let jobs = job_service(conn)?.list()?;
            write_jobs(out, json, &jobs)?;
        }
        JobCommands::UpdateStatus {
            id,
            status,
            application,
        } => {
            if *application {
                let listing = application_service(conn)?.update_status(*id, status)?;
                if json {
                    return write_json(out, &listing);
                }
                let status = listing.application.status.unwrap_or_default();
                writeln!(out, "Job application {id} status updated to '{status}'.")?;
            } else {
                let listing = job_service(conn)?.update_status(*id, status)?;
                if json {
                    return write_json(out, &listing);
                }
                let status = listing.job.status.unwrap_or_default();
                writeln!(out, "Job {id} status updated to '{status}'.")?;
            }
        }
        JobCommands::Applications => {
            let applications = application_service(conn)?.list()?;
            write_applications(out, json, &applications)?;
        }
    }

    Ok(())
}

fn job_service(conn: &Connection) -> CliResult<SqliteJobService<'_>> {
    let jobs = SqliteJobRepository::try_new(conn)?;
    let companies = SqliteCompanyRepository::try_new(conn)?;
    Ok(JobService::new(jobs, companies))
}

fn contact_service(conn: &Connection) -> CliResult<SqliteContactService<'_>> {
    let contacts = SqliteContactRepository::try_new(conn)?;
    let companies = SqliteCompanyRepository::try_new(conn)?;
    let applications = SqliteApplicationRepository::try_new(conn)?;
    Ok(ContactService::new(contacts, companies, applications))
}

fn application_service(
    conn: &Connection,
) -> CliResult<ApplicationService<SqliteApplicationRepository<'_>>> {
    let applications = SqliteApplicationRepository::try_new(conn)?;
    Ok(ApplicationService::new(applications))
}

fn delete_policy(cascade: bool) -> DeletePolicy {
    if cascade {
        DeletePolicy::Cascade
    } else {
        DeletePolicy::Restrict
    }
}

fn today() -> AppliedDate {
    AppliedDate::from_date(Local::now().date_naive())
}

fn display_id(id: Option<i64>) -> String {
    id.map_or_else(|| "?".to_string(), |id| id.to_string())
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_record<T>(out: &mut dyn Write, json: bool, record: &T) -> CliResult<()>
where
    T: Serialize + std::fmt::Display,
{
    if json {
        return write_json(out, record);
    }
    writeln!(out, "{record}")?;
    Ok(())
}

fn write_contacts(out: &mut dyn Write, json: bool, contacts: &[Contact]) -> CliResult<()> {
    if json {
        return write_json(out, contacts);
    }
    if contacts.is_empty() {
        writeln!(out, "No contacts found.")?;
    }
    for contact in contacts {
        writeln!(out, "{contact}")?;
    }
    Ok(())
}

fn write_jobs(out: &mut dyn Write, json: bool, jobs: &[JobListing]) -> CliResult<()> {
    if json {
        return write_json(out, jobs);
    }
    if jobs.is_empty() {
        writeln!(out, "No jobs found.")?;
    }
    for listing in jobs {
        writeln!(out, "{}: {}", listing.company_name, listing.job)?;
    }
    Ok(())
}

fn write_applications(
    out: &mut dyn Write,
    json: bool,
    applications: &[ApplicationListing],
) -> CliResult<()> {
    if json {
        return write_json(out, applications);
    }
    if applications.is_empty() {
        writeln!(out, "No applications found.")?;
    }
    for listing in applications {
        writeln!(
            out,
            "{} via {}: {}",
            listing.company_name, listing.contact_name, listing.application
        )?;
    }
    Ok(())
}
