use clap::Parser;
use jobtrack_cli::{execute_command, exitcode, Cli, CliError};
use jobtrack_core::db::{open_db, open_db_in_memory};
use rusqlite::Connection;

fn run(conn: &Connection, args: &[&str]) -> Result<String, CliError> {
    let mut argv = vec!["jobtrack"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    let mut out = Vec::new();
    execute_command(&cli, conn, &mut out)?;
    Ok(String::from_utf8(out).expect("output should be UTF-8"))
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table};");
    conn.query_row(&sql, [], |row| row.get(0)).unwrap()
}

fn create_company(conn: &Connection, name: &str) {
    run(conn, &["company", "create", name]).unwrap();
}

fn create_job(conn: &Connection, company: &str, title: &str) {
    let args = [
        "job",
        "create",
        company,
        title,
        "--applied_date",
        "2024-01-15",
    ];
    run(conn, &args).unwrap();
}

fn add_contact(conn: &Connection, company: &str, name: &str, email: &str) {
    run(conn, &["contact", "add", company, name, email]).unwrap();
}

#[test]
fn company_create_prints_confirmation() {
    let conn = open_db_in_memory().unwrap();
    let output = run(
        &conn,
        &[
            "company",
            "create",
            "Acme",
            "--website",
            "https://acme.test",
            "--contact_info",
            "hr@acme.test",
        ],
    )
    .unwrap();
    assert_eq!(output, "Company 'Acme' created successfully! (id 1)\n");

    let found = run(&conn, &["company", "find", "1"]).unwrap();
    assert_eq!(
        found,
        "#1 Acme website=https://acme.test contact_info=hr@acme.test\n"
    );
}

#[test]
fn company_list_reports_empty_state() {
    let conn = open_db_in_memory().unwrap();
    let output = run(&conn, &["company", "list"]).unwrap();
    assert_eq!(output, "No companies found.\n");
}

#[test]
fn job_list_shows_single_created_job() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    create_job(&conn, "Acme", "Backend Engineer");

    let output = run(&conn, &["job", "list"]).unwrap();
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Acme"));
    assert!(lines[0].contains("Backend Engineer"));
    assert!(lines[0].contains("applied=2024-01-15"));
}

#[test]
fn job_create_for_unknown_company_fails_without_writing() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");

    let args = [
        "job",
        "create",
        "Unknown Co",
        "X",
        "--applied_date",
        "2024-01-01",
    ];
    let err = run(&conn, &args).unwrap_err();
    assert_eq!(err.to_string(), "company 'Unknown Co' not found");
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
    assert_eq!(row_count(&conn, "jobs"), 0);
    assert_eq!(row_count(&conn, "companies"), 1);
}

#[test]
fn job_create_without_date_uses_today() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    run(&conn, &["job", "create", "Acme", "Backend Engineer"]).unwrap();

    let stored: String = conn
        .query_row("SELECT applied_date FROM jobs;", [], |row| row.get(0))
        .unwrap();
    let today = chrono::Local::now().date_naive();
    assert_eq!(stored, today.format("%Y-%m-%d").to_string());
}

#[test]
fn invalid_applied_date_is_a_data_error() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");

    let args = ["job", "create", "Acme", "X", "--applied_date", "2024-1-1"];
    let err = run(&conn, &args).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(err.to_string().contains("YYYY-MM-DD"));
}

#[test]
fn company_delete_unknown_id_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = run(&conn, &["company", "delete", "42"]).unwrap_err();
    assert_eq!(err.to_string(), "company 42 not found");
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn company_delete_with_children_needs_cascade() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    create_job(&conn, "Acme", "Backend Engineer");

    let err = run(&conn, &["company", "delete", "1"]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(err.to_string().contains("--cascade"));

    let output = run(&conn, &["company", "delete", "1", "--cascade"]).unwrap();
    assert_eq!(
        output,
        "Company 1 deleted along with 1 job(s), 0 contact(s), 0 application(s).\n"
    );
    assert_eq!(run(&conn, &["job", "list"]).unwrap(), "No jobs found.\n");
}

#[test]
fn company_jobs_lists_only_that_company() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    create_company(&conn, "Globex");
    create_job(&conn, "Globex", "Analyst");

    assert_eq!(
        run(&conn, &["company", "jobs", "1"]).unwrap(),
        "No jobs found.\n"
    );
    let output = run(&conn, &["company", "jobs", "2"]).unwrap();
    assert!(output.starts_with("Globex: #1 Analyst"));
}

#[test]
fn company_contacts_lists_only_that_company() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    create_company(&conn, "Globex");
    add_contact(&conn, "Acme", "Jane", "jane@acme.test");

    let output = run(&conn, &["company", "contacts", "1"]).unwrap();
    assert_eq!(output, "#1 Jane <jane@acme.test> company=1\n");
    assert_eq!(
        run(&conn, &["company", "contacts", "2"]).unwrap(),
        "No contacts found.\n"
    );

    let err = run(&conn, &["company", "contacts", "9"]).unwrap_err();
    assert_eq!(err.to_string(), "company 9 not found");
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn contact_add_with_job_fields_records_application() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");

    let output = run(
        &conn,
        &[
            "contact",
            "add",
            "Acme",
            "Jane Doe",
            "jane@acme.test",
            "--job_title",
            "Platform Engineer",
            "--applied_date",
            "2024-03-01",
        ],
    )
    .unwrap();
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "Contact 'Jane Doe' added to 'Acme'! (id 1)",
            "Job application 'Platform Engineer' recorded (id 1).",
        ]
    );

    let applications = run(&conn, &["job", "applications"]).unwrap();
    assert!(applications.starts_with("Acme via Jane Doe: #1 Platform"));

    let args = [
        "job",
        "update_status",
        "1",
        "--status",
        "interview",
        "--application",
    ];
    let updated = run(&conn, &args).unwrap();
    assert_eq!(
        updated,
        "Job application 1 status updated to 'interview'.\n"
    );
}

#[test]
fn contact_add_with_link_but_no_title_names_the_missing_field() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");

    let args = [
        "contact",
        "add",
        "Acme",
        "Jane",
        "jane@acme.test",
        "--link",
        "https://acme.test/jobs/1",
    ];
    let err = run(&conn, &args).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert_eq!(
        err.to_string(),
        "job_title is required when other job fields are given"
    );
    assert_eq!(row_count(&conn, "contacts"), 0);
    assert_eq!(row_count(&conn, "job_applications"), 0);
}

#[test]
fn contact_add_duplicate_email_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    add_contact(&conn, "Acme", "Jane", "jane@acme.test");

    let args = ["contact", "add", "Acme", "Janet", "jane@acme.test"];
    let err = run(&conn, &args).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert_eq!(row_count(&conn, "contacts"), 1);

    let found = run(&conn, &["contact", "find", "1"]).unwrap();
    assert!(found.starts_with("#1 Jane <jane@acme.test>"));
}

#[test]
fn job_update_status_for_missing_id_fails() {
    let conn = open_db_in_memory().unwrap();
    let args = ["job", "update_status", "9", "--status", "offer"];
    let err = run(&conn, &args).unwrap_err();
    assert_eq!(err.to_string(), "job 9 not found");

    let args = [
        "job",
        "update_status",
        "9",
        "--status",
        "offer",
        "--application",
    ];
    let err = run(&conn, &args).unwrap_err();
    assert_eq!(err.to_string(), "job application 9 not found");
}

#[test]
fn job_find_and_delete_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    create_job(&conn, "Acme", "Backend Engineer");

    let found = run(&conn, &["job", "find", "1"]).unwrap();
    assert_eq!(
        found,
        "Acme: #1 Backend Engineer applied=2024-01-15 status=applied\n"
    );
    let deleted = run(&conn, &["job", "delete", "1"]).unwrap();
    assert_eq!(deleted, "Job 1 deleted.\n");
    assert!(run(&conn, &["job", "find", "1"]).is_err());
}

#[test]
fn json_flag_renders_records() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    create_job(&conn, "Acme", "Backend Engineer");

    let output = run(&conn, &["job", "list", "--json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value[0]["company_name"], "Acme");
    assert_eq!(value[0]["title"], "Backend Engineer");
    assert_eq!(value[0]["applied_date"], "2024-01-15");
}

#[test]
fn json_flag_renders_job_delete() {
    let conn = open_db_in_memory().unwrap();
    create_company(&conn, "Acme");
    create_job(&conn, "Acme", "Backend Engineer");

    let output = run(&conn, &["--json", "job", "delete", "1"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value, serde_json::json!({ "deleted_job": 1 }));
    assert_eq!(row_count(&conn, "jobs"), 0);
}

#[test]
fn file_database_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job_tracker.db");

    {
        let conn = open_db(&path).unwrap();
        create_company(&conn, "Acme");
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(run(&conn, &["company", "list"]).unwrap(), "#1 Acme\n");
}
