//! CLI argument definitions using clap.
//!
//! Flag spellings keep the underscore form (`--contact_info`,
//! `--applied_date`, ...) used by existing tracker scripts.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Job application tracker: companies, contacts, jobs and applications
#[derive(Parser, Debug)]
#[command(name = "jobtrack")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database file
    #[arg(
        long,
        global = true,
        env = "JOBTRACK_DB",
        default_value = "job_tracker.db",
        value_hint = ValueHint::FilePath
    )]
    pub db: PathBuf,

    /// Write rotating log files to this absolute directory
    #[arg(long, global = true, env = "JOBTRACK_LOG_DIR", value_hint = ValueHint::DirPath)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "JOBTRACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage companies
    Company {
        #[command(subcommand)]
        command: CompanyCommands,
    },

    /// Manage contacts and the applications routed through them
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },

    /// Manage job postings and application status
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// Create a company
    Create {
        name: String,
        #[arg(long)]
        website: Option<String>,
        #[arg(long = "contact_info")]
        contact_info: Option<String>,
    },
    /// List all companies
    List,
    /// Delete a company
    Delete {
        id: i64,
        /// Also delete its jobs, contacts and applications
        #[arg(long)]
        cascade: bool,
    },
    /// Show one company
    Find { id: i64 },
    /// List jobs of one company
    Jobs { id: i64 },
    /// List contacts of one company
    Contacts { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// Add a contact to an existing company, optionally with an application
    Add {
        company_name: String,
        name: String,
        email: String,
        #[arg(long = "job_title")]
        job_title: Option<String>,
        #[arg(long = "job_description")]
        job_description: Option<String>,
        /// YYYY-MM-DD
        #[arg(long = "applied_date")]
        applied_date: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },
    /// List all contacts
    List,
    /// Show one contact
    Find { id: i64 },
    /// Delete a contact
    Delete {
        id: i64,
        /// Also delete applications routed through it
        #[arg(long)]
        cascade: bool,
    },
    /// List applications routed through one contact
    Applications { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// Create a job under an existing company
    Create {
        company_name: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// YYYY-MM-DD (default: today)
        #[arg(long = "applied_date")]
        applied_date: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Delete a job (or application with --application)
    Delete {
        id: i64,
        #[arg(long)]
        application: bool,
    },
    /// Show one job (or application with --application)
    Find {
        id: i64,
        #[arg(long)]
        application: bool,
    },
    /// List all jobs
    List,
    /// Set the status of a job (or application with --application)
    #[command(name = "update_status", alias = "update-status")]
    UpdateStatus {
        id: i64,
        #[arg(long)]
        status: String,
        #[arg(long)]
        application: bool,
    },
    /// List all job applications
    Applications,
}
