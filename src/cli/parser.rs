use crate::export::ExportFormat;
use crate::models::shift::Shift;
use clap::{Parser, Subcommand};

/// Command-line interface definition for staffroll
/// Employee registry kept in an embedded SQLite image
#[derive(Parser)]
#[command(
    name = "staffroll",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small employee registry: records, monthly timesheets and exports on an embedded SQLite image",
    long_about = None
)]
pub struct Cli {
    /// Override the snapshot directory (useful for tests or a portable store)
    #[arg(global = true, long = "store", value_name = "DIR")]
    pub store: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the local database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Maintenance on the loaded database
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Compact the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register a new employee
    Add {
        #[arg(long, help = "Full name")]
        name: String,

        #[arg(long, help = "Registration number (unique)")]
        registration: String,

        #[arg(long, help = "Role or job title")]
        role: String,

        #[arg(long, value_enum, default_value_t = Shift::FullDay, help = "Work shift")]
        shift: Shift,
    },

    /// Update an existing employee; omitted fields keep their value
    Edit {
        /// Employee id
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        registration: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long, value_enum)]
        shift: Option<Shift>,
    },

    /// Delete an employee by id
    Del {
        /// Employee id
        id: i64,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// List employees
    List {
        #[arg(long, short, help = "Filter by name, registration or role")]
        search: Option<String>,
    },

    /// Manage the header printed on top of reports
    Header {
        #[arg(long, value_name = "TEXT", help = "Set the header (HTML allowed)")]
        set: Option<String>,

        #[arg(long, value_name = "FILE", conflicts_with = "set", help = "Read the header from a file")]
        file: Option<String>,

        #[arg(long, help = "Print the header as plain text")]
        print: bool,

        #[arg(long, conflicts_with_all = ["set", "file"], help = "Remove the header")]
        clear: bool,
    },

    /// Export the database file
    Backup {
        #[arg(long, value_name = "FILE", help = "Destination (default: export_file_name from config)")]
        file: Option<String>,

        #[arg(long, help = "Write a .zip archive instead of the plain file")]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace the loaded database with a database file
    Import {
        #[arg(long, value_name = "FILE", help = "A .sqlite/.db file or a .zip holding one")]
        file: String,
    },

    /// Export the employee list
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,

        #[arg(long, short, help = "Filter by name, registration or role")]
        search: Option<String>,
    },

    /// Print a monthly attendance sheet as PDF
    Timesheet {
        #[arg(long, help = "Employee id")]
        id: i64,

        #[arg(long, help = "Month 1-12 (default: current month)")]
        month: Option<u32>,

        #[arg(long, help = "Year (default: current year)")]
        year: Option<i32>,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
