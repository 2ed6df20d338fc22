use crate::models::id_type::IdType;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// Attendance kiosk: face-checked capture, SQLite store, Excel reports by email
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Labor attendance kiosk: face-checked photo capture, SQLite records and emailed Excel reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
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

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record an attendance after checking the photo for a face
    Capture {
        #[arg(long, help = "Laborer name")]
        name: String,

        #[arg(long, help = "Shift name")]
        shift: String,

        #[arg(long, help = "Supervisor name")]
        supervisor: String,

        #[arg(long, value_name = "FILE", help = "Photo of the laborer (JPEG/PNG)")]
        photo: String,
    },

    /// Show today's latest attendance records
    Today {
        #[arg(long, help = "Show every record of today instead of the latest 10")]
        all: bool,
    },

    /// Today's totals per shift and per supervisor
    Dashboard,

    /// List frequent laborers (everyone captured at least once)
    Roster,

    /// Manage supervisors
    #[command(subcommand)]
    Supervisor(SupervisorCmd),

    /// Manage shifts
    #[command(subcommand)]
    Shift(ShiftCmd),

    /// Register or list laborer identity records
    #[command(subcommand)]
    Laborer(LaborerCmd),

    /// Generate the Excel report (and optionally email it)
    Report {
        #[arg(long, value_name = "FILE", help = "Output path (default: report_file from config)")]
        file: Option<String>,

        #[arg(long, help = "Email the configured report file to the recipient")]
        send: bool,
    },

    /// Run the recurring report dispatcher until Enter is pressed
    Schedule {
        #[arg(long = "interval-hours", help = "Hours between reports (default from config)")]
        interval_hours: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum SupervisorCmd {
    /// Add a supervisor
    Add { name: String, email: String },
    /// List supervisors
    List,
    /// Rename a supervisor and set its email
    Update {
        old_name: String,
        new_name: String,
        email: String,
    },
    /// Delete a supervisor
    Delete { name: String },
}

#[derive(Subcommand)]
pub enum ShiftCmd {
    /// Add a shift (times as HH:MM)
    Add {
        name: String,
        start: String,
        end: String,
    },
    /// List shifts
    List,
    /// Change start/end of every shift with this name
    Update {
        name: String,
        start: String,
        end: String,
    },
    /// Delete every shift with this name
    Delete { name: String },
}

#[derive(Subcommand)]
pub enum LaborerCmd {
    /// Register a laborer with an ID proof photo
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        contact: String,

        #[arg(long = "id-type", value_enum)]
        id_type: IdType,

        #[arg(long = "id-number", default_value = "")]
        id_number: String,

        #[arg(long = "emergency", default_value = "")]
        emergency: String,

        #[arg(long, default_value = "")]
        supervisor: String,

        #[arg(long, value_name = "FILE", help = "Photo of the ID document")]
        proof: String,
    },

    /// List laborer records
    List {
        #[arg(long, help = "Show only this laborer")]
        name: Option<String>,
    },
}
