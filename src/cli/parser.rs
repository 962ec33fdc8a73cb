use clap::{Parser, Subcommand};

/// Command-line interface definition for habitlogger
/// CLI application to log daily water intake and walking activity with SQLite
#[derive(Parser, Debug)]
#[command(
    name = "habitlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple habit logger: track water intake and walking activity using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin "today" for the whole session (dd-MM-yy)
    #[arg(global = true, long = "today", hide = true, value_name = "DATE")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Track water intake (glasses)
    Water {
        #[command(subcommand)]
        action: HabitAction,
    },

    /// Track walking activity (steps and kilometres)
    Walk {
        #[command(subcommand)]
        action: HabitAction,
    },

    /// Combined statistics for both habits
    Summary {
        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },

    /// Start an interactive session (type `quit` to leave)
    Shell,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

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

    /// Where the data lives and how many records each habit holds
    Info {
        #[arg(long, help = "Print the overview as JSON")]
        json: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum HabitAction {
    /// Add a record
    Add {
        /// Date of the record (dd-MM-yy, `today`, or `cancel`/`0` to abort)
        date: String,

        #[arg(long, short = 'g', allow_negative_numbers = true, help = "Glasses of water (water only)")]
        glasses: Option<i64>,

        #[arg(long, short = 's', allow_negative_numbers = true, help = "Steps walked (walk only)")]
        steps: Option<i64>,

        #[arg(long, short = 'k', allow_negative_numbers = true, help = "Kilometres walked (walk only)")]
        km: Option<f64>,

        #[arg(long = "desc", short = 'd', help = "Optional description")]
        description: Option<String>,
    },

    /// List all records, newest first
    List {
        #[arg(long, help = "Also show the weekly report")]
        weekly: bool,

        #[arg(long, help = "Print records as JSON")]
        json: bool,
    },

    /// Show the most recent records
    Recent {
        #[arg(long, help = "How many records to show (default from config)")]
        limit: Option<u32>,
    },

    /// Delete a record by id
    Del {
        #[arg(long, allow_negative_numbers = true, help = "Record id (0 cancels)")]
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Update a record; omitted fields keep their current value
    Update {
        #[arg(long, allow_negative_numbers = true, help = "Record id (0 cancels)")]
        id: i64,

        #[arg(long, help = "New date (dd-MM-yy)")]
        date: Option<String>,

        #[arg(long, short = 'g', allow_negative_numbers = true)]
        glasses: Option<i64>,

        #[arg(long, short = 's', allow_negative_numbers = true)]
        steps: Option<i64>,

        #[arg(long, short = 'k', allow_negative_numbers = true)]
        km: Option<f64>,

        #[arg(long = "desc", short = 'd')]
        description: Option<String>,

        #[arg(long = "clear-desc", conflicts_with = "description")]
        clear_desc: bool,
    },

    /// Totals, averages, goal days and best day
    Stats {
        #[arg(long, help = "Also show the weekly report")]
        weekly: bool,

        #[arg(long, help = "Print statistics as JSON")]
        json: bool,
    },

    /// Day-by-day totals of the last days, including empty days
    Weekly {
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..=366),
            help = "Number of days, 1 to 366 (default from config)"
        )]
        days: Option<u32>,

        #[arg(long, help = "Print the series as JSON")]
        json: bool,
    },

    /// Progress towards the daily goal
    Today {
        #[arg(long, help = "Another day instead of today (dd-MM-yy)")]
        date: Option<String>,

        #[arg(long, help = "Print progress as JSON")]
        json: bool,
    },
}
