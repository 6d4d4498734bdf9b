use apodlog::store::StoreKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "apodlog",
    bin_name = "apodlog",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Log NASA's Astronomy Picture of the Day to JSONL and CSV", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Which log a read command looks at.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    #[default]
    Jsonl,
    Csv,
}

impl From<StoreArg> for StoreKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Jsonl => StoreKind::Lines,
            StoreArg::Csv => StoreKind::Table,
        }
    }
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Fetch,
    Browse,
    Manage,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Fetch => "Fetch Commands:",
            CommandGroup::Browse => "Browse Commands:",
            CommandGroup::Manage => "Manage Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "fetch" => Some(CommandGroup::Fetch),
            "list" | "newest" | "oldest" | "count" => Some(CommandGroup::Browse),
            "delete" | "attach" | "clear" | "doctor" => Some(CommandGroup::Manage),
            "settings" | "init" | "shell" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Fetch,
            CommandGroup::Browse,
            CommandGroup::Manage,
            CommandGroup::Misc,
        ]
    }
}

/// Grouped help listing, also shown by `/help` in the shell.
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("apodlog {version}\n"));
    output.push_str("Log NASA's Astronomy Picture of the Day to JSONL and CSV\n");
    output.push('\n');
    output.push_str("Usage: apodlog [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Shell commands (also as --x or -x):\n");
    output.push_str("  /help            Show this help\n");
    output.push_str("  /readme          Show the README\n");
    output.push_str("  /settings        Show settings\n");
    output.push_str("  /auto-redirect   Toggle opening links in the browser\n");
    output.push_str("  /auto-wallpaper  Toggle setting the wallpaper\n");
    output.push_str("  /auto-save       Toggle saving media files\n");
    output.push_str("  /quit, q         Leave the shell\n");

    output
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch entries from the APOD API and log them
    #[command(display_order = 1)]
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,
    },

    /// List logged entries
    #[command(alias = "ls", display_order = 10)]
    List {
        /// Only the first N entries
        #[arg(long, value_name = "N", conflicts_with = "last")]
        first: Option<usize>,

        /// Only the last N entries
        #[arg(long, value_name = "N")]
        last: Option<usize>,

        #[arg(long, value_enum, default_value_t = StoreArg::Jsonl)]
        store: StoreArg,
    },

    /// Show the entry with the most recent APOD date
    #[command(display_order = 11)]
    Newest {
        #[arg(long, value_enum, default_value_t = StoreArg::Jsonl)]
        store: StoreArg,
    },

    /// Show the entry with the oldest APOD date
    #[command(display_order = 12)]
    Oldest {
        #[arg(long, value_enum, default_value_t = StoreArg::Jsonl)]
        store: StoreArg,
    },

    /// Count logged entries
    #[command(display_order = 13)]
    Count {
        #[arg(long, value_enum, default_value_t = StoreArg::Jsonl)]
        store: StoreArg,
    },

    /// Delete the entry for a date from both logs
    #[command(alias = "rm", display_order = 20)]
    Delete {
        /// YYYY-MM-DD (or YYYY MM DD)
        #[arg(required = true, num_args = 1..=3)]
        date: Vec<String>,
    },

    /// Record a local media file for an entry
    #[command(display_order = 21)]
    Attach {
        /// YYYY-MM-DD
        date: String,

        path: PathBuf,
    },

    /// Remove every entry from both logs
    #[command(display_order = 22)]
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Check that both logs hold the same dates and fix them if not
    #[command(display_order = 23)]
    Doctor,

    /// Show or change settings
    #[command(display_order = 30)]
    Settings {
        /// auto-redirect, auto-wallpaper or auto-save
        key: Option<String>,

        /// on/off or yes/no (toggles when omitted)
        value: Option<String>,
    },

    /// Create the data directory, logs and settings file
    #[command(display_order = 31)]
    Init,

    /// Interactive prompt (the default)
    #[command(display_order = 32)]
    Shell,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum FetchTarget {
    /// Today's picture
    Today,

    /// The picture for a given day
    Date {
        /// YYYY-MM-DD (or YYYY MM DD)
        #[arg(required = true, num_args = 1..=3)]
        date: Vec<String>,
    },

    /// Up to 20 random pictures
    Random { count: u32 },
}
