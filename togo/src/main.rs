//! Togo - a personal command-line to-do tracker.
//!
//! # Commands
//!
//! - `togo add <item>`: Add a to-do item
//! - `togo done <index>`: Complete an item
//! - `togo del <index>`: Delete an item
//! - `togo list [--all]`: List items
//! - `togo clear`: Remove every item of every author
//! - `togo login <username>` / `togo logout` / `togo whoami`: Manage the session
//! - `togo export` / `togo import <file>`: Move items in and out as text
//!
//! # Environment Variables
//!
//! See the [`config`](togo::config) module for available configuration options.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use togo::config::Config;
use togo::credentials::hash_password;
use togo::todo::Todo;
use togo::types::TodoStatus;

/// Togo - a personal command-line to-do tracker.
///
/// Items are stored in ~/.togo.store; authors in ~/.togo.config.
#[derive(Parser, Debug)]
#[command(name = "togo")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    TOGO_HOME          Directory holding the store files (default: home directory)
    TOGO_STORE_FILE    To-do store file name (default: .togo.store)
    TOGO_CONFIG_FILE   Author ledger file name (default: .togo.config)
    RUST_LOG           Log filter (default: warn)

EXAMPLES:
    # Add an item and complete it
    togo add \"coding 10 minutes\"
    togo done 1

    # Show doing and done items
    togo list --all

    # Move items to another machine
    togo export -o todos.txt
    togo import todos.txt
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Add a to-do item.
    Add {
        /// Item title.
        item: String,
    },

    /// Complete a to-do item.
    Done {
        /// Index shown by `togo list`.
        index: usize,
    },

    /// Delete a to-do item.
    Del {
        /// Index shown by `togo list`.
        index: usize,
    },

    /// List to-do items.
    List {
        /// Include done items.
        #[arg(short, long)]
        all: bool,
    },

    /// Remove every item, for every author.
    Clear,

    /// Log in, registering the name on first use.
    Login {
        /// Author name.
        username: String,

        /// Password; prompted for when omitted.
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out the current author.
    Logout,

    /// Show the logged-in author.
    Whoami,

    /// Print doing and done items as numbered lines.
    Export {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add items from a file of numbered lines.
    Import {
        /// File produced by `togo export`.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments using clap
    let cli = Cli::parse();

    init_logging();

    run(cli.command)
}

/// Runs a single command against the configured stores.
fn run(command: Command) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let mut todo = Todo::open(&config);

    match command {
        Command::Add { item } => {
            todo.add(&item)?;
            println!("Added: {}", item.trim());
        }

        Command::Done { index } => match todo.done(index) {
            Some(_) => println!("Completed item {index}"),
            None => println!("No item at index {index}"),
        },

        Command::Del { index } => match todo.del(index) {
            Some(_) => println!("Deleted item {index}"),
            None => println!("No item at index {index}"),
        },

        Command::List { all } => {
            let entries = todo.entries(all);
            if entries.is_empty() {
                println!("Nothing to do.");
            }
            for (index, record) in entries {
                let mark = match record.status {
                    TodoStatus::Done => "[x]",
                    _ => "[ ]",
                };
                println!("{index}. {mark} {}", record.title);
            }
        }

        Command::Clear => {
            todo.clear();
            println!("Cleared all items");
        }

        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")
                    .context("Failed to read password")?,
            };
            let password_hash = hash_password(password);

            todo.login(&username, &password_hash)?;
            println!("Logged in as {username}");
        }

        Command::Logout => {
            todo.logout();
            println!("Logged out");
        }

        Command::Whoami => match todo.current_author() {
            Some(author) => println!("{}", author.name),
            None => println!("Not logged in"),
        },

        Command::Export { output } => {
            let rendered = todo.render_export();
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => print!("{rendered}"),
            }
        }

        Command::Import { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let added = todo.import(&content)?;
            println!("Imported {added} items");
        }
    }

    Ok(())
}

/// Initializes the logging subsystem, writing to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
