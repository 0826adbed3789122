//! Command-line front end for the crossword entry store.
//!
//! # Responsibility
//! - Parse arguments and resolve settings (flags > environment > `.env`).
//! - Map each subcommand onto one entry store operation.
//! - Print entries and outcomes; exit non-zero on failure.

use clap::{Parser, Subcommand, ValueEnum};
use crossword_core::config::{DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
use crossword_core::{
    init_logging, Entry, EntryId, EntryService, SortField, SqliteEntryRepository, StoreConfig,
};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Manage crossword clue/answer entries.
#[derive(Parser, Debug)]
#[command(name = "crossword", version, about)]
struct CliArgs {
    /// SQLite database file (overrides CROSSWORD_DB_PATH).
    #[arg(long = "db", global = true)]
    db: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long = "log-level", global = true)]
    log_level: Option<String>,

    /// Absolute directory for log files; no file logging when unset.
    #[arg(long = "log-dir", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the first page of entries in storage order.
    List,
    /// Show one entry.
    Find { id: EntryId },
    /// Add an entry; prints the assigned id.
    Add(EntryFields),
    /// Delete an entry.
    Delete { id: EntryId },
    /// Replace every field of an entry.
    Edit {
        id: EntryId,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Show all entries ordered by a field.
    Sort {
        #[arg(long = "by", value_enum, default_value_t = SortColumn::Clue)]
        by: SortColumn,
    },
}

#[derive(clap::Args, Debug)]
struct EntryFields {
    #[arg(long)]
    clue: String,
    #[arg(long)]
    answer: String,
    #[arg(long, allow_negative_numbers = true)]
    difficulty: i32,
    #[arg(long)]
    date: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortColumn {
    Clue,
    Answer,
}

impl From<SortColumn> for SortField {
    fn from(value: SortColumn) -> Self {
        match value {
            SortColumn::Clue => SortField::Clue,
            SortColumn::Answer => SortField::Answer,
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&args)?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    let repo = SqliteEntryRepository::try_new(&config.database_path)?;
    let mut service = EntryService::new(repo)?;

    match args.command {
        Command::List => print_entries(service.get_entries()?),
        Command::Find { id } => {
            load_all(&mut service)?;
            match service.find_entry(id) {
                Some(entry) => print_entries(std::slice::from_ref(entry)),
                None => return Err(format!("entry not found: {id}").into()),
            }
        }
        Command::Add(fields) => {
            let id = service.add_entry(
                &fields.clue,
                &fields.answer,
                fields.difficulty,
                &fields.date,
            )?;
            println!("added entry {id}");
        }
        Command::Delete { id } => {
            load_all(&mut service)?;
            service.delete_entry(id)?;
            println!("deleted entry {id}");
        }
        Command::Edit { id, fields } => {
            load_all(&mut service)?;
            service.edit_entry(
                &fields.clue,
                &fields.answer,
                fields.difficulty,
                &fields.date,
                id,
            )?;
            println!("updated entry {id}");
        }
        Command::Sort { by } => {
            match SortField::from(by) {
                SortField::Clue => service.sort_by_clue()?,
                SortField::Answer => service.sort_by_answer()?,
            }
            print_entries(service.entries());
        }
    }

    Ok(())
}

fn resolve_config(args: &CliArgs) -> Result<StoreConfig, Box<dyn Error>> {
    let config = StoreConfig::from_env_with(|name| match name {
        DB_PATH_VAR => args.db.as_ref().map(|path| path.display().to_string()),
        LOG_LEVEL_VAR => args.log_level.clone(),
        LOG_DIR_VAR => args.log_dir.clone(),
        _ => None,
    })?;
    Ok(config)
}

/// Fills the mirror with every stored entry.
///
/// The plain listing is capped, so lookups by id go through an ordered fetch.
fn load_all(service: &mut EntryService<SqliteEntryRepository>) -> Result<(), Box<dyn Error>> {
    service.sort_by_clue()?;
    Ok(())
}

fn print_entries(entries: &[Entry]) {
    if entries.is_empty() {
        println!("no entries");
        return;
    }
    println!("{:>5}  {:<40}  {:<21}  {:>4}  date", "id", "clue", "answer", "diff");
    for entry in entries {
        println!(
            "{:>5}  {:<40}  {:<21}  {:>4}  {}",
            entry.id, entry.clue, entry.answer, entry.difficulty, entry.date
        );
    }
}
