mod commands;
mod display;
mod shell;
mod tui;


use std::io;
use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CatalogCommand, Cli, Command};
use crate::db::Database;
use crate::paths::database_file_path;
use crate::tracker::Catalog;

use self::commands::{describe_error, execute};
use self::shell::Shell;

pub fn run(cli: Cli) -> Result<()> {
    let db = open_db(cli.db)?;
    let catalog = db.load_catalog()?;

    match cli.command {
        Some(Command::Catalog(command)) => run_once(&db, catalog, &command)?,
        Some(Command::Tui) => tui::run_tui(&db, catalog)?,
        Some(Command::Shell) | None => {
            let stdin = io::stdin();
            Shell::new(&db, catalog).run(stdin.lock(), io::stdout())?
        }
    }

    Ok(())
}

fn run_once(db: &Database, mut catalog: Catalog, command: &CatalogCommand) -> Result<()> {
    match execute(&mut catalog, command) {
        Ok(outcome) => {
            for line in &outcome.lines {
                println!("{line}");
            }
            if outcome.mutated {
                db.save_catalog(&catalog)?;
            }
            Ok(())
        }
        Err(err) => {
            debug!(error = %err, "command rejected");
            let mut lines = describe_error(&err).into_iter();
            if let Some(hint) = lines.nth(1) {
                eprintln!("{hint}");
            }
            Err(err.into())
        }
    }
}

fn open_db(explicit: Option<PathBuf>) -> Result<Database> {
    let db_path = database_file_path(explicit)?;
    let db = Database::open(&db_path)?;
    db.migrate()?;
    Ok(db)
}
