use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use crate::cli::{ShellCommand, ShellLine};
use crate::db::Database;
use crate::tracker::Catalog;

use super::commands::{describe_error, execute};

pub(crate) const PROMPT: &str = "showtrack> ";
/// Successful mutating commands between automatic saves.
pub(crate) const AUTOSAVE_EVERY: u32 = 5;

pub(crate) struct Shell<'a> {
    db: &'a Database,
    catalog: Catalog,
    pending: u32,
    dirty: bool,
}

impl<'a> Shell<'a> {
    pub(crate) fn new(db: &'a Database, catalog: Catalog) -> Self {
        Self {
            db,
            catalog,
            pending: 0,
            dirty: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Reads commands until `exit` or end of input, then offers to save any
    /// unsaved changes.
    pub(crate) fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        writeln!(out, "Track where you are in every series. Type `help` for commands.")?;
        let mut line = String::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line).context("failed to read command")? == 0 {
                writeln!(out)?;
                break;
            }
            if !self.handle_line(line.trim(), &mut out)? {
                break;
            }
        }
        self.finish(&mut input, &mut out)
    }

    /// Runs one input line. Returns `false` when the shell should stop.
    pub(crate) fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        if line.is_empty() {
            return Ok(true);
        }
        let parsed = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(err) => {
                write!(out, "{}", err.render())?;
                return Ok(true);
            }
        };

        match parsed.command {
            ShellCommand::Exit => return Ok(false),
            ShellCommand::Save => {
                writeln!(out, "Saving...")?;
                self.save()?;
            }
            ShellCommand::Catalog(command) => match execute(&mut self.catalog, &command) {
                Ok(outcome) => {
                    for text in &outcome.lines {
                        writeln!(out, "{text}")?;
                    }
                    if outcome.mutated {
                        self.dirty = true;
                        self.pending += 1;
                    }
                    if self.pending >= AUTOSAVE_EVERY {
                        writeln!(out, "Autosaving...")?;
                        self.save()?;
                    }
                }
                Err(err) => {
                    debug!(error = %err, "command rejected");
                    for text in describe_error(&err) {
                        writeln!(out, "{text}")?;
                    }
                }
            },
        }
        Ok(true)
    }

    fn finish<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        write!(out, "Would you like to save the changes (y/n)? ")?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer).context("failed to read answer")?;
        if answer.trim().eq_ignore_ascii_case("y") {
            writeln!(out, "Saving...")?;
            self.save()?;
        } else {
            info!("exiting without saving changes");
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.db.save_catalog(&self.catalog)?;
        self.pending = 0;
        self.dirty = false;
        Ok(())
    }
}
