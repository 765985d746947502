use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand, value_parser};

/// Upper bounds for user-supplied counts. Zero still parses so the catalog
/// can report it as an invalid count.
pub const MAX_SEASONS: i64 = 999;
pub const MAX_EPISODES: i64 = 9999;

#[derive(Debug, Parser)]
#[command(
    name = "showtrack",
    version,
    about = "Track where you are in every series you watch"
)]
pub struct Cli {
    /// Catalog database file (defaults to $SHOWTRACK_DB or the user data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Catalog(CatalogCommand),
    /// Interactive command loop (default)
    Shell,
    /// Full-screen dashboard
    Tui,
}

/// Commands understood both on the command line and inside the shell.
#[derive(Debug, Clone, Subcommand)]
pub enum CatalogCommand {
    /// Add a series to start tracking it
    Add(AddArgs),
    /// Delete a series to stop tracking it
    Delete(NameArgs),
    /// Make a series current, optionally moving its last watched episode
    Set(SetArgs),
    /// Add, delete or resize seasons of a series
    Update(UpdateArgs),
    /// Show the series table, or the seasons of one series
    Status(StatusArgs),
    /// Mark the next episode as watched
    One(OptionalNameArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Name of the series
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
    /// Number of seasons in the series
    #[arg(
        short = 's',
        long = "seasons",
        default_value_t = 1,
        value_parser = value_parser!(u32).range(0..=MAX_SEASONS)
    )]
    pub seasons: u32,
    /// Number of episodes per season
    #[arg(
        short = 'e',
        long = "episodes",
        default_value_t = 10,
        value_parser = value_parser!(u32).range(0..=MAX_EPISODES)
    )]
    pub episodes: u32,
}

#[derive(Debug, Clone, Args)]
pub struct NameArgs {
    /// Name of the series
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct OptionalNameArgs {
    /// Name of the series (defaults to the current series)
    #[arg(num_args = 0..)]
    pub name: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Name of the series
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
    /// The last watched episode to move the pointer to
    #[arg(short = 'e', long = "episode", num_args = 2, value_names = ["SEASON", "EPISODE"])]
    pub episode: Vec<u32>,
}

#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("edit").required(true).args(["add", "delete", "change"])))]
pub struct UpdateArgs {
    /// Name of the series
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
    /// Append a season
    #[arg(short = 'a', long = "add")]
    pub add: bool,
    /// Delete the last season
    #[arg(short = 'd', long = "delete")]
    pub delete: bool,
    /// Change the number of episodes of SEASON
    #[arg(short = 'c', long = "change", value_name = "SEASON")]
    pub change: Option<u32>,
    /// Episodes in the season (0 with -a repeats the last season)
    #[arg(
        short = 'e',
        long = "episodes",
        default_value_t = 0,
        value_parser = value_parser!(u32).range(0..=MAX_EPISODES)
    )]
    pub episodes: u32,
}

#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Name of the series
    #[arg(num_args = 0..)]
    pub name: Vec<String>,
    /// Include legacy (deleted) series; repeat to list only legacy names
    #[arg(short = 'l', long = "legacy", action = ArgAction::Count)]
    pub legacy: u8,
}

/// One line typed into the interactive shell.
#[derive(Debug, Parser)]
#[command(
    name = "showtrack",
    no_binary_name = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    #[command(flatten)]
    Catalog(CatalogCommand),
    /// Save the catalog now
    Save,
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

pub fn join_name(words: &[String]) -> String {
    words.join(" ")
}
