use crate::cli::{CatalogCommand, StatusArgs, UpdateArgs, join_name};
use crate::tracker::progress::{self, Advance, PointerStep};
use crate::tracker::report::{legacy_names, season_rows, summary_rows};
use crate::tracker::{Catalog, TrackerError, TrackerResult, editor};

use super::display::{
    name_column_width, position_label, season_line, series_title, summary_header, summary_line,
};

/// Text produced by a command, and whether it changed the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CommandOutcome {
    pub(crate) lines: Vec<String>,
    pub(crate) mutated: bool,
}

impl CommandOutcome {
    fn changed(lines: Vec<String>) -> Self {
        Self {
            lines,
            mutated: true,
        }
    }

    fn report(lines: Vec<String>) -> Self {
        Self {
            lines,
            mutated: false,
        }
    }
}

pub(crate) fn execute(
    catalog: &mut Catalog,
    command: &CatalogCommand,
) -> TrackerResult<CommandOutcome> {
    match command {
        CatalogCommand::Add(args) => {
            let series = catalog.add(&join_name(&args.name), args.seasons, args.episodes)?;
            Ok(CommandOutcome::changed(vec![format!(
                "Now tracking {}: {} season(s) of {} episodes",
                series.name(),
                args.seasons,
                args.episodes
            )]))
        }
        CatalogCommand::Delete(args) => {
            let name = join_name(&args.name);
            catalog.soft_delete(&name)?;
            let canonical = catalog.lookup_any(&name)?.name().to_string();
            Ok(CommandOutcome::changed(vec![format!(
                "Deleted {canonical}. It stays listed under `status -ll`."
            )]))
        }
        CatalogCommand::Set(args) => {
            let series = catalog.resolve_mut(&join_name(&args.name))?;
            if let [season, episode] = args.episode[..] {
                progress::seek(series, season, episode)?;
            }
            let canonical = series.name().to_string();
            let position = position_label(series.cur_season(), series.last_episode());
            catalog.select(&canonical)?;
            Ok(CommandOutcome::changed(vec![format!(
                "{canonical} is now current, last episode {position}"
            )]))
        }
        CatalogCommand::Update(args) => update(catalog, args),
        CatalogCommand::Status(args) => status(catalog, args).map(CommandOutcome::report),
        CatalogCommand::One(args) => {
            let advance = if args.name.is_empty() {
                progress::advance_current(catalog)?
            } else {
                progress::advance_named(catalog, &join_name(&args.name))?
            };
            Ok(CommandOutcome::changed(vec![describe_advance(&advance)]))
        }
    }
}

fn update(catalog: &mut Catalog, args: &UpdateArgs) -> TrackerResult<CommandOutcome> {
    let series = catalog.resolve_mut(&join_name(&args.name))?;
    let line = if args.add {
        let (season, episodes) = editor::add_season(series, args.episodes);
        format!(
            "Added season {season} with {episodes} episodes to {}",
            series.name()
        )
    } else if args.delete {
        let season = editor::delete_last_season(series)?;
        format!("Deleted season {season} from {}", series.name())
    } else if let Some(season) = args.change {
        editor::change_season_episodes(series, season, args.episodes)?;
        format!("Season {season} of {} now has {} episodes", series.name(), args.episodes)
    } else {
        return Ok(CommandOutcome::report(vec![
            "Nothing to update: pass one of -a, -d or -c SEASON".to_string(),
        ]));
    };
    Ok(CommandOutcome::changed(vec![line]))
}

fn status(catalog: &Catalog, args: &StatusArgs) -> TrackerResult<Vec<String>> {
    if !args.name.is_empty() {
        let series = catalog.lookup_any(&join_name(&args.name))?;
        let mut lines = vec![
            series_title(series.name(), catalog.is_current(series.name())),
            String::new(),
            "Season Episodes".to_string(),
            "-".repeat(75),
        ];
        lines.extend(season_rows(series).iter().map(season_line));
        return Ok(lines);
    }

    if args.legacy > 1 {
        let legacy = legacy_names(catalog);
        if legacy.is_empty() {
            return Ok(vec!["No legacy series".to_string()]);
        }
        return Ok(legacy.into_iter().map(str::to_string).collect());
    }

    let rows = summary_rows(catalog, args.legacy == 1);
    if rows.is_empty() {
        return Ok(vec!["No series in database".to_string()]);
    }
    let width = name_column_width(&rows);
    let mut lines = vec![summary_header(width), "-".repeat(75)];
    lines.extend(rows.iter().map(|row| summary_line(row, width)));
    Ok(lines)
}

pub(crate) fn describe_advance(advance: &Advance) -> String {
    match &advance.step {
        PointerStep::Episode { season, episode } => format!(
            "{} last episode : {}",
            advance.series,
            position_label(*season, *episode)
        ),
        PointerStep::Rollover { season } => format!(
            "{} finished season {}. Next up: season {season}",
            advance.series,
            season - 1
        ),
        PointerStep::Rotated { to } => {
            format!("{} is fully watched. Moving to {to}", advance.series)
        }
    }
}

/// Error text plus an optional hint line, as shown to the user.
pub(crate) fn describe_error(err: &TrackerError) -> Vec<String> {
    let mut lines = vec![err.to_string()];
    if let Some(hint) = super::display::error_hint(err) {
        lines.push(hint.to_string());
    }
    lines
}
