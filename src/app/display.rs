use chrono::{DateTime, Local};

use crate::tracker::TrackerError;
use crate::tracker::report::{SeasonRow, SummaryRow};

/// One season as `+` per episode followed by the count, with the watch
/// marker drawn as `@` over the marked episode.
pub(crate) fn season_bar(row: &SeasonRow) -> String {
    let mut bar: Vec<char> = "+".repeat(row.episodes as usize).chars().collect();
    bar.extend(row.episodes.to_string().chars());
    if let Some(episode) = row.marked
        && let Some(slot) = (episode as usize).checked_sub(1).and_then(|idx| bar.get_mut(idx))
    {
        *slot = '@';
    }
    bar.into_iter().collect()
}

pub(crate) fn season_line(row: &SeasonRow) -> String {
    format!(" {:<6} {}", row.season, season_bar(row))
}

pub(crate) fn series_title(name: &str, is_current: bool) -> String {
    if is_current {
        format!(":: *{name}* ::")
    } else {
        format!(":: {name} ::")
    }
}

pub(crate) fn display_name(row: &SummaryRow) -> String {
    if row.is_current {
        format!("{}*", row.name)
    } else {
        row.name.clone()
    }
}

/// Width of the name column: longest name plus room for the current marker.
pub(crate) fn name_column_width(rows: &[SummaryRow]) -> usize {
    rows.iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4)
        + 2
}

pub(crate) fn summary_header(width: usize) -> String {
    format!("{:<width$} {} {}", "Name", "Seasons ", "last_watched")
}

pub(crate) fn summary_line(row: &SummaryRow, width: usize) -> String {
    format!(
        "{:<width$} {:02}x{:04.1}  [{}, {}]",
        display_name(row),
        row.season_count,
        row.avg_episodes,
        row.cur_season,
        row.last_episode
    )
}

pub(crate) fn position_label(season: u32, episode: u32) -> String {
    format!("[{season}, {episode}]")
}

/// Follow-up advice printed under an error, mirroring what the user can do
/// about it.
pub(crate) fn error_hint(err: &TrackerError) -> Option<&'static str> {
    match err {
        TrackerError::AlreadyTracked(_) => Some("Use `update NAME -a` to add more seasons to a series."),
        TrackerError::PreviouslyDeleted(_) | TrackerError::Deleted(_) => {
            Some("Use `status -ll` to view all legacy series.")
        }
        TrackerError::SeasonNotFound { .. } => {
            Some("Add more seasons using the `update NAME -a` command.")
        }
        TrackerError::NoCurrentSeries => Some("Add a series with `add NAME` first."),
        _ => None,
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    let mut out = s.to_string();
    if out.chars().count() > max {
        out = out.chars().take(max.saturating_sub(3)).collect::<String>() + "...";
    }
    out
}

pub(crate) fn format_saved_at(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}
