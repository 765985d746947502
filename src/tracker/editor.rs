//! Structural edits to a series' season list.
//!
//! Callers resolve the series through [`Catalog::resolve_mut`] first, so
//! deleted series never reach these functions.
//!
//! [`Catalog::resolve_mut`]: super::Catalog::resolve_mut

use tracing::debug;

use super::series::Series;
use super::{TrackerError, TrackerResult};

/// Appends a season. `episodes == 0` repeats the last season's count.
/// Returns the new season's number and episode count.
pub(crate) fn add_season(series: &mut Series, episodes: u32) -> (u32, u32) {
    let episodes = if episodes > 0 {
        episodes
    } else {
        series.seasons.last().copied().unwrap_or(1)
    };
    series.seasons.push(episodes);
    debug!(series = %series.name, episodes, "season added");
    (series.season_count(), episodes)
}

/// Removes the final season unless the viewing pointer sits in it.
/// Returns the number of the removed season.
pub(crate) fn delete_last_season(series: &mut Series) -> TrackerResult<u32> {
    let last = series.season_count();
    if series.cur_season == last {
        return Err(TrackerError::CannotDeleteCurrentSeason(last));
    }
    series.seasons.pop();
    debug!(series = %series.name, season = last, "season deleted");
    Ok(last)
}

pub(crate) fn change_season_episodes(
    series: &mut Series,
    season: u32,
    new_episodes: u32,
) -> TrackerResult<()> {
    if !series.has_season(season) {
        return Err(TrackerError::InvalidSeason(season));
    }
    if new_episodes == 0 {
        return Err(TrackerError::InvalidEpisodeCount(new_episodes));
    }
    if season == series.cur_season && new_episodes < series.last_episode {
        return Err(TrackerError::WouldOverflowCurrent {
            season,
            episodes: new_episodes,
            watched: series.last_episode,
        });
    }

    series.seasons[season as usize - 1] = new_episodes;
    debug!(series = %series.name, season, episodes = new_episodes, "season resized");
    Ok(())
}
