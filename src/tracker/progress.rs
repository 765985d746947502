//! Viewing-pointer movement.
//!
//! Advancing the current series is a small state machine over
//! `(cur_season, last_episode)`:
//!
//! - inside a season the episode is incremented;
//! - at the end of a season that has a successor, the pointer rolls over to
//!   `(next, 0)` and nothing else happens in that call;
//! - at the end of the final season the catalog rotates its current selection
//!   to the next active series, leaving both pointers alone.
//!
//! Advancing an explicitly named series only ever increments the episode.

use tracing::debug;

use super::catalog::Catalog;
use super::series::Series;
use super::{TrackerError, TrackerResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PointerStep {
    /// Episode watched; pointer now at `(season, episode)`.
    Episode { season: u32, episode: u32 },
    /// Previous season finished; pointer parked at the start of `season`.
    Rollover { season: u32 },
    /// Final season already finished; the pointer did not move and `to`
    /// became the current series.
    Rotated { to: String },
}

/// Result of one advance on `series`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Advance {
    pub(crate) series: String,
    pub(crate) step: PointerStep,
}

pub(crate) fn advance_current(catalog: &mut Catalog) -> TrackerResult<Advance> {
    let series = catalog.current_mut()?;
    let name = series.name.clone();

    if !series.season_finished() {
        let step = watch_next_episode(series);
        return Ok(Advance { series: name, step });
    }

    if let Some(next) = series.next_season() {
        series.cur_season = next;
        series.last_episode = 0;
        debug!(series = %name, season = next, "rolled over to next season");
        return Ok(Advance {
            series: name,
            step: PointerStep::Rollover { season: next },
        });
    }

    let to = next_in_rotation(catalog, &name)?;
    catalog.set_current(to.clone());
    debug!(from = %name, to = %to, "rotated current series");
    Ok(Advance {
        series: name,
        step: PointerStep::Rotated { to },
    })
}

/// Advances a series the caller named explicitly. Never rolls over or
/// rotates: a finished season is reported as [`TrackerError::SeasonNotFound`].
pub(crate) fn advance_named(catalog: &mut Catalog, name: &str) -> TrackerResult<Advance> {
    let series = catalog.resolve_mut(name)?;
    if series.season_finished() {
        return Err(TrackerError::SeasonNotFound {
            name: series.name.clone(),
            season: series.cur_season,
        });
    }
    let step = watch_next_episode(series);
    Ok(Advance {
        series: series.name.clone(),
        step,
    })
}

/// Places the pointer at `(season, episode)`; episode `0` parks it at the
/// start of the season.
pub(crate) fn seek(series: &mut Series, season: u32, episode: u32) -> TrackerResult<()> {
    if !series.has_episode(season, episode) {
        return Err(TrackerError::NoSuchEpisode { season, episode });
    }
    series.cur_season = season;
    series.last_episode = episode;
    debug!(series = %series.name, season, episode, "pointer moved");
    Ok(())
}

fn watch_next_episode(series: &mut Series) -> PointerStep {
    series.last_episode += 1;
    PointerStep::Episode {
        season: series.cur_season,
        episode: series.last_episode,
    }
}

fn next_in_rotation(catalog: &Catalog, current: &str) -> TrackerResult<String> {
    let names = catalog.active_names();
    if names.len() < 2 {
        return Err(TrackerError::NoOtherSeries);
    }
    let idx = names
        .iter()
        .position(|name| *name == current)
        .ok_or_else(|| TrackerError::NotFound(current.to_string()))?;
    Ok(names[(idx + 1) % names.len()].to_string())
}
