//! Viewing-progress core: series, the catalog that owns them, and the
//! operations that edit seasons, move the viewing pointer and summarize state.
//!
//! Nothing in here performs I/O. Every fallible operation validates before it
//! mutates, so an `Err` always leaves the catalog exactly as it was.

pub(crate) mod catalog;
pub(crate) mod editor;
pub(crate) mod progress;
pub(crate) mod report;
pub(crate) mod series;

use thiserror::Error;

pub(crate) use catalog::Catalog;
pub(crate) use series::Series;

/// Recoverable failures of catalog, editor and progression operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum TrackerError {
    #[error("{0} is already being tracked")]
    AlreadyTracked(String),

    #[error("{0} was previously deleted")]
    PreviouslyDeleted(String),

    #[error("invalid values for seasons or episodes")]
    InvalidCount,

    #[error("series name cannot be empty")]
    EmptyName,

    #[error("series not found: {0}")]
    NotFound(String),

    #[error("{0} cannot be deleted: current series")]
    IsCurrent(String),

    #[error("{0} was previously deleted")]
    Deleted(String),

    #[error("no current series selected")]
    NoCurrentSeries,

    #[error("cannot delete season {0}: it holds the current episode")]
    CannotDeleteCurrentSeason(u32),

    #[error("invalid season {0}")]
    InvalidSeason(u32),

    #[error("invalid episode count {0}")]
    InvalidEpisodeCount(u32),

    #[error("cannot shrink season {season} to {episodes} episodes: episode {watched} already watched")]
    WouldOverflowCurrent {
        season: u32,
        episodes: u32,
        watched: u32,
    },

    #[error("episode [{season}, {episode}] does not exist")]
    NoSuchEpisode { season: u32, episode: u32 },

    #[error("no other series to move to")]
    NoOtherSeries,

    #[error("no more episodes in season {season} of {name}")]
    SeasonNotFound { name: String, season: u32 },
}

pub(crate) type TrackerResult<T> = Result<T, TrackerError>;
