use super::catalog::Catalog;
use super::series::Series;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SummaryRow {
    pub(crate) name: String,
    pub(crate) is_current: bool,
    pub(crate) is_deleted: bool,
    pub(crate) season_count: u32,
    pub(crate) avg_episodes: f64,
    pub(crate) cur_season: u32,
    pub(crate) last_episode: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeasonRow {
    pub(crate) season: u32,
    pub(crate) episodes: u32,
    /// Episode carrying the watch marker, if it falls in this season.
    pub(crate) marked: Option<u32>,
}

/// The last watched episode overall. A pointer parked at the start of a
/// season points back at the final episode of the previous one.
pub(crate) fn position_marker(series: &Series) -> Option<(u32, u32)> {
    let season = series.cur_season();
    let episode = series.last_episode();
    if episode > 0 {
        return Some((season, episode));
    }
    let previous = season.checked_sub(1).filter(|&s| s >= 1)?;
    series.episodes_in(previous).map(|episodes| (previous, episodes))
}

pub(crate) fn average_episodes_per_season(series: &Series) -> f64 {
    average_episodes(series.seasons())
}

pub(crate) fn average_episodes(seasons: &[u32]) -> f64 {
    if seasons.is_empty() {
        return 0.0;
    }
    let total: u64 = seasons.iter().map(|&episodes| u64::from(episodes)).sum();
    total as f64 / seasons.len() as f64
}

pub(crate) fn legacy_names(catalog: &Catalog) -> Vec<&str> {
    catalog
        .iter()
        .filter(|series| series.is_deleted())
        .map(Series::name)
        .collect()
}

pub(crate) fn summary_rows(catalog: &Catalog, include_deleted: bool) -> Vec<SummaryRow> {
    catalog
        .iter()
        .filter(|series| include_deleted || !series.is_deleted())
        .map(|series| SummaryRow {
            name: series.name().to_string(),
            is_current: catalog.is_current(series.name()),
            is_deleted: series.is_deleted(),
            season_count: series.season_count(),
            avg_episodes: average_episodes_per_season(series),
            cur_season: series.cur_season(),
            last_episode: series.last_episode(),
        })
        .collect()
}

pub(crate) fn season_rows(series: &Series) -> Vec<SeasonRow> {
    let marker = position_marker(series);
    series
        .seasons()
        .iter()
        .zip(1..)
        .map(|(&episodes, season)| SeasonRow {
            season,
            episodes,
            marked: marker
                .filter(|&(marked_season, _)| marked_season == season)
                .map(|(_, episode)| episode),
        })
        .collect()
}
