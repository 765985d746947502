/// A tracked show: its season list and the viewing pointer into it.
///
/// The pointer is `(cur_season, last_episode)`, where `last_episode == 0`
/// means nothing of `cur_season` has been watched yet. Fields are only
/// writable from inside `tracker`, so the editor and the progression engine
/// are the only code paths able to move the pointer or reshape the seasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Series {
    pub(super) name: String,
    pub(super) seasons: Vec<u32>,
    pub(super) cur_season: u32,
    pub(super) last_episode: u32,
    pub(super) deleted: bool,
}

impl Series {
    /// `name` must already be normalized; counts must be at least one.
    pub(super) fn with_uniform_seasons(name: String, season_count: u32, episodes: u32) -> Self {
        Self {
            name,
            seasons: vec![episodes; season_count as usize],
            cur_season: 1,
            last_episode: 0,
            deleted: false,
        }
    }

    /// Rebuilds a series from stored fields. Returns `None` when the values
    /// break the pointer or season-count invariants.
    pub(crate) fn restore(
        name: String,
        seasons: Vec<u32>,
        cur_season: u32,
        last_episode: u32,
        deleted: bool,
    ) -> Option<Self> {
        let series = Self {
            name,
            seasons,
            cur_season,
            last_episode,
            deleted,
        };
        series.is_consistent().then_some(series)
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn seasons(&self) -> &[u32] {
        &self.seasons
    }

    pub(crate) fn season_count(&self) -> u32 {
        self.seasons.len() as u32
    }

    pub(crate) fn cur_season(&self) -> u32 {
        self.cur_season
    }

    pub(crate) fn last_episode(&self) -> u32 {
        self.last_episode
    }

    pub(crate) fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Episode count of a 1-based season, if it exists.
    pub(crate) fn episodes_in(&self, season: u32) -> Option<u32> {
        let idx = season.checked_sub(1)? as usize;
        self.seasons.get(idx).copied()
    }

    pub(crate) fn has_season(&self, season: u32) -> bool {
        self.episodes_in(season).is_some()
    }

    /// Whether `(season, episode)` is a valid pointer position. Episode `0`
    /// is the position before the first episode of the season.
    pub(crate) fn has_episode(&self, season: u32, episode: u32) -> bool {
        self.episodes_in(season)
            .is_some_and(|episodes| episode <= episodes)
    }

    pub(crate) fn cur_season_episodes(&self) -> u32 {
        self.episodes_in(self.cur_season).unwrap_or(0)
    }

    pub(crate) fn next_season(&self) -> Option<u32> {
        let next = self.cur_season + 1;
        self.has_season(next).then_some(next)
    }

    pub(crate) fn season_finished(&self) -> bool {
        self.last_episode >= self.cur_season_episodes()
    }

    pub(crate) fn is_consistent(&self) -> bool {
        !self.seasons.is_empty()
            && self.seasons.iter().all(|&episodes| episodes >= 1)
            && self.has_episode(self.cur_season, self.last_episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_seasons_start_before_first_episode() {
        let series = Series::with_uniform_seasons("Dark".to_string(), 3, 10);
        assert_eq!(series.seasons(), &[10, 10, 10]);
        assert_eq!(series.cur_season(), 1);
        assert_eq!(series.last_episode(), 0);
        assert!(!series.is_deleted());
        assert!(series.is_consistent());
    }

    #[test]
    fn has_episode_accepts_season_start_and_end() {
        let series = Series::with_uniform_seasons("Dark".to_string(), 2, 8);
        assert!(series.has_episode(1, 0));
        assert!(series.has_episode(2, 8));
        assert!(!series.has_episode(2, 9));
        assert!(!series.has_episode(0, 0));
        assert!(!series.has_episode(3, 0));
    }

    #[test]
    fn next_season_is_none_on_last_season() {
        let mut series = Series::with_uniform_seasons("Dark".to_string(), 2, 8);
        assert_eq!(series.next_season(), Some(2));
        series.cur_season = 2;
        assert_eq!(series.next_season(), None);
    }

    #[test]
    fn restore_rejects_pointer_past_season_end() {
        assert!(Series::restore("Dark".to_string(), vec![5], 1, 6, false).is_none());
        assert!(Series::restore("Dark".to_string(), vec![5], 2, 0, false).is_none());
        assert!(Series::restore("Dark".to_string(), vec![], 1, 0, false).is_none());
        assert!(Series::restore("Dark".to_string(), vec![5, 0], 1, 0, false).is_none());
        assert!(Series::restore("Dark".to_string(), vec![5, 3], 2, 3, true).is_some());
    }
}
