use tracing::debug;

use super::series::Series;
use super::{TrackerError, TrackerResult};

/// All tracked series in insertion order plus the current selection.
///
/// Series are never removed; deletion only sets their tombstone flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Catalog {
    series: Vec<Series>,
    current: Option<String>,
}

impl Catalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reassembles a catalog from stored series. Returns `None` on duplicate
    /// names, an inconsistent series, or a current selection that is missing
    /// or deleted.
    pub(crate) fn from_parts(series: Vec<Series>, current: Option<String>) -> Option<Self> {
        for (idx, item) in series.iter().enumerate() {
            if !item.is_consistent() || series[..idx].iter().any(|s| s.name == item.name) {
                return None;
            }
        }
        if let Some(name) = current.as_deref() {
            let target = series.iter().find(|s| s.name == name)?;
            if target.deleted {
                return None;
            }
        }
        Some(Self { series, current })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub(crate) fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub(crate) fn current_series(&self) -> Option<&Series> {
        let name = self.current.as_deref()?;
        self.series.iter().find(|s| s.name == name)
    }

    pub(crate) fn is_current(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
    }

    /// Every series, deleted ones included, in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub(crate) fn active_names(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|s| !s.deleted)
            .map(|s| s.name.as_str())
            .collect()
    }

    pub(crate) fn add(
        &mut self,
        name: &str,
        season_count: u32,
        episodes_per_season: u32,
    ) -> TrackerResult<&Series> {
        let name = normalize_name(name)?;
        if let Some(existing) = self.find(&name) {
            return Err(if existing.deleted {
                TrackerError::PreviouslyDeleted(name)
            } else {
                TrackerError::AlreadyTracked(name)
            });
        }
        if season_count < 1 || episodes_per_season < 1 {
            return Err(TrackerError::InvalidCount);
        }

        if self.series.is_empty() {
            self.current = Some(name.clone());
        }
        debug!(series = %name, season_count, episodes_per_season, "series added");
        self.series.push(Series::with_uniform_seasons(
            name,
            season_count,
            episodes_per_season,
        ));
        Ok(&self.series[self.series.len() - 1])
    }

    pub(crate) fn soft_delete(&mut self, name: &str) -> TrackerResult<()> {
        let name = normalize_name(name)?;
        if self.is_current(&name) {
            return Err(TrackerError::IsCurrent(name));
        }
        let series = self.find_mut(&name).ok_or(TrackerError::NotFound(name))?;
        series.deleted = true;
        debug!(series = %series.name, "series soft-deleted");
        Ok(())
    }

    pub(crate) fn select(&mut self, name: &str) -> TrackerResult<()> {
        let series = self.lookup_any(name)?;
        if series.deleted {
            return Err(TrackerError::Deleted(series.name.clone()));
        }
        let name = series.name.clone();
        debug!(series = %name, "current series selected");
        self.current = Some(name);
        Ok(())
    }

    pub(crate) fn lookup_active(&self, name: &str) -> TrackerResult<&Series> {
        let name = normalize_name(name)?;
        match self.find(&name) {
            Some(series) if !series.deleted => Ok(series),
            _ => Err(TrackerError::NotFound(name)),
        }
    }

    pub(crate) fn lookup_any(&self, name: &str) -> TrackerResult<&Series> {
        let name = normalize_name(name)?;
        self.find(&name).ok_or(TrackerError::NotFound(name))
    }

    /// Mutable access for edits: deleted series report [`TrackerError::Deleted`]
    /// rather than `NotFound`.
    pub(crate) fn resolve_mut(&mut self, name: &str) -> TrackerResult<&mut Series> {
        let name = normalize_name(name)?;
        match self.find_mut(&name) {
            Some(series) if series.deleted => Err(TrackerError::Deleted(name)),
            Some(series) => Ok(series),
            None => Err(TrackerError::NotFound(name)),
        }
    }

    pub(super) fn current_mut(&mut self) -> TrackerResult<&mut Series> {
        let name = self.current.clone().ok_or(TrackerError::NoCurrentSeries)?;
        self.find_mut(&name).ok_or(TrackerError::NotFound(name))
    }

    pub(super) fn set_current(&mut self, name: String) {
        self.current = Some(name);
    }

    fn find(&self, canonical: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == canonical)
    }

    fn find_mut(&mut self, canonical: &str) -> Option<&mut Series> {
        self.series.iter_mut().find(|s| s.name == canonical)
    }
}

/// Canonical storage key for a user-supplied series name: surrounding
/// whitespace trimmed, inner runs collapsed to one space, title-cased.
pub(crate) fn normalize_name(raw: &str) -> TrackerResult<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(TrackerError::EmptyName);
    }

    let mut out = String::with_capacity(collapsed.len());
    let mut prev_cased = false;
    for ch in collapsed.chars() {
        if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(names: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for name in names {
            catalog.add(name, 1, 10).expect("series should be added");
        }
        catalog
    }

    #[test]
    fn normalize_name_title_cases_and_collapses_whitespace() {
        assert_eq!(normalize_name("  the   wire ").as_deref(), Ok("The Wire"));
        assert_eq!(normalize_name("BREAKING bad").as_deref(), Ok("Breaking Bad"));
        assert_eq!(normalize_name("o'neil 3rd").as_deref(), Ok("O'Neil 3Rd"));
        assert_eq!(normalize_name("   "), Err(TrackerError::EmptyName));
    }

    #[test]
    fn first_added_series_becomes_current() {
        let mut catalog = Catalog::new();
        catalog.add("dark", 3, 10).expect("first add should succeed");
        catalog.add("lost", 6, 24).expect("second add should succeed");
        assert_eq!(catalog.current(), Some("Dark"));
        let lost = catalog.lookup_active("LOST").expect("lost should resolve");
        assert_eq!(lost.seasons(), &[24; 6]);
    }

    #[test]
    fn add_rejects_duplicates_and_zero_counts() {
        let mut catalog = catalog_with(&["Dark"]);
        assert_eq!(
            catalog.add(" dark ", 1, 1).map(|_| ()),
            Err(TrackerError::AlreadyTracked("Dark".to_string()))
        );
        assert_eq!(
            catalog.add("Lost", 0, 10).map(|_| ()),
            Err(TrackerError::InvalidCount)
        );
        assert_eq!(
            catalog.add("Lost", 2, 0).map(|_| ()),
            Err(TrackerError::InvalidCount)
        );
        assert_eq!(catalog.iter().count(), 1);
    }

    #[test]
    fn add_does_not_resurrect_deleted_series() {
        let mut catalog = catalog_with(&["Dark", "Lost"]);
        catalog.soft_delete("lost").expect("lost should be deletable");
        assert_eq!(
            catalog.add("Lost", 1, 1).map(|_| ()),
            Err(TrackerError::PreviouslyDeleted("Lost".to_string()))
        );
        assert!(catalog.lookup_any("Lost").expect("still stored").is_deleted());
    }

    #[test]
    fn soft_delete_refuses_current_and_unknown() {
        let mut catalog = catalog_with(&["Dark", "Lost"]);
        assert_eq!(
            catalog.soft_delete("dark"),
            Err(TrackerError::IsCurrent("Dark".to_string()))
        );
        assert_eq!(
            catalog.soft_delete("Fargo"),
            Err(TrackerError::NotFound("Fargo".to_string()))
        );
        assert!(catalog.active_names().contains(&"Dark"));
    }

    #[test]
    fn soft_delete_keeps_pointer_and_seasons() {
        let mut catalog = catalog_with(&["Dark", "Lost"]);
        let before = catalog.lookup_any("Lost").expect("lost exists").clone();
        catalog.soft_delete("Lost").expect("delete should succeed");
        let after = catalog.lookup_any("Lost").expect("lost still stored");
        assert!(after.is_deleted());
        assert_eq!(after.seasons(), before.seasons());
        assert_eq!(after.cur_season(), before.cur_season());
        assert_eq!(after.last_episode(), before.last_episode());
        assert_eq!(
            catalog.lookup_active("Lost").map(|_| ()),
            Err(TrackerError::NotFound("Lost".to_string()))
        );
    }

    #[test]
    fn select_rejects_deleted_series() {
        let mut catalog = catalog_with(&["Dark", "Lost", "Fargo"]);
        catalog.soft_delete("Fargo").expect("delete should succeed");
        assert_eq!(
            catalog.select("fargo"),
            Err(TrackerError::Deleted("Fargo".to_string()))
        );
        assert_eq!(catalog.current(), Some("Dark"));
        catalog.select("lost").expect("select should succeed");
        assert_eq!(catalog.current(), Some("Lost"));
    }

    #[test]
    fn lookups_do_not_mutate() {
        let catalog = catalog_with(&["Dark", "Lost"]);
        let snapshot = catalog.clone();
        for _ in 0..3 {
            let _ = catalog.lookup_active("dark");
            let _ = catalog.lookup_any("lost");
            let _ = catalog.lookup_any("missing");
        }
        assert_eq!(catalog, snapshot);
    }

    #[test]
    fn resolve_mut_distinguishes_deleted_from_missing() {
        let mut catalog = catalog_with(&["Dark", "Lost"]);
        catalog.soft_delete("Lost").expect("delete should succeed");
        assert_eq!(
            catalog.resolve_mut("lost").map(|_| ()),
            Err(TrackerError::Deleted("Lost".to_string()))
        );
        assert_eq!(
            catalog.resolve_mut("fargo").map(|_| ()),
            Err(TrackerError::NotFound("Fargo".to_string()))
        );
        assert!(catalog.resolve_mut("dark").is_ok());
    }

    #[test]
    fn from_parts_rejects_deleted_current() {
        let dark = Series::restore("Dark".to_string(), vec![10], 1, 0, true)
            .expect("series should be consistent");
        assert!(Catalog::from_parts(vec![dark.clone()], Some("Dark".to_string())).is_none());
        assert!(Catalog::from_parts(vec![dark.clone(), dark.clone()], None).is_none());
        assert!(Catalog::from_parts(vec![dark], None).is_some());
    }
}
