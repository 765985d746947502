use crate::cli::{CatalogCommand, NameArgs, OptionalNameArgs, SetArgs, UpdateArgs};
use crate::tracker::Catalog;
use crate::tracker::report::{SummaryRow, summary_rows};

use super::super::commands::{CommandOutcome, describe_error, execute};
use super::{LibraryView, TuiAction};

/// Rebuilds the library rows, keeping the selection on `preferred` when it
/// is still listed, otherwise clamping the old index.
pub(super) fn refresh_rows(catalog: &Catalog, view: &mut LibraryView, preferred: Option<&str>) {
    view.rows = summary_rows(catalog, view.show_legacy);
    if view.rows.is_empty() {
        view.table_state.select(None);
        return;
    }

    if let Some(name) = preferred
        && let Some(idx) = view.rows.iter().position(|row| row.name == name)
    {
        view.table_state.select(Some(idx));
        return;
    }

    match view.table_state.selected() {
        Some(selected) => view
            .table_state
            .select(Some(selected.min(view.rows.len() - 1))),
        None => view.table_state.select(Some(0)),
    }
}

pub(super) fn selected_row(view: &LibraryView) -> Option<&SummaryRow> {
    view.table_state
        .selected()
        .and_then(|idx| view.rows.get(idx))
}

pub(super) fn status_info(msg: &str) -> String {
    format!("INFO: {msg}")
}

pub(super) fn status_error(msg: &str) -> String {
    format!("ERROR: {msg}")
}

/// Maps a dashboard action onto the same command the shell would run.
pub(super) fn command_for(action: TuiAction, selected: Option<&str>) -> Option<CatalogCommand> {
    let name = name_words(selected.unwrap_or_default());
    if action.needs_selection() && name.is_empty() {
        return None;
    }
    let command = match action {
        TuiAction::Next => CatalogCommand::One(OptionalNameArgs { name: Vec::new() }),
        TuiAction::Watch => CatalogCommand::One(OptionalNameArgs { name }),
        TuiAction::Select => CatalogCommand::Set(SetArgs {
            name,
            episode: Vec::new(),
        }),
        TuiAction::AddSeason => CatalogCommand::Update(UpdateArgs {
            name,
            add: true,
            delete: false,
            change: None,
            episodes: 0,
        }),
        TuiAction::DropSeason => CatalogCommand::Update(UpdateArgs {
            name,
            add: false,
            delete: true,
            change: None,
            episodes: 0,
        }),
    };
    Some(command)
}

pub(super) fn run_selected_action(
    catalog: &mut Catalog,
    action: TuiAction,
    selected: Option<&str>,
) -> Result<CommandOutcome, String> {
    let Some(command) = command_for(action, selected) else {
        return Err("No series selected.".to_string());
    };
    execute(catalog, &command).map_err(|err| describe_error(&err).join("  "))
}

pub(super) fn delete_series(catalog: &mut Catalog, name: &str) -> Result<String, String> {
    let command = CatalogCommand::Delete(NameArgs {
        name: name_words(name),
    });
    execute(catalog, &command)
        .map(|outcome| outcome.lines.join("  "))
        .map_err(|err| describe_error(&err).join("  "))
}

fn name_words(name: &str) -> Vec<String> {
    name.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use ratatui::widgets::TableState;

    fn view_for(catalog: &Catalog) -> LibraryView {
        let mut view = LibraryView {
            rows: Vec::new(),
            table_state: TableState::default(),
            show_legacy: false,
        };
        refresh_rows(catalog, &mut view, None);
        view
    }

    #[test]
    fn refresh_rows_prefers_named_series() {
        let mut catalog = Catalog::new();
        for name in ["Dark", "Lost", "Fargo"] {
            catalog.add(name, 1, 3).expect("add should succeed");
        }
        let mut view = view_for(&catalog);
        assert_eq!(view.table_state.selected(), Some(0));
        refresh_rows(&catalog, &mut view, Some("Fargo"));
        assert_eq!(selected_row(&view).map(|row| row.name.as_str()), Some("Fargo"));
    }

    #[test]
    fn refresh_rows_clamps_when_rows_shrink() {
        let mut catalog = Catalog::new();
        for name in ["Dark", "Lost", "Fargo"] {
            catalog.add(name, 1, 3).expect("add should succeed");
        }
        let mut view = view_for(&catalog);
        view.table_state.select(Some(2));
        catalog.soft_delete("Fargo").expect("delete should succeed");
        refresh_rows(&catalog, &mut view, None);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.table_state.selected(), Some(1));
    }

    #[test]
    fn selection_actions_require_a_row() {
        assert!(command_for(TuiAction::Watch, None).is_none());
        assert!(command_for(TuiAction::Next, None).is_some());
    }

    #[test]
    fn dashboard_actions_drive_the_catalog() {
        let mut catalog = Catalog::new();
        catalog.add("Dark", 1, 2).expect("add should succeed");
        catalog.add("Lost", 1, 2).expect("add should succeed");

        run_selected_action(&mut catalog, TuiAction::Select, Some("Lost"))
            .expect("select should succeed");
        assert_eq!(catalog.current(), Some("Lost"));

        run_selected_action(&mut catalog, TuiAction::AddSeason, Some("Lost"))
            .expect("season add should succeed");
        let lost = catalog.lookup_active("Lost").expect("lost exists");
        assert_eq!(lost.seasons(), &[2, 2]);

        let err = run_selected_action(&mut catalog, TuiAction::DropSeason, Some("Dark"))
            .expect_err("single season cannot be dropped");
        assert!(err.contains("cannot delete season 1"));

        let msg = delete_series(&mut catalog, "Dark").expect("delete should succeed");
        assert!(msg.starts_with("Deleted Dark"));
    }

    #[test]
    fn action_keys_drive_the_catalog() {
        let mut catalog = Catalog::new();
        catalog.add("Dark", 1, 2).expect("add should succeed");
        catalog.add("Lost", 2, 2).expect("add should succeed");
        let press = |code| TuiAction::from_key(code).expect("key should be bound");

        run_selected_action(&mut catalog, press(KeyCode::Char('n')), Some("Lost"))
            .expect("next should advance the current series");
        let dark = catalog.lookup_active("Dark").expect("dark exists");
        assert_eq!((dark.cur_season(), dark.last_episode()), (1, 1));

        run_selected_action(&mut catalog, press(KeyCode::Char('o')), Some("Lost"))
            .expect("watch should advance the highlighted series");
        let lost = catalog.lookup_active("Lost").expect("lost exists");
        assert_eq!((lost.cur_season(), lost.last_episode()), (1, 1));
        assert_eq!(catalog.current(), Some("Dark"));

        run_selected_action(&mut catalog, press(KeyCode::Enter), Some("Lost"))
            .expect("enter should select the highlighted series");
        assert_eq!(catalog.current(), Some("Lost"));

        run_selected_action(&mut catalog, press(KeyCode::Char('a')), Some("Dark"))
            .expect("season add should succeed");
        run_selected_action(&mut catalog, press(KeyCode::Char('x')), Some("Dark"))
            .expect("new trailing season can be dropped");
        let dark = catalog.lookup_active("Dark").expect("dark exists");
        assert_eq!(dark.seasons(), &[2]);
    }
}
