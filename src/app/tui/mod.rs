mod actions;
mod render;
mod session;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::TableState;
use tracing::warn;

use crate::db::Database;
use crate::tracker::Catalog;
use crate::tracker::report::SummaryRow;

use self::actions::{
    delete_series, refresh_rows, run_selected_action, selected_row, status_error, status_info,
};
use self::render::draw_tui;
use self::session::TerminalSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TuiAction {
    /// Advance the current series, rolling over or rotating as needed.
    Next,
    /// Advance the highlighted series within its season.
    Watch,
    Select,
    AddSeason,
    DropSeason,
}

impl TuiAction {
    pub(crate) const ALL: [Self; 5] = [
        Self::Next,
        Self::Watch,
        Self::Select,
        Self::AddSeason,
        Self::DropSeason,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Next => "NEXT",
            Self::Watch => "WATCH",
            Self::Select => "SELECT",
            Self::AddSeason => "+SEASON",
            Self::DropSeason => "-SEASON",
        }
    }

    /// Key that runs the action directly from the library view.
    pub(crate) fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('n') => Some(Self::Next),
            KeyCode::Char('o') => Some(Self::Watch),
            KeyCode::Enter => Some(Self::Select),
            KeyCode::Char('a') => Some(Self::AddSeason),
            KeyCode::Char('x') => Some(Self::DropSeason),
            _ => None,
        }
    }

    pub(crate) fn key_hint(self) -> &'static str {
        match self {
            Self::Next => "n",
            Self::Watch => "o",
            Self::Select => "Enter",
            Self::AddSeason => "a",
            Self::DropSeason => "x",
        }
    }

    pub(crate) fn needs_selection(self) -> bool {
        !matches!(self, Self::Next)
    }
}

#[derive(Debug, Clone)]
pub(super) struct PendingDelete {
    pub(super) name: String,
}

/// Table contents and selection of the library panel.
pub(super) struct LibraryView {
    pub(super) rows: Vec<SummaryRow>,
    pub(super) table_state: TableState,
    pub(super) show_legacy: bool,
}

pub(crate) fn run_tui(db: &Database, mut catalog: Catalog) -> Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to initialize terminal backend")?;
    terminal.clear()?;

    let mut view = LibraryView {
        rows: Vec::new(),
        table_state: TableState::default(),
        show_legacy: false,
    };
    refresh_rows(&catalog, &mut view, catalog.current());
    let mut last_action = None::<TuiAction>;
    let mut pending_delete = None::<PendingDelete>;
    let mut dirty = false;
    let mut last_saved = db.last_saved()?;
    let mut status = if catalog.is_empty() {
        status_info("No series tracked yet. Run `showtrack add NAME` to start.")
    } else {
        status_info("Ready.")
    };

    loop {
        terminal.draw(|frame| {
            draw_tui(
                frame,
                &catalog,
                &mut view,
                last_action,
                &status,
                pending_delete.as_ref(),
                last_saved.as_deref(),
            )
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(dialog) = pending_delete.take() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    match delete_series(&mut catalog, &dialog.name) {
                        Ok(msg) => {
                            dirty = true;
                            status = status_info(&msg);
                        }
                        Err(err) => status = status_error(&format!("Delete failed: {err}")),
                    }
                    refresh_rows(&catalog, &mut view, None);
                }
                KeyCode::Esc | KeyCode::Char('n') => status = status_info("Delete canceled."),
                _ => pending_delete = Some(dialog),
            }
            continue;
        }

        if let Some(action) = TuiAction::from_key(key.code) {
            let selected = selected_row(&view).map(|row| row.name.clone());
            match run_selected_action(&mut catalog, action, selected.as_deref()) {
                Ok(outcome) => {
                    dirty |= outcome.mutated;
                    status = status_info(&outcome.lines.join("  "));
                }
                Err(msg) => status = status_error(&msg),
            }
            let preferred = match action {
                TuiAction::Next => catalog.current().map(str::to_string),
                _ => selected,
            };
            refresh_rows(&catalog, &mut view, preferred.as_deref());
            last_action = Some(action);
            continue;
        }

        match key.code {
            KeyCode::Char('q') => break,
            KeyCode::Up => {
                if let Some(selected) = view.table_state.selected() {
                    view.table_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = view.table_state.selected()
                    && !view.rows.is_empty()
                {
                    let next = (selected + 1).min(view.rows.len().saturating_sub(1));
                    view.table_state.select(Some(next));
                }
            }
            KeyCode::Char('l') => {
                view.show_legacy = !view.show_legacy;
                let keep = selected_row(&view).map(|row| row.name.clone());
                refresh_rows(&catalog, &mut view, keep.as_deref());
                status = if view.show_legacy {
                    status_info("Showing legacy series.")
                } else {
                    status_info("Hiding legacy series.")
                };
            }
            KeyCode::Char('w') => match db.save_catalog(&catalog) {
                Ok(()) => {
                    dirty = false;
                    last_saved = db.last_saved()?;
                    status = status_info("Saved.");
                }
                Err(err) => {
                    warn!(error = %err, "save from dashboard failed");
                    status = status_error(&format!("Save failed: {err}"));
                }
            },
            KeyCode::Char('d') => {
                let Some(row) = selected_row(&view) else {
                    status = status_error("Delete failed: no series selected.");
                    continue;
                };
                if row.is_deleted {
                    status = status_error(&format!("{} is already deleted.", row.name));
                    continue;
                }
                pending_delete = Some(PendingDelete {
                    name: row.name.clone(),
                });
                status = status_info("Confirm delete: y/Enter to delete, n/Esc to cancel.");
            }
            _ => {}
        }
    }

    if dirty {
        db.save_catalog(&catalog)?;
    }
    terminal.show_cursor()?;
    session.leave()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_keys_map_to_dashboard_actions() {
        assert_eq!(TuiAction::from_key(KeyCode::Char('n')), Some(TuiAction::Next));
        assert_eq!(TuiAction::from_key(KeyCode::Char('o')), Some(TuiAction::Watch));
        assert_eq!(TuiAction::from_key(KeyCode::Enter), Some(TuiAction::Select));
        assert_eq!(
            TuiAction::from_key(KeyCode::Char('a')),
            Some(TuiAction::AddSeason)
        );
        assert_eq!(
            TuiAction::from_key(KeyCode::Char('x')),
            Some(TuiAction::DropSeason)
        );
    }

    #[test]
    fn view_keys_are_not_catalog_actions() {
        for key in ['d', 'l', 'w', 'q'] {
            assert_eq!(TuiAction::from_key(KeyCode::Char(key)), None);
        }
        assert_eq!(TuiAction::from_key(KeyCode::Up), None);
        assert_eq!(TuiAction::from_key(KeyCode::Left), None);
    }

    #[test]
    fn hints_name_the_bound_keys() {
        for action in TuiAction::ALL {
            let code = match action.key_hint() {
                "Enter" => KeyCode::Enter,
                hint => KeyCode::Char(hint.chars().next().unwrap_or_default()),
            };
            assert_eq!(TuiAction::from_key(code), Some(action));
        }
    }
}
