use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Gauge, Padding, Paragraph, Row, Table, Wrap,
};

use crate::tracker::report::{SummaryRow, season_rows};
use crate::tracker::{Catalog, Series};

use super::super::display::{display_name, format_saved_at, position_label, season_line, truncate};
use super::actions::selected_row;
use super::{LibraryView, PendingDelete, TuiAction};

const ACCENT: Color = Color::Rgb(110, 170, 255);
const MUTED: Color = Color::Rgb(185, 195, 210);

#[allow(clippy::too_many_arguments)]
pub(super) fn draw_tui(
    frame: &mut Frame,
    catalog: &Catalog,
    view: &mut LibraryView,
    last_action: Option<TuiAction>,
    status: &str,
    pending_delete: Option<&PendingDelete>,
    last_saved: Option<&str>,
) {
    let bg = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(bg, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let active = catalog.active_names().len();
    let current_text = catalog
        .current_series()
        .map(|series| {
            format!(
                "{} {}",
                truncate(series.name(), 24),
                position_label(series.cur_season(), series.last_episode())
            )
        })
        .unwrap_or_else(|| "-".to_string());
    let saved_text = last_saved
        .map(format_saved_at)
        .unwrap_or_else(|| "never".to_string());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "SHOWTRACK",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(format!("{active} active"), Style::default().fg(MUTED)),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("current {current_text}"),
            Style::default().fg(MUTED),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(format!("saved {saved_text}"), Style::default().fg(MUTED)),
        Span::styled("   ", Style::default()),
        Span::styled(
            last_action.map(TuiAction::label).unwrap_or_default(),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(panel_block("Dashboard"));
    frame.render_widget(header, chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[1]);
    let details_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(body_chunks[1]);

    let rows: Vec<Row> = view.rows.iter().map(library_row).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Name", "Seasons", "Avg Eps", "Last Seen"])
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    )
    .block(panel_block(if view.show_legacy {
        "Library (with legacy)"
    } else {
        "Library"
    }))
    .row_highlight_style(
        Style::default()
            .bg(ACCENT)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▸ ");
    frame.render_stateful_widget(table, body_chunks[0], &mut view.table_state);

    let selected = selected_row(view).and_then(|row| catalog.lookup_any(&row.name).ok());
    let details = match selected {
        Some(series) => details_text(series, catalog.is_current(series.name())),
        None => "No series tracked yet.\n\nAdd one with `showtrack add NAME`.".to_string(),
    };
    let details_widget = Paragraph::new(details)
        .style(Style::default().fg(Color::Rgb(230, 230, 230)))
        .block(panel_block("Seasons"))
        .alignment(Alignment::Left);
    frame.render_widget(details_widget, details_chunks[0]);

    if let Some(series) = selected
        && let Some((ratio, label)) = season_progress(series)
    {
        let progress = Gauge::default()
            .block(panel_block("Season Progress"))
            .gauge_style(
                Style::default()
                    .fg(Color::Rgb(130, 190, 255))
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .label(label)
            .ratio(ratio);
        frame.render_widget(progress, details_chunks[1]);
    }

    let command_bar = Paragraph::new(controls_line(last_action))
        .alignment(Alignment::Center)
        .block(panel_block("Controls"));
    frame.render_widget(command_bar, chunks[2]);

    let status_widget = Paragraph::new(status.to_string())
        .style(status_style(status))
        .block(panel_block("Status"));
    frame.render_widget(status_widget, chunks[3]);

    if let Some(confirm) = pending_delete {
        let popup_text = format!(
            "Delete series?\n\n{}\n\nIt stays visible as a legacy series.\n\n[y / Enter] Delete   [n / Esc] Cancel",
            truncate(&confirm.name, 56)
        );
        let popup_area = popup_rect_for_text(frame.area(), &popup_text);
        render_popup_shadow(frame, popup_area);
        frame.render_widget(Clear, popup_area);
        let popup = Paragraph::new(popup_text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(modal_block("Confirm Delete"));
        frame.render_widget(popup, popup_area);
    }
}

fn library_row(row: &SummaryRow) -> Row<'static> {
    let style = if row.is_deleted {
        Style::default().fg(Color::Rgb(110, 115, 125))
    } else {
        Style::default()
    };
    Row::new(vec![
        Cell::from(display_name(row)),
        Cell::from(row.season_count.to_string()),
        Cell::from(format!("{:.1}", row.avg_episodes)),
        Cell::from(position_label(row.cur_season, row.last_episode)),
    ])
    .style(style)
}

fn details_text(series: &Series, is_current: bool) -> String {
    let mut text = format!(
        "{}{}\n\nSeason Episodes\n",
        truncate(series.name(), 36),
        if is_current { "  (current)" } else { "" }
    );
    for row in season_rows(series) {
        text.push_str(&season_line(&row));
        text.push('\n');
    }
    if series.is_deleted() {
        text.push_str("\nLegacy series");
    }
    text
}

/// Fraction of the pointer's season already watched, with a gauge label.
pub(super) fn season_progress(series: &Series) -> Option<(f64, String)> {
    let total = series.cur_season_episodes();
    if total == 0 {
        return None;
    }
    let watched = series.last_episode().min(total);
    let ratio = (f64::from(watched) / f64::from(total)).clamp(0.0, 1.0);
    Some((
        ratio,
        format!("S{} {watched}/{total}", series.cur_season()),
    ))
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(125, 135, 150)))
        .title(title)
}

fn modal_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(
            Style::default()
                .fg(Color::Rgb(160, 190, 235))
                .add_modifier(Modifier::BOLD),
        )
        .title(title)
        .padding(Padding::new(2, 2, 1, 1))
}

fn action_pill_style(action: TuiAction, last: Option<TuiAction>) -> Style {
    if last == Some(action) {
        Style::default()
            .bg(ACCENT)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(Color::Rgb(72, 82, 96))
            .fg(Color::Rgb(230, 235, 242))
    }
}

fn controls_line(last: Option<TuiAction>) -> Line<'static> {
    let mut spans = Vec::new();
    for action in TuiAction::ALL {
        spans.push(Span::styled(
            format!(" {} {} ", action.key_hint(), action.label()),
            action_pill_style(action, last),
        ));
        spans.push(Span::styled(" ", Style::default()));
    }
    spans.push(Span::styled(
        "  ↑/↓ move  d delete  l legacy  w save  q quit",
        Style::default().fg(MUTED),
    ));
    Line::from(spans)
}

fn status_style(status: &str) -> Style {
    if status.starts_with("ERROR:") {
        Style::default()
            .fg(Color::Rgb(255, 145, 120))
            .add_modifier(Modifier::BOLD)
    } else if status.starts_with("INFO:") {
        Style::default().fg(Color::Rgb(205, 165, 255))
    } else {
        Style::default().fg(Color::Rgb(230, 235, 242))
    }
}

fn render_popup_shadow(frame: &mut Frame, popup_area: Rect) {
    let area = frame.area();
    let shadow = Rect::new(
        (popup_area.x + 1).min(area.x + area.width.saturating_sub(1)),
        (popup_area.y + 1).min(area.y + area.height.saturating_sub(1)),
        popup_area.width.saturating_sub(1),
        popup_area.height.saturating_sub(1),
    );
    if shadow.width == 0 || shadow.height == 0 {
        return;
    }
    let shadow_block = Block::default().style(Style::default().bg(Color::Rgb(14, 16, 24)));
    frame.render_widget(shadow_block, shadow);
}

fn popup_rect_for_text(area: Rect, text: &str) -> Rect {
    let max_line_width = text
        .lines()
        .map(|line| line.chars().count() as u16)
        .max()
        .unwrap_or(0);
    let line_count = text.lines().count() as u16;

    let width = max_line_width
        .saturating_add(12)
        .clamp(48.min(area.width.max(1)), 72.min(area.width.max(1)));
    let height = line_count
        .saturating_add(6)
        .clamp(10.min(area.height.max(1)), 18.min(area.height.max(1)));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_progress_reports_pointer_season() {
        let series = Series::restore("Dark".to_string(), vec![10, 8], 2, 2, false)
            .expect("fixture should be consistent");
        let (ratio, label) = season_progress(&series).expect("gauge should render");
        assert!((ratio - 0.25).abs() < 1e-9);
        assert_eq!(label, "S2 2/8");
    }

    #[test]
    fn controls_line_lists_every_action_key() {
        let text: String = controls_line(Some(TuiAction::Watch))
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        for hint in [" n NEXT ", " o WATCH ", " Enter SELECT ", " a +SEASON ", " x -SEASON "] {
            assert!(text.contains(hint), "missing {hint} in {text}");
        }
        assert!(!text.contains("←/→"));
    }

    #[test]
    fn popup_stays_inside_small_terminals() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = popup_rect_for_text(area, "Delete series?\n\nDark");
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
