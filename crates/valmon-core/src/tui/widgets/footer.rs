//! Footer: key hints, page and focused column.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::Styles;

const HINTS: &[(&str, &str)] = &[
    ("↑↓", "row"),
    ("←→", "column"),
    ("Enter", "detail"),
    ("s/r/x", "sort"),
    ("/", "filter"),
    ("[ ]", "page"),
    ("?", "help"),
    ("q", "quit"),
];

pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([Constraint::Min(10), Constraint::Length(32)]).split(area);

    let spans: Vec<Span> = HINTS
        .iter()
        .flat_map(|(key, text)| {
            [
                Span::styled(format!(" {}", key), Styles::help_key()),
                Span::styled(format!(" {} ", text), Styles::help()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let matched = state.matched_len();
    let status = format!(
        "focus: {}  page {}/{} ",
        state.focused_trigger.label(),
        state.table.page + 1,
        state.table.page_count(matched)
    );
    frame.render_widget(
        Paragraph::new(Line::from(status).right_aligned()).style(Styles::help()),
        chunks[1],
    );
}
