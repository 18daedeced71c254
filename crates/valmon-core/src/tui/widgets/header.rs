//! Header bar: source, counts, filter input, load failure, clock.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt;
use crate::tui::state::{AppState, InputMode};
use crate::tui::style::Styles;

/// Source path or URL is shown up to this many characters.
const SOURCE_MAX_CHARS: usize = 48;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Min(20),    // Source and counts
        Constraint::Length(44), // Filter/Status/Error
        Constraint::Length(20), // Time
    ])
    .split(area);

    let mut left = vec![
        Span::styled(format!(" valmon {} ", crate::VERSION), Styles::header()),
        Span::styled(
            format!("│ {} ", fmt::truncate(&state.source, SOURCE_MAX_CHARS)),
            Styles::header(),
        ),
        Span::styled(
            format!("│ {} validators ", state.rows.len()),
            Styles::header(),
        ),
    ];
    if let Some(height) = state.document.latest_height {
        left.push(Span::styled(format!("│ height {} ", height), Styles::header()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(left)).style(Styles::header()),
        chunks[0],
    );

    let (right_content, right_style) = if let Some(err) = &state.load_error {
        (format!(" load failed: {}", err), Styles::error())
    } else if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::status())
    } else {
        match state.input_mode {
            InputMode::Filter => (
                format!("Filter: {}█", state.filter_input),
                Styles::filter_input(),
            ),
            InputMode::Normal => (
                state
                    .table
                    .filter
                    .as_deref()
                    .map(|f| format!("/{}", f))
                    .unwrap_or_default(),
                Styles::header(),
            ),
        }
    };
    frame.render_widget(
        Paragraph::new(right_content).style(right_style),
        chunks[1],
    );

    let time = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time).style(Styles::header()), chunks[2]);
}
