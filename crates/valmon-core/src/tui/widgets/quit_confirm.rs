//! Quit confirmation popup widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

/// Renders a centered quit confirmation popup.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup_width = (area.width * 40 / 100).clamp(34, 50).min(area.width);
    let popup_height = 6.min(area.height);
    let popup_area = Rect::new(
        area.x + area.width.saturating_sub(popup_width) / 2,
        area.y + area.height.saturating_sub(popup_height) / 2,
        popup_width,
        popup_height,
    );

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Exit valmon ")
        .borders(Borders::ALL)
        .border_style(Styles::panel_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from("Quit the validator table?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("q", Styles::help_key()),
            Span::styled(" quit   ", Styles::help()),
            Span::styled("Esc", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("n", Styles::help_key()),
            Span::styled(" cancel", Styles::help()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .style(Styles::default()),
        inner,
    );
}
