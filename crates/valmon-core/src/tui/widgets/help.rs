//! Help popup widget: keybindings, mouse, and column descriptions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::document::RECENT_SLASH_HEIGHT;
use crate::tui::style::Styles;

const KEYS: &[(&str, &str)] = &[
    ("↑/↓ j/k", "select row"),
    ("PgUp/PgDn", "move 20 rows"),
    ("Home/End", "first / last row"),
    ("←/→ h/l", "move focus between clickable columns"),
    ("Enter", "open or close the focused column's detail"),
    ("J", "jail history"),
    ("F", "recent jails only"),
    ("C", "creation block and transaction"),
    ("I", "identity: keys and addresses"),
    ("s", "sort by next column"),
    ("r", "reverse sort"),
    ("x", "back to document order"),
    ("/", "filter by valoper or moniker"),
    ("[ ]", "previous / next page"),
    ("Esc", "close detail, then clear filter"),
    ("q", "quit (Ctrl-C quits at once)"),
];

const MOUSE: &[(&str, &str)] = &[
    ("click header", "sort; click again to reverse"),
    ("click cell", "underlined columns open a detail below the row"),
    ("wheel", "select row"),
];

fn entry(key: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>14}  ", key), Styles::help_key()),
        Span::raw(text.to_string()),
    ])
}

fn help_content() -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled("Keys", Styles::section_header()))];
    lines.extend(KEYS.iter().map(|(k, t)| entry(k, t)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Mouse", Styles::section_header())));
    lines.extend(MOUSE.iter().map(|(k, t)| entry(k, t)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Columns", Styles::section_header())));
    lines.extend([
        entry("#", "position in the current view"),
        entry("UPTIME%", "signed / (signed + missed), 0.00 when inactive"),
        entry("ACTIVE", "signed + missed blocks"),
        entry("JAILS", "slash events; green when none"),
        entry(
            "JAILS>1M",
            &format!("slash events above height {}", RECENT_SLASH_HEIGHT),
        ),
        entry("CREATED", "creation block height"),
    ]);
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let popup_width = (area.width * 60 / 100).clamp(40, 80).min(area.width);
    let popup_height = (area.height * 80 / 100).clamp(10, 34).min(area.height);
    let popup_area = Rect::new(
        area.x + area.width.saturating_sub(popup_width) / 2,
        area.y + area.height.saturating_sub(popup_height) / 2,
        popup_width,
        popup_height,
    );

    frame.render_widget(Clear, popup_area);

    let content = help_content();
    let content_lines = content.len();

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Styles::panel_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Styles::default());
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("?", Styles::help_key()),
        Span::styled(" or ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" to close, ", Styles::help()),
        Span::styled("↑↓", Styles::help_key()),
        Span::styled(" to scroll", Styles::help()),
        Span::styled(scroll_info, Styles::help()),
    ]));
    frame.render_widget(footer, chunks[1]);
}
