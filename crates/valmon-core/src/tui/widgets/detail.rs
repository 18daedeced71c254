//! Detail panel drawn beneath an expanded row.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::tui::style::Styles;
use crate::view::detail::{DetailBody, DetailView};

/// Key-value line. Key is right-aligned with colon.
fn kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>18}: ", key), Styles::label()),
        Span::raw(value.to_string()),
    ])
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<Constraint> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let widest = rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0);
            Constraint::Length(u16::try_from(widest).unwrap_or(u16::MAX))
        })
        .collect()
}

/// Borders plus one content line.
const MIN_FRAMED_HEIGHT: u16 = 3;

pub fn render_detail_panel(frame: &mut Frame, area: Rect, view: &DetailView) {
    frame.render_widget(Clear, area);

    if area.height < MIN_FRAMED_HEIGHT {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", view.title), Styles::panel_border()),
            Span::styled("(enlarge the terminal for details)", Styles::dim()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL)
        .border_style(Styles::panel_border())
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &view.body {
        DetailBody::Table { headers, rows } => {
            let header = Row::new(headers.iter().map(|h| Span::styled(*h, Styles::section_header())));
            let body = rows.iter().map(|r| Row::new(r.clone()));
            let table = Table::new(body, column_widths(headers, rows))
                .header(header)
                .column_spacing(3);
            frame.render_widget(table, inner);
        }
        DetailBody::Fields(fields) => {
            let lines: Vec<Line> = fields.iter().map(|(k, v)| kv(k, v)).collect();
            frame.render_widget(Paragraph::new(lines), inner);
        }
    }
}
