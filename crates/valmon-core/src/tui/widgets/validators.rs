//! Validators table widget.
//! Thin TUI wrapper over [`crate::view::validators::build_validators_view`],
//! plus the detail panel mounted beneath its row.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::rows::{RowHandle, col};
use crate::tui::state::{AppState, HitMap};
use crate::tui::style::Styles;
use crate::view::common::{TableViewModel, ViewRow};
use crate::view::detail::build_detail_view;

use super::render_detail_panel;

const COLUMN_SPACING: u16 = 1;

/// A line in the ratatui table: a data row or the spacer under which the
/// detail panel is drawn.
enum LayoutRow {
    Data(RowHandle),
    Panel(u16),
}

impl LayoutRow {
    fn height(&self) -> u16 {
        match self {
            LayoutRow::Data(_) => 1,
            LayoutRow::Panel(h) => *h,
        }
    }
}

fn header_row(vm: &TableViewModel<RowHandle>) -> Row<'static> {
    let cells: Vec<Span> = vm
        .columns
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let style = if spec.trigger.is_some() {
                Styles::trigger_header()
            } else {
                Styles::table_header()
            };
            Span::styled(vm.header_label(i), style)
        })
        .collect();
    Row::new(cells).style(Styles::table_header()).height(1)
}

fn data_row(
    vm: &TableViewModel<RowHandle>,
    vr: &ViewRow<RowHandle>,
    focused: Option<usize>,
    hover: Option<usize>,
) -> Row<'static> {
    let cells: Vec<Cell> = vr
        .cells
        .iter()
        .enumerate()
        .map(|(c, cell)| {
            let mut style = cell.style.map(Styles::from_class).unwrap_or_default();
            let is_trigger = vm.columns.get(c).is_some_and(|s| s.trigger.is_some());
            if is_trigger && (focused == Some(c) || hover == Some(c)) {
                style = style.patch(Styles::trigger_focus());
            }
            let alignment = if c == col::VALOPER {
                Alignment::Left
            } else {
                Alignment::Right
            };
            Cell::from(Line::from(Span::styled(cell.text.clone(), style)).alignment(alignment))
        })
        .collect();
    Row::new(cells).style(Styles::from_class(vr.style)).height(1)
}

/// Scroll offset that keeps `layout[spacer - 1..=spacer]` (the expanded row
/// and its panel) inside `available` lines, moving as little as possible from
/// `current`.
fn offset_showing(heights: &[u16], spacer: usize, available: u16, current: usize) -> usize {
    let row = spacer.saturating_sub(1);
    let mut offset = current.min(row);
    let span = |from: usize| -> u32 { heights[from..=spacer].iter().map(|&h| u32::from(h)).sum() };
    while offset < row && span(offset) > u32::from(available) {
        offset += 1;
    }
    offset
}

fn empty_message(state: &AppState, vm: &TableViewModel<RowHandle>) -> String {
    if let Some(err) = &state.load_error {
        format!("No data: {}", err)
    } else if vm.total == 0 {
        "No validators in document".to_string()
    } else {
        "No validators match the filter".to_string()
    }
}

pub fn render_validators(frame: &mut Frame, area: Rect, state: &mut AppState) {
    state.sync();
    let vm = state.view();

    let block = Block::default()
        .title(format!(" {} ", vm.title))
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(area);

    if vm.rows.is_empty() {
        state.hit_map = HitMap::default();
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(empty_message(state, &vm))
                .style(Styles::dim())
                .block(block),
            area,
        );
        return;
    }

    // Detail panel for the mounted row, sized to fit below the header and
    // the row itself.
    let rows_height = inner.height.saturating_sub(1);
    let mounted = state.panel.row().zip(state.panel.panel()).map(|(row, panel)| {
        let valoper = state
            .rows
            .get(row.0)
            .map(|r| r.valoper.as_str())
            .unwrap_or_default();
        (row, build_detail_view(panel, valoper))
    });
    let panel = mounted.and_then(|(row, view)| {
        let height = view
            .content_height()
            .saturating_add(2)
            .min(rows_height.saturating_sub(1));
        (height > 0).then_some((row, height, view))
    });

    let selected = state.table.selected;
    let selected_id = vm.rows.get(selected).map(|r| r.id);
    let focused_column = state.focused_trigger.column();

    let mut layout = Vec::with_capacity(vm.rows.len() + 1);
    let mut table_rows = Vec::with_capacity(vm.rows.len() + 1);
    let mut panel_index = None;
    for (idx, vr) in vm.rows.iter().enumerate() {
        let focused = (idx == selected).then_some(focused_column);
        let hover = state
            .hover
            .filter(|(row, _)| *row == vr.id)
            .map(|(_, c)| c);
        table_rows.push(data_row(&vm, vr, focused, hover));
        layout.push(LayoutRow::Data(vr.id));

        if let Some((row, height, _)) = &panel
            && *row == vr.id
        {
            panel_index = Some(idx);
            table_rows.push(Row::new(Vec::<Cell>::new()).height(*height));
            layout.push(LayoutRow::Panel(*height));
        }
    }

    // The spacer shifts every row below it by one.
    let ratatui_selected = match panel_index {
        Some(p) if p < selected => selected + 1,
        _ => selected,
    };
    state.ratatui_state.select(selected_id.map(|_| ratatui_selected));
    if let Some(p) = panel_index {
        let heights: Vec<u16> = layout.iter().map(LayoutRow::height).collect();
        let offset = state.ratatui_state.offset();
        *state.ratatui_state.offset_mut() = offset_showing(&heights, p + 1, rows_height, offset);
    }

    let constraints: Vec<Constraint> = vm.widths().map(Constraint::Length).collect();
    let column_rects = Layout::horizontal(constraints.clone())
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(Rect::new(inner.x, inner.y, inner.width, 1));

    let table = Table::new(table_rows, constraints)
        .header(header_row(&vm))
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .row_highlight_style(Styles::selected());

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, &mut state.ratatui_state);

    // Map what ratatui actually drew: rows from the scroll offset that fit
    // entirely below the header.
    let bottom = inner.y.saturating_add(inner.height);
    let mut y = inner.y.saturating_add(1);
    let mut hit_rows = Vec::new();
    let mut panel_area = None;
    for entry in layout.iter().skip(state.ratatui_state.offset()) {
        let height = entry.height();
        if y.saturating_add(height) > bottom {
            break;
        }
        match entry {
            LayoutRow::Data(handle) => hit_rows.push((y, *handle)),
            LayoutRow::Panel(h) => panel_area = Some(Rect::new(inner.x, y, inner.width, *h)),
        }
        y += height;
    }
    state.hit_map = HitMap::new(
        inner.y,
        column_rects.iter().map(|r| (r.x, r.width)).collect(),
        hit_rows,
    );

    if let (Some(rect), Some((_, _, view))) = (panel_area, &panel) {
        render_detail_panel(frame, rect, view);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::expand::Trigger;
    use crate::rows::RowHandle;
    use crate::tui::state::{Hit, sample_state};

    use super::*;

    fn draw(state: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render_validators(frame, frame.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_rows_with_rank_and_uptime() {
        let mut state = sample_state();
        let screen = draw(&mut state, 160, 12);
        assert!(screen.contains("VALOPER"));
        assert!(screen.contains("Validators (3)"));
        assert!(screen.contains("90.00"));
        assert!(screen.contains("99.00"));
    }

    #[test]
    fn expanded_panel_sits_below_its_row() {
        let mut state = sample_state();
        state.click(RowHandle(0), Trigger::Jails);
        let screen = draw(&mut state, 160, 16);
        let lines: Vec<&str> = screen.lines().collect();
        let row_line = lines.iter().position(|l| l.contains(" v1 ")).unwrap();
        let jail_line = lines.iter().position(|l| l.contains("500000")).unwrap();
        let next_row = lines.iter().position(|l| l.contains(" v2 ")).unwrap();
        assert!(row_line < jail_line && jail_line < next_row);
        assert!(lines[jail_line].contains("t1"));
    }

    #[test]
    fn hit_map_matches_drawn_rows() {
        let mut state = sample_state();
        state.click(RowHandle(0), Trigger::Identity);
        draw(&mut state, 160, 20);

        // border, header, v1, then the 9-line identity panel, then v2
        assert_eq!(state.hit_map.hit(2, 1), Some(Hit::Header(0)));
        assert_eq!(
            state.hit_map.hit(2, 2),
            Some(Hit::Cell {
                row: RowHandle(0),
                column: 0
            })
        );
        assert_eq!(state.hit_map.hit(2, 3), None);
        assert_eq!(state.hit_map.hit(2, 11), None);
        assert_eq!(
            state.hit_map.hit(2, 12),
            Some(Hit::Cell {
                row: RowHandle(1),
                column: 0
            })
        );
    }

    fn jailed_validators(n: usize) -> AppState {
        let validators: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"valoper":"val{i:02}","total_signed_blocks":10,
                        "slashes":[{{"height":2000000,"time":"T{i:02}"}}]}}"#
                )
            })
            .collect();
        let json = format!(r#"{{"validators":[{}]}}"#, validators.join(","));
        let doc = crate::document::MetricsDocument::from_slice(json.as_bytes()).unwrap();
        AppState::new(doc, None, "metrics.json".to_string())
    }

    #[test]
    fn panel_under_last_visible_row_scrolls_into_view() {
        let mut state = jailed_validators(20);
        // border + header + 7 rows + border
        let screen = draw(&mut state, 160, 10);
        assert!(screen.contains("val06"));
        assert!(!screen.contains("val07"));

        state.select_row(RowHandle(6));
        state.click(RowHandle(6), Trigger::Jails);
        let screen = draw(&mut state, 160, 10);

        assert_eq!(state.expansion.expanded_row(), Some(RowHandle(6)));
        assert!(screen.contains("T06"));
        assert!(screen.contains("val06"));
        let lines: Vec<&str> = screen.lines().collect();
        let row_line = lines.iter().position(|l| l.contains("val06")).unwrap();
        let jail_line = lines.iter().position(|l| l.contains("T06")).unwrap();
        assert!(row_line < jail_line);
        assert_eq!(
            state.hit_map.hit(2, row_line as u16),
            Some(Hit::Cell {
                row: RowHandle(6),
                column: 0
            })
        );
    }

    #[test]
    fn cramped_panel_is_still_drawn() {
        let mut state = sample_state();
        state.click(RowHandle(0), Trigger::Jails);
        // two row lines: v1 plus a one-line panel
        let screen = draw(&mut state, 160, 5);
        assert!(screen.contains("Jails · v1"));
        assert!(screen.contains("enlarge the terminal"));
    }

    #[test]
    fn offset_moves_only_as_far_as_needed() {
        // rows 0..=6, then a 4-line spacer after row 6
        let heights = [1, 1, 1, 1, 1, 1, 1, 4, 1];
        assert_eq!(offset_showing(&heights, 7, 7, 0), 4);
        assert_eq!(offset_showing(&heights, 7, 20, 0), 0);
        // already scrolled past the row: back to the row itself
        assert_eq!(offset_showing(&heights, 7, 7, 8), 6);
        assert_eq!(offset_showing(&[1, 3], 1, 7, 0), 0);
    }

    #[test]
    fn empty_table_shows_load_error() {
        let mut state = AppState::new(
            Default::default(),
            Some("HTTP status 404".to_string()),
            "http://x/metrics.json".to_string(),
        );
        let screen = draw(&mut state, 100, 6);
        assert!(screen.contains("No data: HTTP status 404"));
        assert_eq!(state.hit_map.hit(2, 1), None);
    }
}
