//! Application state management.

use ratatui::widgets::TableState as RatatuiTableState;
use tracing::debug;

use crate::document::MetricsDocument;
use crate::expand::{self, Expansion, PanelSlot, Trigger};
use crate::rows::{DisplayRow, RowHandle, project_rows};
use crate::table::{TableRow, TableState};
use crate::view::common::TableViewModel;
use crate::view::validators::build_validators_view;

/// Input mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a filter; applied live on every keystroke.
    Filter,
}

/// Active popup. Only one popup can be open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PopupState {
    #[default]
    None,
    Help {
        scroll: usize,
    },
    QuitConfirm,
}

impl PopupState {
    pub fn is_open(&self) -> bool {
        !matches!(self, PopupState::None)
    }
}

/// Result of a mouse hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Column header.
    Header(usize),
    /// Data cell of a visible row.
    Cell { row: RowHandle, column: usize },
}

/// Screen geometry of the last drawn table, for mapping mouse positions to
/// cells. Rebuilt on every draw.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    header_y: Option<u16>,
    /// Column spans as `(x, width)`.
    columns: Vec<(u16, u16)>,
    /// Visible data rows as `(y, handle)`.
    rows: Vec<(u16, RowHandle)>,
}

impl HitMap {
    pub fn new(header_y: u16, columns: Vec<(u16, u16)>, rows: Vec<(u16, RowHandle)>) -> Self {
        Self {
            header_y: Some(header_y),
            columns,
            rows,
        }
    }

    fn column_at(&self, x: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|&(start, width)| x >= start && x < start.saturating_add(width))
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        let column = self.column_at(x)?;
        if self.header_y == Some(y) {
            return Some(Hit::Header(column));
        }
        self.rows
            .iter()
            .find(|&&(row_y, _)| row_y == y)
            .map(|&(_, row)| Hit::Cell { row, column })
    }
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    /// Loaded document; immutable for the lifetime of the view.
    pub document: MetricsDocument,
    /// Display rows projected once at load, in document order.
    pub rows: Vec<DisplayRow>,
    /// Sort, filter, page and selection of the validators table.
    pub table: TableState<RowHandle>,
    /// Single-slot expansion state. Changed only via `expand::transition`.
    pub expansion: Expansion,
    /// Panel mounted beneath a row, driven by render commands.
    pub panel: PanelSlot,
    /// Trigger column the keyboard `Enter` acts on.
    pub focused_trigger: Trigger,
    /// Trigger cell under the mouse pointer.
    pub hover: Option<(RowHandle, usize)>,
    /// Geometry of the last draw.
    pub hit_map: HitMap,
    pub input_mode: InputMode,
    /// Filter input buffer.
    pub filter_input: String,
    pub popup: PopupState,
    /// Temporary status message shown in the header.
    pub status_message: Option<String>,
    /// Inline load failure; the table is empty when set.
    pub load_error: Option<String>,
    /// Source path or URL.
    pub source: String,
    /// Ratatui table state (enables auto-scrolling).
    pub ratatui_state: RatatuiTableState,
}

impl AppState {
    pub fn new(document: MetricsDocument, load_error: Option<String>, source: String) -> Self {
        let rows = project_rows(&document);
        Self {
            document,
            rows,
            table: TableState::new(),
            expansion: Expansion::Collapsed,
            panel: PanelSlot::default(),
            focused_trigger: Trigger::Jails,
            hover: None,
            hit_map: HitMap::default(),
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            popup: PopupState::None,
            status_message: None,
            load_error,
            source,
            ratatui_state: RatatuiTableState::default(),
        }
    }

    /// Current page of the table.
    pub fn view(&self) -> TableViewModel<RowHandle> {
        build_validators_view(&self.rows, &self.table)
    }

    /// Rows after filtering, across all pages.
    pub fn matched_len(&self) -> usize {
        self.table.arrange(&self.rows).len()
    }

    /// Handles of the current page, in display order.
    pub fn page_handles(&self) -> Vec<RowHandle> {
        let arranged = self.table.arrange(&self.rows);
        let range = self.table.page_range(arranged.len());
        arranged[range].iter().map(|r| r.id()).collect()
    }

    /// Clamps page and selection to the current arrangement. Collapses the
    /// panel when its row is no longer on the page.
    pub fn sync(&mut self) {
        let matched = self.matched_len();
        self.table.clamp_page(matched);
        let handles = self.page_handles();
        self.table.resolve_selection(&handles);
        if let Some(open) = self.expansion.expanded_row()
            && !handles.contains(&open)
        {
            self.collapse();
        }
    }

    /// Row under the keyboard cursor.
    pub fn selected_row(&self) -> Option<RowHandle> {
        let handles = self.page_handles();
        let last = handles.len().checked_sub(1)?;
        handles.get(self.table.selected.min(last)).copied()
    }

    /// Moves the keyboard cursor to `row`.
    pub fn select_row(&mut self, row: RowHandle) {
        self.table.tracked_id = Some(row);
        self.sync();
    }

    /// Click on the `trigger` cell of `row`: runs the expansion transition
    /// and applies its render commands to the panel slot.
    pub fn click(&mut self, row: RowHandle, trigger: Trigger) {
        let Some(record) = self.document.validators.get(row.0) else {
            return;
        };
        let (next, commands) = expand::transition(&self.expansion, row, trigger, record);
        debug!(
            row = row.0,
            trigger = trigger.label(),
            commands = commands.len(),
            "detail click"
        );
        self.panel.apply(commands);
        self.expansion = next;
    }

    /// Closes the open panel, if any.
    pub fn collapse(&mut self) {
        let (next, commands) = expand::collapse(&self.expansion);
        self.panel.apply(commands);
        self.expansion = next;
    }

    /// Sorts by a header click; ignored for the rank column.
    pub fn sort_by_column(&mut self, column: usize) {
        if self.table.sort_by_column::<DisplayRow>(column) {
            self.sync();
        }
    }

    /// Applies `filter_input` to the table.
    pub fn apply_filter(&mut self) {
        let filter = if self.filter_input.is_empty() {
            None
        } else {
            Some(self.filter_input.clone())
        };
        self.table.set_filter(filter);
        self.sync();
    }
}

/// Three validators: `v1` with one old slash, `v2` clean, `v3` with creation info.
#[cfg(test)]
pub(crate) fn sample_state() -> AppState {
    let doc = MetricsDocument::from_slice(
        br#"{"validators":[
            {"valoper":"v1","moniker":"one","total_signed_blocks":90,"total_missed_blocks":10,
             "slashes":[{"height":"500000","time":"t1"}]},
            {"valoper":"v2","moniker":"two","total_signed_blocks":99,"total_missed_blocks":1},
            {"valoper":"v3","moniker":"three",
             "validator_creation_info":{"height":12,"tx_hash":"AB"}}
        ]}"#,
    )
    .unwrap();
    AppState::new(doc, None, "metrics.json".to_string())
}
