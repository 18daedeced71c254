//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui styles, the HTML exporter
//! maps them to inline CSS.

use crate::expand::Trigger;
use crate::table::SortSpec;

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Good value (TUI: green). E.g. zero jails.
    Positive,
    /// Bad value (TUI: red). E.g. any jail.
    Negative,
    /// Dimmed (TUI: dark gray). E.g. missing values.
    Dimmed,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// Static description of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub title: &'static str,
    pub width: u16,
    pub sortable: bool,
    /// Detail panel opened by clicking a cell in this column.
    pub trigger: Option<Trigger>,
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub columns: &'static [ColumnSpec],
    /// Rows of the current page, already filtered, sorted and stamped.
    pub rows: Vec<ViewRow<Id>>,
    pub sort: Option<SortSpec>,
    /// Rows after filtering, across all pages.
    pub matched: usize,
    /// Rows in the document.
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
}

impl<Id> TableViewModel<Id> {
    pub fn widths(&self) -> impl Iterator<Item = u16> + '_ {
        self.columns.iter().map(|c| c.width)
    }

    /// Header label with sort arrow, as shown in the TUI.
    pub fn header_label(&self, column: usize) -> String {
        let Some(spec) = self.columns.get(column) else {
            return String::new();
        };
        match self.sort {
            Some(s) if s.column == column => {
                format!("{}{}", spec.title, if s.ascending { "▲" } else { "▼" })
            }
            _ => spec.title.to_string(),
        }
    }
}
