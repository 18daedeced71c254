//! UI-agnostic view models.
//!
//! Each submodule builds presentation data from rows and table state; the TUI
//! and the HTML exporter only map these to their own styling.

pub mod common;
pub mod detail;
pub mod html;
pub mod validators;

pub use common::{ColumnSpec, RowStyleClass, TableViewModel, ViewCell, ViewRow};
pub use detail::{DetailBody, DetailView, build_detail_view};
pub use validators::{VALIDATOR_COLUMNS, build_validators_view};
