//! valmon-core - shared library for the valmon validator metrics viewer.
//!
//! Provides:
//! - `document`: the `metrics.json` model with lenient field decoding
//! - `provider`: metrics sources (file, HTTP) and load-or-empty semantics
//! - `rows`: projection of validator records into display rows (uptime, jails)
//! - `table`: table state: sorting, filtering, pagination, selection tracking
//! - `expand`: the single-slot row detail expansion state machine
//! - `view`: UI-agnostic view models (table, detail panels, HTML)
//! - `export`: CSV and HTML reports
//! - `fmt`: shared formatting helpers
//!
//! With `tui` feature (default):
//! - `tui`: TUI rendering (ratatui/crossterm), state, input, widgets

pub mod document;
pub mod expand;
pub mod export;
pub mod fmt;
pub mod provider;
pub mod rows;
pub mod table;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;

/// Crate version, shared by the binaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
