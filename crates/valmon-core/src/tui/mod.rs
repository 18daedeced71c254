//! Terminal User Interface for the validators table.
//!
//! Keyboard and mouse drive the same state transitions: sorting, filtering,
//! paging, and the single-slot detail expansion beneath a row.

mod app;
mod event;
mod input;
mod render;
pub(crate) mod state;
pub(crate) mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, Hit, HitMap, InputMode, PopupState};
