//! TUI widgets.

mod detail;
mod footer;
mod header;
mod help;
mod quit_confirm;
mod validators;

pub use detail::render_detail_panel;
pub use footer::render_footer;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use validators::render_validators;
