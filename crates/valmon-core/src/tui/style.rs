//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::view::common::RowStyleClass;

/// Color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    pub const POSITIVE: Color = Color::Green;
    pub const NEGATIVE: Color = Color::Red;
    pub const ACCENT: Color = Color::Cyan;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Header cell of a column whose cells open a detail panel.
    pub fn trigger_header() -> Style {
        Self::table_header().add_modifier(Modifier::UNDERLINED)
    }

    /// Pointer affordance on a hovered or focused trigger cell. Keeps the
    /// cell's own color.
    pub fn trigger_focus() -> Style {
        Style::default().add_modifier(Modifier::UNDERLINED)
    }

    /// Filter input in the header.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Transient status message.
    pub fn status() -> Style {
        Style::default().fg(Color::Yellow).bg(Theme::HEADER_BG)
    }

    /// Load failure message in the header.
    pub fn error() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Theme::NEGATIVE)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Panel border.
    pub fn panel_border() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Key label in key/value lines.
    pub fn label() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Section header style (yellow bold).
    pub fn section_header() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Maps a UI-agnostic [`RowStyleClass`] to a ratatui [`Style`].
    pub fn from_class(class: RowStyleClass) -> Style {
        match class {
            RowStyleClass::Normal => Self::default(),
            RowStyleClass::Positive => Style::default().fg(Theme::POSITIVE),
            RowStyleClass::Negative => Style::default()
                .fg(Theme::NEGATIVE)
                .add_modifier(Modifier::BOLD),
            RowStyleClass::Dimmed => Self::dim(),
        }
    }
}
