//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{AppState, PopupState};
use super::widgets::{
    render_footer, render_header, render_help, render_quit_confirm, render_validators,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(5),    // Table
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_validators(frame, chunks[1], state);
    render_footer(frame, chunks[2], state);

    // Popups (rendered last to overlay everything)
    match &mut state.popup {
        PopupState::Help { scroll } => render_help(frame, area, scroll),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::None => {}
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::tui::state::sample_state;

    fn screen(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(170, 24)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn full_screen_smoke() {
        let mut state = sample_state();
        let text = screen(&mut state);
        assert!(text.contains("valmon"));
        assert!(text.contains("metrics.json"));
        assert!(text.contains("3 validators"));
        assert!(text.contains("focus: jails"));
    }

    #[test]
    fn popups_overlay_the_table() {
        let mut state = sample_state();
        state.popup = PopupState::Help { scroll: 0 };
        assert!(screen(&mut state).contains("Help"));

        state.popup = PopupState::QuitConfirm;
        assert!(screen(&mut state).contains("Exit valmon"));
    }
}
