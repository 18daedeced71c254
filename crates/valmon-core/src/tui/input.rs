//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::expand::Trigger;
use crate::rows::DisplayRow;

use super::state::{AppState, Hit, InputMode, PopupState};

/// Rows moved by PgUp/PgDn.
const PAGE_STEP: usize = 20;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Navigation action for unified scroll/selection dispatch.
enum NavAction {
    Up,
    Down,
    PageUp(usize),
    PageDown(usize),
    Home,
    End,
}

/// Dispatches a navigation action to the help popup scroll or the table
/// selection.
fn dispatch_navigation(state: &mut AppState, action: NavAction) {
    if let PopupState::Help { scroll } = &mut state.popup {
        match action {
            NavAction::Up => *scroll = scroll.saturating_sub(1),
            NavAction::Down => *scroll = scroll.saturating_add(1),
            NavAction::PageUp(n) => *scroll = scroll.saturating_sub(n),
            NavAction::PageDown(n) => *scroll = scroll.saturating_add(n),
            NavAction::Home => *scroll = 0,
            NavAction::End => {} // no-op for help
        }
        return;
    }
    let table = &mut state.table;
    match action {
        NavAction::Up => table.select_up(),
        NavAction::Down => table.select_down(),
        NavAction::PageUp(n) => table.page_up(n),
        NavAction::PageDown(n) => table.page_down(n),
        NavAction::Home => table.home(),
        NavAction::End => table.end(),
    }
    state.sync();
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;
    if matches!(state.popup, PopupState::QuitConfirm) {
        return handle_quit_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Clicks `trigger` on the selected row.
fn click_selected(state: &mut AppState, trigger: Trigger) {
    state.focused_trigger = trigger;
    if let Some(row) = state.selected_row() {
        state.click(row, trigger);
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
        }

        // Help toggle
        KeyCode::Char('?') => {
            state.popup = match state.popup {
                PopupState::Help { .. } => PopupState::None,
                _ => PopupState::Help { scroll: 0 },
            };
        }

        // Esc peels one layer: popup, panel, filter
        KeyCode::Esc => {
            if state.popup.is_open() {
                state.popup = PopupState::None;
            } else if !state.expansion.is_collapsed() {
                state.collapse();
            } else if state.table.filter.is_some() {
                state.filter_input.clear();
                state.apply_filter();
            }
        }

        // Row navigation (or popup scroll if popup is open)
        KeyCode::Up | KeyCode::Char('k') => dispatch_navigation(state, NavAction::Up),
        KeyCode::Down | KeyCode::Char('j') => dispatch_navigation(state, NavAction::Down),
        KeyCode::PageUp => dispatch_navigation(state, NavAction::PageUp(PAGE_STEP)),
        KeyCode::PageDown => dispatch_navigation(state, NavAction::PageDown(PAGE_STEP)),
        KeyCode::Home => dispatch_navigation(state, NavAction::Home),
        KeyCode::End => dispatch_navigation(state, NavAction::End),

        // Any other key is swallowed while the help popup is open
        _ if state.popup.is_open() => {}

        // Focused trigger column
        KeyCode::Left | KeyCode::Char('h') => {
            state.focused_trigger = state.focused_trigger.prev();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.focused_trigger = state.focused_trigger.next();
        }
        KeyCode::Enter => click_selected(state, state.focused_trigger),
        KeyCode::Char('J') => click_selected(state, Trigger::Jails),
        KeyCode::Char('F') => click_selected(state, Trigger::RecentJails),
        KeyCode::Char('C') => click_selected(state, Trigger::Creation),
        KeyCode::Char('I') => click_selected(state, Trigger::Identity),

        // Sorting
        KeyCode::Char('s') => {
            state.table.next_sort_column::<DisplayRow>();
            state.sync();
        }
        KeyCode::Char('r') => {
            state.table.toggle_sort_direction();
            state.sync();
        }
        KeyCode::Char('x') => {
            state.table.clear_sort();
            state.sync();
        }

        // Paging
        KeyCode::Char(']') => {
            let matched = state.matched_len();
            state.table.next_page(matched);
            state.sync();
        }
        KeyCode::Char('[') => {
            state.table.prev_page();
            state.sync();
        }

        // Filter mode
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Filter;
            state.filter_input.clear();
            state.apply_filter();
        }
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in filter mode.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel filter
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
            state.apply_filter();
        }
        KeyCode::Enter => {
            // Filter is already applied in real-time, just switch mode
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            state.apply_filter();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit;
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                return KeyAction::None;
            }
            state.filter_input.push(c);
            state.apply_filter();
        }
        _ => {}
    }
    KeyAction::None
}

/// Handles mouse input: header clicks sort, trigger cell clicks expand,
/// motion updates the hover affordance.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.popup.is_open() {
        return;
    }
    let hit = state.hit_map.hit(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hit {
            Some(Hit::Header(column)) => state.sort_by_column(column),
            Some(Hit::Cell { row, column }) => {
                state.select_row(row);
                if let Some(trigger) = Trigger::from_column(column) {
                    state.focused_trigger = trigger;
                    state.click(row, trigger);
                }
            }
            None => {}
        },
        MouseEventKind::Moved => {
            state.hover = match hit {
                Some(Hit::Cell { row, column }) if Trigger::from_column(column).is_some() => {
                    Some((row, column))
                }
                _ => None,
            };
        }
        MouseEventKind::ScrollUp => dispatch_navigation(state, NavAction::Up),
        MouseEventKind::ScrollDown => dispatch_navigation(state, NavAction::Down),
        _ => {}
    }
}
