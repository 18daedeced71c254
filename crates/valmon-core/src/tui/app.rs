//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::document::MetricsDocument;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key, handle_mouse};
use super::render::render;
use super::state::AppState;

/// Main TUI application.
pub struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App over an already loaded document. `load_error` is
    /// shown inline when the load failed.
    pub fn new(document: MetricsDocument, load_error: Option<String>, source: String) -> Self {
        Self {
            state: AppState::new(document, load_error, source),
            should_quit: false,
        }
    }

    /// Runs the TUI application until the user quits.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        info!(validators = self.state.rows.len(), "table view started");

        let result = self.event_loop(&mut terminal, &events);

        // Restore terminal even when the loop failed
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) | Ok(Event::Resize) => {}
                Ok(Event::Key(key)) => {
                    if handle_key(&mut self.state, key) == KeyAction::Quit {
                        self.should_quit = true;
                    }
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(&mut self.state, mouse),
                Err(_) => {
                    debug!("event channel closed");
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }
}
