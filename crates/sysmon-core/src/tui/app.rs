//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::debug;

use crate::collector::FileSystem;
use crate::metrics::MetricsFacade;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Main TUI application.
pub struct App<F: FileSystem> {
    facade: MetricsFacade<F>,
    state: AppState,
    should_quit: bool,
}

impl<F: FileSystem> App<F> {
    /// Creates a new App polling `facade`, showing at most `row_limit`
    /// processes (`None` fits the screen).
    pub fn new(facade: MetricsFacade<F>, row_limit: Option<usize>) -> Self {
        Self {
            facade,
            state: AppState::new(row_limit),
            should_quit: false,
        }
    }

    /// Runs the TUI application until the user quits.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal, tick_rate);

        // Restore terminal even when the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let events = EventHandler::new(tick_rate);

        // Initial poll primes the CPU rate tracker
        self.advance();

        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            match events.next() {
                Ok(Event::Tick) => {
                    if !self.state.paused {
                        self.advance();
                    }
                }
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Refresh => self.advance(),
                    KeyAction::None => {}
                },
                Ok(Event::Resize) => {}
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Polls the facade once and stores the outcome.
    fn advance(&mut self) {
        match self.facade.poll() {
            Ok(result) => {
                let duration = self.facade.last_poll_duration();
                self.state.apply(result, duration);
            }
            Err(e) => {
                debug!("poll failed, keeping previous result: {}", e);
                self.state.apply_error(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{CounterPaths, MockFs};

    #[test]
    fn test_advance_stores_result() {
        let facade = MetricsFacade::from_fs(MockFs::typical_system(), CounterPaths::default());
        let mut app = App::new(facade, Some(2));
        app.advance();

        let state = &app.state;
        assert_eq!(state.polls, 1);
        assert!(state.poll_duration.is_some());
        assert_eq!(state.visible_processes(50).len(), 2);
    }

    #[test]
    fn test_advance_records_error() {
        let facade = MetricsFacade::from_fs(MockFs::new(), CounterPaths::default());
        let mut app = App::new(facade, None);
        app.advance();

        let state = &app.state;
        assert!(state.latest.is_none());
        assert!(state.last_error.is_some());
    }
}
