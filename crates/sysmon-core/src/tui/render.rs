//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::AppState;
use super::widgets::{SYSTEM_PANEL_HEIGHT, render_header, render_processes, render_system};

/// Main render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(1),                   // Header
        Constraint::Length(SYSTEM_PANEL_HEIGHT), // System panel
        Constraint::Min(4),                      // Process table
    ])
    .split(frame.area());

    render_header(frame, chunks[0], state);
    render_system(frame, chunks[1], state.latest.as_ref().map(|r| &r.system));
    render_processes(frame, chunks[2], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{CounterPaths, MockFs};
    use crate::metrics::{MetricsFacade, PollResult, ProcessSnapshot};
    use crate::tui::style::Styles;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_poll_result() {
        let mut facade = MetricsFacade::from_fs(MockFs::typical_system(), CounterPaths::default());
        let mut state = AppState::new(None);
        state.apply(facade.poll().unwrap(), facade.last_poll_duration());

        let text = screen(&state);
        assert!(text.contains("Ubuntu 22.04.3 LTS"));
        assert!(text.contains("LIVE"));
        assert!(text.contains("Up Time: 03:25:45"));
        assert!(text.contains("/usr/lib/firefox/firefox -contentproc"));
        assert!(text.contains("/sbin/init splash"));
        assert!(text.contains("49.3"));
    }

    #[test]
    fn test_render_busy_process_cpu_cell_is_critical() {
        let busy = ProcessSnapshot {
            pid: 77,
            user: "user".to_string(),
            uid: "1000".to_string(),
            command: "/usr/bin/spin\0".to_string(),
            ram_mb: "12".to_string(),
            active_ticks: 9500,
            start_ticks: 0,
            cpu_utilization: 0.95,
            age_secs: 100,
        };
        let mut state = AppState::new(None);
        state.apply(
            PollResult {
                processes: vec![busy],
                ..PollResult::default()
            },
            None,
        );

        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();
        let cells = terminal.backend().buffer().content();
        let at = (0..cells.len() - 4)
            .find(|&i| cells[i..i + 4].iter().map(|c| c.symbol()).collect::<String>() == "95.0")
            .unwrap();
        assert_eq!(cells[at].fg, Styles::critical().fg.unwrap());
    }

    #[test]
    fn test_render_before_first_poll() {
        let mut state = AppState::new(Some(5));
        state.paused = true;
        let text = screen(&state);
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Processes (0 of 0, limit 5)"));
    }
}
