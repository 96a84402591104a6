//! Header bar: host identity, local clock, mode and poll status.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Length(10), // Mode
        Constraint::Min(20),    // OS / kernel
        Constraint::Length(28), // Poll status
    ])
    .split(area);

    let time_str = Local::now().format(" %Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    let mode_str = if state.paused { " PAUSED " } else { " LIVE " };
    frame.render_widget(Paragraph::new(mode_str).style(Styles::header()), chunks[1]);

    let (os, kernel) = state
        .latest
        .as_ref()
        .map(|r| (r.os_name.as_str(), r.kernel_version.as_str()))
        .unwrap_or(("", ""));
    let identity = Line::from(vec![
        Span::styled("OS: ", Styles::dim()),
        Span::raw(os),
        Span::styled("  Kernel: ", Styles::dim()),
        Span::raw(kernel),
    ]);
    frame.render_widget(Paragraph::new(identity).style(Styles::header()), chunks[2]);

    let status = match (&state.last_error, state.poll_duration) {
        (Some(err), _) => Paragraph::new(format!(" {}", err)).style(Styles::critical()),
        (None, Some(d)) => Paragraph::new(format!(" poll {:.1}ms", d.as_secs_f64() * 1000.0))
            .style(Styles::header()),
        (None, None) => Paragraph::new(" waiting").style(Styles::header()),
    };
    frame.render_widget(status, chunks[3]);
}
