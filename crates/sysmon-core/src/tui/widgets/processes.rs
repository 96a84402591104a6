//! Process table, busiest first.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::fmt::format_command;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

const HEADERS: [&str; 6] = ["PID", "USER", "CPU[%]", "RAM[MB]", "TIME+", "COMMAND"];

pub fn render_processes(frame: &mut Frame, area: Rect, state: &AppState) {
    // borders plus the header row
    let available = area.height.saturating_sub(3) as usize;
    let processes = state.visible_processes(available);

    let total = state.latest.as_ref().map_or(0, |r| r.processes.len());
    let title = match state.row_limit {
        Some(n) => format!(" Processes ({} of {}, limit {}) ", processes.len(), total, n),
        None => format!(" Processes ({} of {}) ", processes.len(), total),
    };

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(Styles::table_header());
    let body = processes.iter().map(|process| {
        let cpu_style = Styles::level(process.cpu_utilization, Styles::default());
        let row = process.row();
        Row::new(vec![
            Cell::from(row.pid.to_string()),
            Cell::from(row.user),
            Cell::from(row.cpu).style(cpu_style),
            Cell::from(row.ram),
            Cell::from(row.time),
            Cell::from(format_command(&row.command)),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Min(10),
    ];
    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Styles::default());
    frame.render_widget(table, area);
}
