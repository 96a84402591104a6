//! System panel: CPU and memory gauges, process counters, uptime.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::fmt::{format_kb, format_percent};
use crate::metrics::SystemMetrics;
use crate::tui::style::Styles;

/// Rows taken by the panel, borders included.
pub const SYSTEM_PANEL_HEIGHT: u16 = 5;

pub fn render_system(frame: &mut Frame, area: Rect, system: Option<&SystemMetrics>) {
    let block = Block::default().borders(Borders::ALL).title(" System ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let default = SystemMetrics::default();
    let system = system.unwrap_or(&default);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    render_gauge(frame, rows[0], "CPU", system.cpu_utilization, Styles::cpu(), "");
    let mem_detail = format!(
        "  {} used of {}",
        format_kb(system.mem_total_kb.saturating_sub(system.mem_free_kb)),
        format_kb(system.mem_total_kb)
    );
    render_gauge(
        frame,
        rows[1],
        "MEM",
        system.memory_utilization,
        Styles::mem(),
        &mem_detail,
    );

    let counters = Line::from(vec![
        Span::styled("Total Processes: ", Styles::dim()),
        Span::raw(system.total_processes.to_string()),
        Span::styled("   Running: ", Styles::dim()),
        Span::raw(system.running_processes.to_string()),
        Span::styled("   Up Time: ", Styles::dim()),
        Span::raw(system.uptime()),
    ]);
    frame.render_widget(Paragraph::new(counters), rows[2]);
}

fn render_gauge(
    frame: &mut Frame,
    area: Rect,
    name: &str,
    fraction: f64,
    base: ratatui::style::Style,
    detail: &str,
) {
    let chunks = Layout::horizontal([Constraint::Length(5), Constraint::Min(10)]).split(area);
    frame.render_widget(Paragraph::new(name).style(Styles::dim()), chunks[0]);

    // Gauge::ratio panics outside 0..=1.
    let ratio = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .ratio(ratio)
        .label(format!("{}%{}", format_percent(fraction), detail))
        .gauge_style(Styles::level(ratio, base));
    frame.render_widget(gauge, chunks[1]);
}
