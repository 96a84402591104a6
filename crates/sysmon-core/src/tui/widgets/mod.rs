//! TUI widgets for sysmon.

mod header;
mod processes;
mod system;

pub use header::render_header;
pub use processes::render_processes;
pub use system::{SYSTEM_PANEL_HEIGHT, render_system};
