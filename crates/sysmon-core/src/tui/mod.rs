//! Terminal view over the metrics facade.
//!
//! A thin consumer: it polls [`MetricsFacade`](crate::metrics::MetricsFacade)
//! once per tick and renders the result; no metric logic lives here.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
