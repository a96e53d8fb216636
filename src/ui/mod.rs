//! Terminal UI rendering using ratatui.
//!
//! Each panel is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: Status counts, completeness, latest reading and gauges
//! - [`chart`]: Temperature/vibration line charts and the fault trend bars
//! - [`risk`]: Predictive inference banner, gauge and errors
//! - [`table`]: Telemetry rows for the selected device
//! - [`sidebar`]: Time window and device list
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ Header (common::render_header)                       │
//! ├──────────────────────────────────────────────────────┤
//! │ Chart tabs (common::render_tabs)                     │
//! ├───────────┬──────────────────────────────────────────┤
//! │ sidebar   │ overview                                 │
//! │ (window,  ├──────────────────────────┬───────────────┤
//! │  devices) │ chart                    │ risk          │
//! │           ├──────────────────────────┴───────────────┤
//! │           │ table                                    │
//! ├───────────┴──────────────────────────────────────────┤
//! │ Status Bar (common::render_status_bar)               │
//! └──────────────────────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top: common::render_help
//! ```

pub mod chart;
pub mod common;
pub mod overview;
pub mod risk;
pub mod sidebar;
pub mod table;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::App;

/// Render the dashboard body between the tab bar and the status bar.
pub fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal([Constraint::Length(26), Constraint::Min(40)]).split(area);
    sidebar::render(frame, app, columns[0]);

    let rows = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(10),
        Constraint::Length(8),
    ])
    .split(columns[1]);
    overview::render(frame, app, rows[0]);

    let middle =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).split(rows[1]);
    chart::render(frame, app, middle[0]);
    risk::render(frame, app, middle[1]);

    table::render(frame, app, rows[2]);
}
