//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use faultwatch_types::{DeviceStatus, RiskBand, RiskLevel};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for WARNING readings and medium risk.
    pub warning: Color,
    /// Color for FAULT readings, high risk and errors.
    pub critical: Color,
    /// Color for OK readings and low risk.
    pub healthy: Color,
    /// Color for UNKNOWN and unrecognized statuses.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Line color for chart series.
    pub series: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for the selected list row.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            muted: Color::DarkGray,
            border: Color::Gray,
            series: Color::LightCyan,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            muted: Color::Gray,
            border: Color::DarkGray,
            series: Color::Blue,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a device status
    pub fn status_style(&self, status: &DeviceStatus) -> Style {
        match status {
            DeviceStatus::Ok => Style::default().fg(self.healthy),
            DeviceStatus::Warning => Style::default().fg(self.warning),
            DeviceStatus::Fault => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
            DeviceStatus::Unknown | DeviceStatus::Other(_) => Style::default().fg(self.muted),
        }
    }

    /// Gauge color for a risk band
    pub fn band_color(&self, band: RiskBand) -> Color {
        match band {
            RiskBand::Low => self.healthy,
            RiskBand::Medium => self.warning,
            RiskBand::High => self.critical,
        }
    }

    /// Banner style for a prediction: red for an alert, green otherwise.
    pub fn banner_style(&self, level: &RiskLevel) -> Style {
        let bg = if level.is_alert() { self.critical } else { self.healthy };
        Style::default().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD)
    }

    /// Style for inline error text.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.critical)
    }
}
