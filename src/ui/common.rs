//! Common UI components.
//!
//! This module contains the header bar, chart tab bar, status bar, and help
//! overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use faultwatch_types::DeviceStatus;

use crate::app::{App, ChartKind};
use crate::data::time::format_age;

/// Render the header bar with a fleet overview.
///
/// Displays: status of the selected device, device count, records in window.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref view) = app.view else {
        let line = Line::from(vec![
            Span::styled(" FAULTWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let latest_status = app
        .device_view()
        .and_then(|d| d.latest())
        .map(|r| r.status.clone())
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(" ● ", app.theme.status_style(&latest_status)),
        Span::styled("FAULTWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            view.devices.len().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" devices │ "),
        Span::styled(
            view.in_window.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" records in last {} │ ", view.window)),
    ];

    match app.device_view() {
        Some(device) => {
            spans.push(Span::raw(format!("{} ", device.device_id())));
            if device.summary.fault > 0 {
                spans.push(Span::styled(
                    format!("{} faults", device.summary.fault),
                    Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled("no faults", Style::default().fg(app.theme.healthy)));
            }
        }
        None => spans.push(Span::styled(
            "no device selected",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar of chart types.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = ChartKind::ALL
        .iter()
        .enumerate()
        .map(|(i, chart)| Line::from(format!(" {}:{} ", i + 1, chart.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.chart.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last refresh, dropped items, controls.
/// Also displays temporary status messages and store errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let paragraph = Paragraph::new(format!(" Store error: {} | r:retry q:quit", err))
            .style(app.theme.error_style());
        frame.render_widget(paragraph, area);
        return;
    }

    let status = match app.last_refresh {
        Some(at) => {
            let mut parts = vec![
                app.source_description().to_string(),
                format!("Updated {}", format_age(at, app.now())),
            ];
            if app.dropped > 0 {
                parts.push(format!("{} malformed skipped", app.dropped));
            }
            if app.truncated {
                parts.push("scan truncated".to_string());
            }
            parts.push("↑↓:device +/-:window Tab:chart e:export ?:help q:quit".to_string());
            format!(" {}", parts.join(" | "))
        }
        None => " Loading... | q:quit".to_string(),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render a centered message inside a bordered block.
pub fn render_placeholder(frame: &mut Frame, app: &App, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let paragraph = Paragraph::new(message)
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(ratatui::layout::Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Selection"),
        Line::from("  ↑/↓ k/j     Previous/next device"),
        Line::from("  +/-         Widen/narrow window (5 min)"),
        Line::from("  Tab/BackTab Next/previous chart"),
        Line::from("  1/2/3       Temperature/Vibration/Faults"),
        Line::from(""),
        section(" Actions"),
        Line::from("  r           Refresh now"),
        Line::from("  i           Re-run inference"),
        Line::from("  e           Export window to CSV"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(
            std::iter::once(Span::raw(" Status: "))
                .chain(DeviceStatus::SUMMARIZED.iter().flat_map(|status| {
                    [
                        Span::styled(status.as_str().to_string(), app.theme.status_style(status)),
                        Span::raw(" "),
                    ]
                }))
                .collect::<Vec<_>>(),
        ),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
