//! Overview row: status counts, latest reading and gauges.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use faultwatch_types::DeviceStatus;

use crate::app::App;
use crate::data::time::{format_age, format_utc};
use crate::data::DeviceView;

/// Temperature gauge range, °C.
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 100.0);
/// Vibration gauge range, mm/s.
pub const VIBRATION_RANGE: (f64, f64) = (0.0, 0.2);

/// Position of `value` within `range` as a ratio clamped to 0..=1.
pub fn gauge_ratio(value: f64, (min, max): (f64, f64)) -> f64 {
    if max <= min || !value.is_finite() {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(device) = app.device_view() else {
        super::common::render_placeholder(
            frame,
            app,
            area,
            "Overview",
            "No data available in the selected time window.",
        );
        return;
    };

    let chunks = Layout::horizontal([
        Constraint::Percentage(34),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
    ])
    .split(area);

    render_summary(frame, app, device, chunks[0]);
    render_latest(frame, app, device, chunks[1]);
    render_gauges(frame, app, device, chunks[2]);
}

fn block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_summary(frame: &mut Frame, app: &App, device: &DeviceView, area: Rect) {
    let summary = &device.summary;

    let mut counts = vec![Span::raw(" ")];
    for status in &DeviceStatus::SUMMARIZED {
        counts.push(Span::styled(
            format!("{} {}", status, summary.count(status)),
            app.theme.status_style(status),
        ));
        counts.push(Span::raw("  "));
    }

    let completeness = match summary.completeness {
        Some(pct) => format!(" Completeness {:.1}%", pct),
        None => " Completeness n/a".to_string(),
    };
    let completeness_style = if summary.is_incomplete() {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().fg(app.theme.healthy)
    };

    let mut lines = vec![
        Line::from(counts),
        Line::from(Span::styled(completeness, completeness_style)),
        Line::from(Span::styled(
            format!(" {}", summary.caption()),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    if summary.is_incomplete() {
        lines.push(Line::from(Span::styled(
            " ⚠ Data incomplete for this window",
            Style::default().fg(app.theme.warning),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block(app, " Status ")), area);
}

fn render_latest(frame: &mut Frame, app: &App, device: &DeviceView, area: Rect) {
    let Some(latest) = device.latest() else {
        return;
    };
    let now = app.view.as_ref().map(|v| v.now).unwrap_or(latest.timestamp);

    let lines = vec![
        Line::from(vec![
            Span::raw(" Device  "),
            Span::styled(latest.device_id.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw(" Status  "),
            Span::styled(latest.status.to_string(), app.theme.status_style(&latest.status)),
        ]),
        Line::from(format!(" Seen    {}", format_utc(latest.timestamp))),
        Line::from(Span::styled(
            format!("         {}", format_age(latest.timestamp, now)),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block(app, " Latest ")), area);
}

fn render_gauges(frame: &mut Frame, app: &App, device: &DeviceView, area: Rect) {
    let Some(latest) = device.latest() else {
        return;
    };

    let outer = block(app, " Gauges ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let gauge = |label: String, ratio: f64, color: Color| {
        Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(ratio)
            .label(label)
    };

    frame.render_widget(Paragraph::new(" Temperature (°C)"), rows[0]);
    frame.render_widget(
        gauge(
            format!("{:.1}", latest.temperature),
            gauge_ratio(latest.temperature, TEMPERATURE_RANGE),
            app.theme.highlight,
        ),
        rows[1],
    );
    frame.render_widget(Paragraph::new(" Vibration (mm/s)"), rows[2]);
    frame.render_widget(
        gauge(
            format!("{:.3}", latest.vibration),
            gauge_ratio(latest.vibration, VIBRATION_RANGE),
            app.theme.warning,
        ),
        rows[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_ratio_clamps() {
        assert_eq!(gauge_ratio(50.0, TEMPERATURE_RANGE), 0.5);
        assert_eq!(gauge_ratio(140.0, TEMPERATURE_RANGE), 1.0);
        assert_eq!(gauge_ratio(-10.0, TEMPERATURE_RANGE), 0.0);
        assert!((gauge_ratio(0.05, VIBRATION_RANGE) - 0.25).abs() < 1e-9);
        assert_eq!(gauge_ratio(1.0, (1.0, 1.0)), 0.0);
    }
}
