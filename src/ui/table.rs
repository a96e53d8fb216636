//! Telemetry table for the selected device window, newest first.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::time::format_utc;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(device) = app.device_view() else {
        super::common::render_placeholder(frame, app, area, "Telemetry", "No records");
        return;
    };

    let header = Row::new(vec![
        Cell::from("Timestamp (UTC)"),
        Cell::from("Temp °C"),
        Cell::from("Vib mm/s"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    // Rows that can actually be seen: borders and header take three lines.
    let visible = area.height.saturating_sub(3) as usize;

    let rows: Vec<Row> = device
        .window
        .records
        .iter()
        .take(visible)
        .map(|r| {
            Row::new(vec![
                Cell::from(format_utc(r.timestamp)),
                Cell::from(format!("{:.2}", r.temperature)),
                Cell::from(format!("{:.4}", r.vibration)),
                Cell::from(r.status.to_string()).style(app.theme.status_style(&r.status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(26),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Min(8),
    ];

    let title = format!(
        " Telemetry: {} ({} records) ",
        device.device_id(),
        device.window.len()
    );
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}
