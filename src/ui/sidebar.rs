//! Sidebar: time window selector and device list.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use faultwatch_types::WindowMinutes;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).split(area);
    render_window(frame, app, chunks[0]);
    render_devices(frame, app, chunks[1]);
}

fn block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_window(frame: &mut Frame, app: &App, area: Rect) {
    let window = app.selection.window;
    let lines = vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                window.to_string(),
                Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}–{} min  (+/-)", WindowMinutes::MIN, WindowMinutes::MAX),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block(app, " Window ")), area);
}

fn render_devices(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = app.view.as_ref().filter(|v| !v.devices.is_empty()) else {
        let empty = Paragraph::new(" No devices in window")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block(app, " Devices "));
        frame.render_widget(empty, area);
        return;
    };

    let items: Vec<ListItem> = view
        .devices
        .iter()
        .map(|d| ListItem::new(format!(" {}", d)))
        .collect();

    let title = format!(" Devices ({}) ", view.devices.len());
    let list = List::new(items)
        .block(block(app, &title))
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶");

    let mut state = ListState::default();
    state.select(view.selected_index());
    frame.render_stateful_widget(list, area, &mut state);
}
