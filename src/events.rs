//! Keyboard and mouse input handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, ChartKind};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Chart type
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_chart();
            } else {
                app.next_chart();
            }
        }
        KeyCode::BackTab => app.prev_chart(),
        KeyCode::Char('1') => app.set_chart(ChartKind::Temperature),
        KeyCode::Char('2') => app.set_chart(ChartKind::Vibration),
        KeyCode::Char('3') => app.set_chart(ChartKind::FaultTrend),

        // Device selection
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_device(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_device(),

        // Time window
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => app.widen_window(),
        KeyCode::Char('-') | KeyCode::Left => app.narrow_window(),

        KeyCode::Char('r') => {
            app.refresh();
            app.set_status_message("Refreshed".to_string());
        }
        KeyCode::Char('i') => app.rerun_inference(),

        KeyCode::Char('e') => match app.export_csv() {
            Ok(path) => app.set_status_message(format!("Exported to {}", path.display())),
            Err(e) => app.set_status_message(format!("Export failed: {}", e)),
        },

        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle mouse events: the scroll wheel moves through devices.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev_device(),
        MouseEventKind::ScrollDown => app.select_next_device(),
        _ => {}
    }
}
