//! Predictive risk panel.
//!
//! Shows the inference result for the selected device's latest reading: a
//! colored banner with the prediction label, the score gauge, and details.
//! A failed call is shown inline with the raw response when one came back.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use faultwatch_adapters::inference::{InferenceError, Prediction};
use faultwatch_types::RiskBand;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Predictive Risk ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let dim = Style::default().add_modifier(Modifier::DIM);
    match &app.inference_result {
        Some(Ok(prediction)) => render_prediction(frame, app, prediction, inner),
        Some(Err(error)) => render_error(frame, app, error, inner),
        None if !app.inference_enabled() => {
            frame.render_widget(Paragraph::new(" Inference not configured").style(dim), inner)
        }
        None => frame.render_widget(Paragraph::new(" No telemetry to assess").style(dim), inner),
    }
}

fn render_prediction(frame: &mut Frame, app: &App, prediction: &Prediction, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .split(area);

    let banner = Paragraph::new(format!(" {} ", prediction.label))
        .style(app.theme.banner_style(&prediction.label))
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    if let Some(score) = prediction.risk_score {
        let band = RiskBand::from_score(score);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(app.theme.band_color(band)))
            .ratio((score / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0} / 100 {}", score, band.label()));
        frame.render_widget(gauge, chunks[2]);
    }

    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {:<13}", name), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(value),
        ])
    };

    let lines = vec![
        field(
            "Risk score",
            prediction.risk_score.map_or("-".to_string(), |s| format!("{:.1}", s)),
        ),
        field(
            "Confidence",
            prediction.confidence.map_or("-".to_string(), |c| format!("{:.2}", c)),
        ),
        field(
            "Failure mode",
            prediction.failure_mode.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[3]);
}

fn render_error(frame: &mut Frame, app: &App, error: &InferenceError, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", error.tag()),
            app.theme.error_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!(" {}", error), app.theme.error_style())),
    ];

    if let Some(raw) = error.raw() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Raw response:",
            Style::default().add_modifier(Modifier::DIM),
        )));
        let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
        lines.extend(pretty.lines().map(|l| Line::from(format!(" {}", l))));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
