//! Chart panel: temperature or vibration line chart, or fault trend bars.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use faultwatch_types::FaultBucket;

use crate::app::{App, ChartKind};
use crate::data::time::format_clock;
use crate::data::{DeviceView, Measurement};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(device) = app.device_view() else {
        super::common::render_placeholder(frame, app, area, app.chart.label(), "No data");
        return;
    };

    match app.chart {
        ChartKind::Temperature => {
            render_line(frame, app, device, Measurement::Temperature, "°C", area)
        }
        ChartKind::Vibration => {
            render_line(frame, app, device, Measurement::Vibration, "mm/s", area)
        }
        ChartKind::FaultTrend => render_faults(frame, app, &device.buckets, area),
    }
}

fn block(app: &App, title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Axis bounds with a little headroom; never a zero-width range.
pub fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = if max > min { (max - min) * 0.05 } else { min.abs().max(1.0) * 0.05 };
    [min - pad, max + pad]
}

fn render_line(
    frame: &mut Frame,
    app: &App,
    device: &DeviceView,
    measurement: Measurement,
    unit: &str,
    area: Rect,
) {
    let points = device.window.series(measurement);
    let x_bounds = match (points.first(), points.last()) {
        (Some(first), Some(last)) if last.0 > first.0 => [first.0, last.0],
        (Some(only), _) => [only.0 - 60.0, only.0 + 60.0],
        _ => [0.0, 1.0],
    };
    let y_bounds = bounds(points.iter().map(|p| p.1));

    let dataset = Dataset::default()
        .name(device.device_id().to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.series))
        .data(&points);

    let label = |secs: f64| Span::raw(format_clock(secs.max(0.0) as u64));
    let dim = Style::default().add_modifier(Modifier::DIM);

    let chart = Chart::new(vec![dataset])
        .block(block(app, format!(" {} ({}) ", app.chart.label(), unit)))
        .x_axis(
            Axis::default()
                .style(dim)
                .bounds(x_bounds)
                .labels([label(x_bounds[0]), label(x_bounds[1])]),
        )
        .y_axis(
            Axis::default()
                .style(dim)
                .bounds(y_bounds)
                .labels([
                    Span::raw(format!("{:.2}", y_bounds[0])),
                    Span::raw(format!("{:.2}", y_bounds[1])),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_faults(frame: &mut Frame, app: &App, buckets: &[FaultBucket], area: Rect) {
    let title = format!(
        " Fault Trend ({} faults, 15 min buckets) ",
        buckets.iter().map(|b| b.count).sum::<usize>()
    );

    if buckets.is_empty() {
        let paragraph = ratatui::widgets::Paragraph::new(Line::from(Span::styled(
            "No FAULT records in this window",
            Style::default().fg(app.theme.healthy),
        )))
        .block(block(app, title));
        frame.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar> = buckets
        .iter()
        .map(|b| {
            Bar::default()
                .value(b.count as u64)
                .label(Line::from(format_clock(b.start)))
                .style(Style::default().fg(app.theme.critical))
        })
        .collect();

    let chart = BarChart::default()
        .block(block(app, title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1);

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_pad() {
        let [lo, hi] = bounds([10.0, 20.0].into_iter());
        assert!((lo - 9.5).abs() < 1e-9);
        assert!((hi - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_flat_series() {
        let [lo, hi] = bounds([0.05, 0.05].into_iter());
        assert!(lo < 0.05 && hi > 0.05);
    }

    #[test]
    fn test_bounds_empty() {
        assert_eq!(bounds(std::iter::empty()), [0.0, 1.0]);
    }
}
