// Histogram panel
//
// Bar chart of hit counts across the active pane's time window. The cursor
// inspects a single bucket; it resets whenever another pane becomes active
// or new results land, so it never points into a chart that is gone.

use chrono::{Local, TimeZone};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

use super::formatters::format_number;
use crate::api::models::ChartBucket;
use crate::tui::app::App;
use crate::tui::scroll::FocusablePanel;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.is_focused(FocusablePanel::Chart);
    let theme = app.theme();

    let block = |title: String| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.panel_border(focused))
            .title(title)
    };

    let Some(pane) = app.workspace.active_pane() else {
        f.render_widget(block(" Histogram ".to_string()), area);
        return;
    };

    if pane.buckets.is_empty() {
        let title = if pane.is_fetching() {
            format!(" Histogram ─ {} fetching ", app.spinner_char())
        } else {
            " Histogram ".to_string()
        };
        let empty = ratatui::widgets::Paragraph::new(Span::styled(
            "  no data in this window",
            theme.dim_style(),
        ))
        .block(block(title));
        f.render_widget(empty, area);
        return;
    }

    let title = match app.chart_cursor.and_then(|i| pane.buckets.get(i)) {
        Some(bucket) => format!(
            " Histogram ─ {} · {} hits ",
            bucket_label(bucket),
            format_number(bucket.count)
        ),
        None => format!(" Histogram ─ {} ", pane.range.label()),
    };

    // Fit every bucket into the available width
    let inner_width = area.width.saturating_sub(2) as usize;
    let slot = (inner_width / pane.buckets.len().max(1)).max(1);
    let (bar_width, gap) = if slot >= 3 {
        (slot as u16 - 1, 1)
    } else {
        (slot as u16, 0)
    };

    let bars: Vec<Bar> = pane
        .buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let style = if focused && app.chart_cursor == Some(i) {
                Style::default().fg(theme.histogram_cursor)
            } else {
                Style::default().fg(theme.histogram_bar)
            };
            Bar::default()
                .value(bucket.count)
                .text_value(String::new())
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .block(block(title))
        .bar_width(bar_width)
        .bar_gap(gap)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

/// "HH:MM:SS → HH:MM:SS" for one bucket, local time
fn bucket_label(bucket: &ChartBucket) -> String {
    let fmt = |secs: i64| {
        Local
            .timestamp_opt(secs, 0)
            .single()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| secs.to_string())
    };
    format!("{} → {}", fmt(bucket.from), fmt(bucket.to))
}
