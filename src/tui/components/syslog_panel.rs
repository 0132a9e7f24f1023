// System log panel
//
// Tail of the app's own tracing output, kept out of stdout so the
// alternate screen stays intact. Auto-follows until scrolled.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::scroll::FocusablePanel;
use crate::tui::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.is_focused(FocusablePanel::SysLogs);
    let height = area.height.saturating_sub(2) as usize;
    let theme = app.theme();

    let entries = app.log_buffer.get_all();
    app.syslog_scroll.update_dimensions(entries.len(), height);
    let (start, end) = app.syslog_scroll.visible_range();

    let items: Vec<ListItem> = entries[start..end]
        .iter()
        .map(|entry| {
            let formatted = format_log_entry(entry);
            ListItem::new(formatted).style(log_level_style(&entry.level, &theme))
        })
        .collect();

    let title = if app.syslog_scroll.auto_follow {
        " System Logs "
    } else {
        " System Logs [scroll] "
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.panel_border(focused))
            .title(title),
    );

    f.render_widget(list, area);
    render_scrollbar(f, area, &app.syslog_scroll, ScrollbarStyle::Minimal);
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.level_error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.level_warn),
        LogLevel::Info => Style::default().fg(theme.level_info),
        LogLevel::Debug => Style::default().fg(theme.level_debug),
        LogLevel::Trace => Style::default().fg(theme.level_trace),
    }
}
