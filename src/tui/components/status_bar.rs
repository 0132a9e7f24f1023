// Status bar component
//
// Bottom line with the session vitals: uptime, database, open panes, the
// active pane's window, page position and keyword.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::formatters::format_number;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;

/// Render the status bar
///
/// Adapts to terminal width: full labels on wide terminals, a trimmed
/// format on narrow ones.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let bp = Breakpoint::from_width(area.width);

    let database = app
        .workspace
        .current_database()
        .map(|db| db.name.clone())
        .unwrap_or_else(|| "-".to_string());

    let pane_info = match app.workspace.active_pane() {
        Some(pane) => {
            let kw = if pane.keyword.is_empty() {
                String::new()
            } else {
                format!(" │ kw: {}", pane.keyword)
            };
            format!(
                " │ {} │ {} hits │ page {}/{}{}",
                pane.range.label(),
                format_number(pane.total),
                pane.page,
                pane.total_pages(),
                kw
            )
        }
        None => String::new(),
    };

    let status_text = if !bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ {} │ {} panes{}",
            app.uptime(),
            database,
            app.workspace.pane_count(),
            pane_info,
        )
    } else {
        format!(
            " {} │ db {} │ {} libraries │ {} panes{} │ {}",
            app.uptime(),
            database,
            app.workspace.libraries().len(),
            app.workspace.pane_count(),
            pane_info,
            app.theme_kind.name(),
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
