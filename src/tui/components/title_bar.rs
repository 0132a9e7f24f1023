// Title bar component
//
// App name, the connected database, and a spinner while any query runs.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();

    let fetching = if app.workspace.any_fetching() {
        format!(" {} fetching", app.spinner_char())
    } else {
        String::new()
    };

    let demo_badge = if app.demo_mode { " [demo]" } else { "" };

    let title_text = match app.workspace.current_database() {
        Some(db) => format!(" ⊞ logdeck{}{} ──── {}", demo_badge, fetching, db.name),
        None => format!(" ⊞ logdeck{}{}", demo_badge, fetching),
    };

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.title))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}
