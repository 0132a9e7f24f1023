// Pane tab strip
//
// One line listing every open pane in opening order. The active pane is
// highlighted; panes with an in-flight query show the spinner.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;
use crate::util::truncate_display;

/// Widest a single tab label gets before it is cut
const MAX_LABEL_COLS: usize = 24;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();

    if app.workspace.pane_count() == 0 {
        let hint = Paragraph::new(Span::styled(
            " no panes ─ Enter opens the selected library",
            theme.dim_style(),
        ));
        f.render_widget(hint, area);
        return;
    }

    let active_key = app.workspace.active_key().map(str::to_string);
    let mut spans: Vec<Span> = vec![Span::raw(" ")];

    for (i, pane) in app.workspace.panes_in_order().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", theme.dim_style()));
        }

        let is_active = active_key.as_deref() == Some(pane.key.as_str());
        let style = if is_active {
            Style::default()
                .fg(theme.tab_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.tab_inactive)
        };
        spans.push(Span::styled(
            truncate_display(&pane.label, MAX_LABEL_COLS),
            style,
        ));

        if pane.is_fetching() {
            spans.push(Span::styled(
                format!(" {}", app.spinner_char()),
                Style::default().fg(theme.tab_fetching),
            ));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
