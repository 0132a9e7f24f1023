// Log rows panel
//
// Shows the active pane's current page of rows. Keyword matches are
// highlighted, the cursor picks the row for the detail modal and copy.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::formatters::{format_number, highlight_spans, keyword_regex, row_body, row_level, row_timestamp};
use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::app::App;
use crate::tui::scroll::FocusablePanel;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.is_focused(FocusablePanel::Logs);
    let height = area.height.saturating_sub(2) as usize;
    let theme = app.theme();

    let Some(pane) = app.workspace.active_pane() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.panel_border(focused))
            .title(" Logs ");
        let hint = List::new(vec![ListItem::new(Span::styled(
            "  open a library to query logs",
            theme.dim_style(),
        ))])
        .block(block);
        f.render_widget(hint, area);
        return;
    };

    let title = if pane.is_fetching() {
        format!(" Logs ─ {} fetching ", app.spinner_char())
    } else if pane.total == 0 {
        " Logs ".to_string()
    } else {
        format!(
            " Logs ─ {} hits · page {}/{} ",
            format_number(pane.total),
            pane.page,
            pane.total_pages()
        )
    };

    let pattern = keyword_regex(&pane.keyword);
    let highlight = Style::default()
        .fg(theme.keyword_match)
        .add_modifier(ratatui::style::Modifier::BOLD);

    app.logs_scroll.update_dimensions(pane.logs.len(), height);
    let (start, end) = app.logs_scroll.visible_range();

    let items: Vec<ListItem> = if pane.logs.is_empty() && !pane.is_fetching() {
        vec![ListItem::new(Span::styled(
            "  no rows in this window",
            theme.dim_style(),
        ))]
    } else {
        pane.logs[start..end]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let idx = start + i;
                let selected = focused && app.log_cursor == Some(idx);

                let mut spans: Vec<Span> = Vec::new();
                if let Some(ts) = row_timestamp(row) {
                    spans.push(Span::styled(format!("[{}] ", ts), theme.dim_style()));
                }
                if let Some(level) = row_level(row) {
                    spans.push(Span::styled(
                        format!("{:<5} ", level),
                        theme.level_style(level),
                    ));
                }
                let body = row_body(row);
                let base = if selected {
                    theme.selected_style()
                } else {
                    theme.base_style()
                };
                spans.extend(
                    highlight_spans(&body, pattern.as_ref(), base, highlight)
                        .into_iter()
                        .map(|s| Span::styled(s.content.into_owned(), s.style)),
                );

                let item = ListItem::new(Line::from(spans));
                if selected {
                    item.style(theme.selected_style())
                } else {
                    item
                }
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.panel_border(focused))
            .title(title),
    );

    f.render_widget(list, area);
    render_scrollbar(f, area, &app.logs_scroll, ScrollbarStyle::Arrows);
}
