// Library list panel
//
// Left-hand column with every log library in the current database. Shows
// which libraries have an open pane and which pane is active. The cursor
// here picks the target for Enter/i/v/d.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::app::App;
use crate::tui::scroll::FocusablePanel;
use crate::util::truncate_display;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.is_focused(FocusablePanel::Libraries);
    let height = area.height.saturating_sub(2) as usize;
    // Borders, type icon and the open marker eat into the name width
    let name_cols = area.width.saturating_sub(7) as usize;
    let theme = app.theme();

    app.library_scroll
        .update_dimensions(app.workspace.libraries().len(), height);
    let (start, end) = app.library_scroll.visible_range();

    let active_id = app.workspace.current_library().map(|l| l.id);

    let items: Vec<ListItem> = if app.libraries_loading {
        vec![ListItem::new(Span::styled("  loading ...", theme.dim_style()))]
    } else if app.workspace.libraries().is_empty() {
        vec![ListItem::new(Span::styled(
            "  no libraries in this database",
            theme.dim_style(),
        ))]
    } else {
        app.workspace.libraries()[start..end]
            .iter()
            .enumerate()
            .map(|(i, library)| {
                let idx = start + i;
                let type_icon = if library.is_raw_table() { "≡" } else { "ƒ" };
                let type_color = if library.is_raw_table() {
                    theme.library_raw
                } else {
                    theme.library_template
                };

                let marker = if active_id == Some(library.id) {
                    Span::styled(" ▶", Style::default().fg(theme.tab_active))
                } else if app.workspace.is_open(library.id) {
                    Span::styled(" ●", theme.dim_style())
                } else {
                    Span::raw("")
                };

                let name_style = if focused && idx == app.library_cursor {
                    theme.selected_style()
                } else {
                    Style::default().fg(type_color)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", type_icon), Style::default().fg(type_color)),
                    Span::styled(truncate_display(&library.table_name, name_cols), name_style),
                    marker,
                ]))
            })
            .collect()
    };

    let title = if app.libraries_loading {
        " Libraries ".to_string()
    } else {
        format!(" Libraries ({}) ", app.workspace.libraries().len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.panel_border(focused))
            .title(title),
    );

    f.render_widget(list, area);
    render_scrollbar(f, area, &app.library_scroll, ScrollbarStyle::Minimal);
}
