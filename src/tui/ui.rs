// Frame layout and modal overlays
//
// draw() composes the fixed chrome (title, tab strip, status, system
// logs) around the main library/histogram/logs area, then stacks toasts
// and the active modal on top. Individual panels live in components/.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::components::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::components::{
    histogram, library_list, logs_panel, pane_tabs, status_bar, syslog_panel, title_bar,
};
use crate::tui::layout::{centered_rect, Breakpoint};
use crate::tui::modal::Modal;
use crate::tui::theme::Theme;

pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = app.theme();
    let area = f.area();

    if app.use_theme_background {
        f.render_widget(Block::default().style(theme.base_style()), area);
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title bar
            Constraint::Length(1), // pane tab strip
            Constraint::Min(10),   // libraries + histogram + logs
            Constraint::Length(6), // system logs
            Constraint::Length(2), // status bar
        ])
        .split(area);

    title_bar::render(f, rows[0], app);
    pane_tabs::render(f, rows[1], app);
    render_main(f, rows[2], app);
    syslog_panel::render(f, rows[3], app);
    status_bar::render(f, rows[4], app);

    let spinner = app.spinner_char();
    app.toasts.render(f, area, &theme, spinner);

    render_modal(f, app);
}

fn render_main(f: &mut Frame, area: Rect, app: &mut App) {
    let breakpoint = Breakpoint::from_width(area.width);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(breakpoint.library_column()),
            Constraint::Min(30),
        ])
        .split(area);

    library_list::render(f, columns[0], app);

    if app.features.charts {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(5)])
            .split(columns[1]);
        histogram::render(f, right[0], app);
        logs_panel::render(f, right[1], app);
    } else {
        logs_panel::render(f, columns[1], app);
    }
}

// ─── Modals ──────────────────────────────────────────────────────────────

fn render_modal(f: &mut Frame, app: &mut App) {
    let Some(modal) = app.modal.clone() else {
        return;
    };
    match modal {
        Modal::Help => render_help(f, app),
        Modal::ConfirmDelete { table_name, .. } => render_confirm_delete(f, app, &table_name),
        Modal::LibraryInfo => render_content_modal(f, app, " Library Info "),
        Modal::Views => render_content_modal(f, app, " Table Views "),
        Modal::RowDetail => render_content_modal(f, app, " Row Detail "),
        Modal::Search { input } => render_search(f, app, &input),
    }
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let lines = vec![
        Line::from(""),
        section("Navigation", &theme),
        kb("Tab / S-Tab", "cycle panel focus", &theme),
        kb("↑↓ / j k", "move cursor, scroll", &theme),
        kb("Enter", "open library / row detail", &theme),
        Line::from(""),
        section("Panes", &theme),
        kb("[ / ]", "previous / next pane", &theme),
        kb("x", "close active pane", &theme),
        Line::from(""),
        section("Query", &theme),
        kb("/", "keyword search", &theme),
        kb("n / p", "next / previous page", &theme),
        kb("r", "refresh", &theme),
        Line::from(""),
        section("Library", &theme),
        kb("i", "library info", &theme),
        kb("v", "table views", &theme),
        kb("d", "delete library", &theme),
        Line::from(""),
        section("Misc", &theme),
        kb("y", "copy log row", &theme),
        kb("u", "copy share link", &theme),
        kb("t", "cycle theme", &theme),
        kb("q", "quit", &theme),
        Line::from(""),
    ];

    let height = (lines.len() as u16 + 2).min(f.area().height);
    let rect = centered_rect(56, height, f.area());
    f.render_widget(Clear, rect);

    let block = Block::default()
        .title(" Help ")
        .title_style(theme.title_style())
        .title_bottom(Line::from(" Esc:close ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(theme.base_style());

    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn section(name: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", name),
        Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
    ))
}

fn kb(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(format!("{:<14}", key), Style::default().fg(theme.title)),
        Span::styled(desc.to_string(), Style::default().fg(theme.fg)),
    ])
}

fn render_confirm_delete(f: &mut Frame, app: &App, table_name: &str) {
    let theme = app.theme();
    let rect = centered_rect(52, 7, f.area());
    f.render_widget(Clear, rect);

    let block = Block::default()
        .title(" Delete Library ")
        .title_style(
            Style::default()
                .fg(theme.toast_error)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(Line::from(" y:confirm  n:cancel ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.toast_error))
        .style(theme.base_style());

    let lines = vec![
        Line::from(""),
        Line::from(format!("Delete {} and all of its data?", table_name)),
        Line::from(""),
        Line::from(Span::styled("This cannot be undone.", theme.dim_style())),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}

/// LibraryInfo, Views and RowDetail all render the cached content with a
/// shared scroll position.
fn render_content_modal(f: &mut Frame, app: &mut App, title: &str) {
    let theme = app.theme();
    let area = f.area();
    let width = area.width.saturating_sub(10).clamp(40, 78);
    let height = area.height.saturating_sub(6).clamp(8, 24);
    let rect = centered_rect(width, height, area);
    f.render_widget(Clear, rect);

    let lines: Vec<&str> = app.modal_content.lines().collect();
    let viewport = rect.height.saturating_sub(2) as usize;
    app.modal_scroll.update_dimensions(lines.len(), viewport);
    let (start, end) = app.modal_scroll.visible_range();

    let title_text = if app.modal_scroll.needs_scrollbar() {
        format!("{}({}/{}) ", title, end, lines.len())
    } else {
        title.to_string()
    };

    let block = Block::default()
        .title(title_text)
        .title_style(theme.title_style())
        .title_bottom(Line::from(" ↑↓:scroll  y:copy  Esc:close ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(theme.base_style());

    let text: Vec<Line> = lines[start..end]
        .iter()
        .map(|line| Line::from(Span::styled(*line, Style::default().fg(theme.fg))))
        .collect();

    f.render_widget(Paragraph::new(text).block(block), rect);

    if app.modal_scroll.needs_scrollbar() && rect.width > 2 && rect.height > 2 {
        let bar = Rect::new(rect.right() - 1, rect.y + 1, 1, rect.height - 2);
        render_scrollbar(f, bar, &app.modal_scroll, ScrollbarStyle::Minimal);
    }
}

fn render_search(f: &mut Frame, app: &App, input: &str) {
    let theme = app.theme();
    let rect = centered_rect(50, 3, f.area());
    f.render_widget(Clear, rect);

    let block = Block::default()
        .title(" Search ")
        .title_style(theme.title_style())
        .title_bottom(Line::from(" Enter:apply  Esc:cancel ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(theme.base_style());

    let line = Line::from(vec![
        Span::styled("/ ", theme.dim_style()),
        Span::styled(input.to_string(), Style::default().fg(theme.fg)),
        Span::styled("█", Style::default().fg(theme.border_focused)),
    ]);

    f.render_widget(Paragraph::new(line).block(block), rect);
}
