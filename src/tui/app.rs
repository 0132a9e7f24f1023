// Application state and controller for the TUI
//
// App owns the workspace plus all presentation state: focus, cursors,
// scroll positions, modals, toasts. Key handlers mutate it and return
// Command values describing the I/O they need; the event loop executes
// those and feeds results back through apply_event. Nothing in here
// touches tokio, so the whole controller tests synchronously.

use std::time::Instant;

use crossterm::event::KeyCode;

use crate::api::models::{LibraryDetail, LibraryView};
use crate::config::{Config, Features};
use crate::events::{Command, SessionEvent};
use crate::logging::LogBuffer;
use crate::session::link::LinkState;
use crate::session::{CloseOutcome, FetchSpec, MergeOutcome, OpenOutcome, Workspace};
use crate::tui::clipboard;
use crate::tui::components::formatters;
use crate::tui::components::{Toast, ToastStack, DELETE_TOAST_KEY};
use crate::tui::input::InputHandler;
use crate::tui::modal::Modal;
use crate::tui::scroll::{FocusablePanel, ScrollState};
use crate::tui::theme::{Theme, ThemeKind};

const SPINNER_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];

pub struct App {
    // Session state
    pub workspace: Workspace,
    pub link: LinkState,

    // Chrome
    pub theme_kind: ThemeKind,
    pub use_theme_background: bool,
    pub focused: FocusablePanel,
    pub modal: Option<Modal>,
    /// Content rendered by LibraryInfo/Views/RowDetail modals
    pub modal_content: String,
    pub modal_scroll: ScrollState,
    pub toasts: ToastStack,
    pub should_quit: bool,

    // Panel state
    pub library_cursor: usize,
    pub library_scroll: ScrollState,
    pub libraries_loading: bool,
    pub logs_scroll: ScrollState,
    pub log_cursor: Option<usize>,
    pub chart_cursor: Option<usize>,
    pub syslog_scroll: ScrollState,

    // Runtime
    pub log_buffer: LogBuffer,
    pub demo_mode: bool,
    pub features: Features,
    console_url: String,
    preferred_database: Option<String>,
    input_handler: InputHandler,
    start_time: Instant,
    animation_frame: usize,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        let theme_kind = match ThemeKind::from_name(&config.theme) {
            Some(kind) => kind,
            None => {
                tracing::warn!(theme = %config.theme, "unknown theme name, using default");
                ThemeKind::default()
            }
        };

        Self {
            workspace: Workspace::new(config.query.lookback_minutes, config.query.page_size),
            link: LinkState::default(),
            theme_kind,
            use_theme_background: config.use_theme_background,
            focused: FocusablePanel::default(),
            modal: None,
            modal_content: String::new(),
            modal_scroll: ScrollState::top(),
            toasts: ToastStack::new(),
            should_quit: false,
            library_cursor: 0,
            library_scroll: ScrollState::top(),
            libraries_loading: false,
            logs_scroll: ScrollState::top(),
            log_cursor: None,
            chart_cursor: None,
            syslog_scroll: ScrollState::new(),
            log_buffer,
            demo_mode: config.demo_mode,
            features: config.features.clone(),
            console_url: config.console_url.clone(),
            preferred_database: config.database.clone(),
            input_handler: InputHandler::with_default_config(),
            start_time: Instant::now(),
            animation_frame: 0,
        }
    }

    /// Commands to run once the event loop is up.
    pub fn startup_commands(&mut self) -> Vec<Command> {
        self.libraries_loading = true;
        vec![Command::FetchDatabases]
    }

    // ─── Frame helpers ───────────────────────────────────────────────────

    pub fn theme(&self) -> Theme {
        self.theme_kind.theme()
    }

    pub fn is_focused(&self, panel: FocusablePanel) -> bool {
        self.focused == panel
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.animation_frame % SPINNER_FRAMES.len()]
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    /// Advance animation state and drop expired toasts. Called every tick.
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.toasts.prune();
    }

    // ─── Input plumbing ──────────────────────────────────────────────────

    /// Returns true when the press should trigger its action.
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key)
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
        if !self.features.charts && self.focused == FocusablePanel::Chart {
            self.focused = self.focused.next();
        }
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
        if !self.features.charts && self.focused == FocusablePanel::Chart {
            self.focused = self.focused.prev();
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.toasts
            .push(Toast::info(format!("theme: {}", self.theme_kind.name())));
    }

    // ─── Cursor movement ─────────────────────────────────────────────────

    pub fn move_library_cursor(&mut self, delta: i64) {
        let len = self.workspace.libraries().len();
        if len == 0 {
            return;
        }
        let next = (self.library_cursor as i64 + delta).clamp(0, len as i64 - 1) as usize;
        self.library_cursor = next;
        self.library_scroll.ensure_visible(next);
    }

    pub fn move_log_cursor(&mut self, delta: i64) {
        let len = match self.workspace.active_pane() {
            Some(pane) => pane.logs.len(),
            None => return,
        };
        if len == 0 {
            return;
        }
        let next = match self.log_cursor {
            Some(idx) => (idx as i64 + delta).clamp(0, len as i64 - 1) as usize,
            None if delta >= 0 => 0,
            None => len - 1,
        };
        self.log_cursor = Some(next);
        self.logs_scroll.ensure_visible(next);
    }

    pub fn move_chart_cursor(&mut self, delta: i64) {
        let len = match self.workspace.active_pane() {
            Some(pane) => pane.buckets.len(),
            None => return,
        };
        if len == 0 {
            return;
        }
        let next = match self.chart_cursor {
            Some(idx) => (idx as i64 + delta).clamp(0, len as i64 - 1) as usize,
            None if delta >= 0 => 0,
            None => len - 1,
        };
        self.chart_cursor = Some(next);
    }

    /// Esc outside a modal drops row/bucket selection.
    pub fn clear_selection(&mut self) {
        self.log_cursor = None;
        self.chart_cursor = None;
    }

    // ─── Pane lifecycle ──────────────────────────────────────────────────

    /// Open the library under the cursor. New panes need a fetch.
    pub fn open_selected(&mut self, now: i64) -> Option<Command> {
        let library = self.workspace.libraries().get(self.library_cursor)?.clone();
        match self.workspace.open(&library, now) {
            OpenOutcome::AlreadyActive => None,
            OpenOutcome::Activated => {
                self.after_activation();
                None
            }
            OpenOutcome::Created(spec) => {
                self.after_activation();
                Some(Command::RunQuery(spec))
            }
        }
    }

    pub fn next_pane(&mut self) {
        if self.workspace.next_pane().is_some() {
            self.after_activation();
        }
    }

    pub fn prev_pane(&mut self) {
        if self.workspace.prev_pane().is_some() {
            self.after_activation();
        }
    }

    /// Close the active pane and cancel whatever it was fetching.
    pub fn close_active_pane(&mut self) -> Vec<Command> {
        let Some(key) = self.workspace.active_key().map(str::to_string) else {
            return Vec::new();
        };
        let outcome = self.workspace.close(&key);
        self.settle_close(outcome);
        vec![Command::AbortQuery { pane_key: key }]
    }

    // ─── Delete flow ─────────────────────────────────────────────────────

    /// `d` on a library row asks for confirmation first.
    pub fn request_delete(&mut self) {
        if self.workspace.current_database().is_none() {
            tracing::warn!("delete requested with no database selected");
            self.toasts.push(Toast::error("no database selected"));
            return;
        }
        let Some(library) = self.workspace.libraries().get(self.library_cursor).cloned() else {
            return;
        };
        self.modal = Some(Modal::confirm_delete(library.id, library.table_name));
    }

    /// Confirmed: show a keyed loading toast and fire the delete. The
    /// outcome toast replaces it under the same key.
    pub fn confirm_delete(&mut self, library_id: i64, table_name: String) -> Vec<Command> {
        self.modal = None;
        tracing::info!(library = %table_name, "deleting library");
        self.toasts.push(
            Toast::loading(format!("deleting {} ...", table_name)).with_key(DELETE_TOAST_KEY),
        );
        vec![Command::DeleteLibrary {
            library_id,
            table_name,
        }]
    }

    // ─── Re-query ────────────────────────────────────────────────────────

    pub fn open_search(&mut self) {
        let Some(pane) = self.workspace.active_pane() else {
            self.toasts.push(Toast::info("open a library first"));
            return;
        };
        self.modal = Some(Modal::search(&pane.keyword));
    }

    pub fn submit_search(&mut self, keyword: String, now: i64) -> Vec<Command> {
        self.modal = None;
        match self.workspace.search(keyword, now) {
            Some(spec) => self.after_requery(spec),
            None => Vec::new(),
        }
    }

    pub fn change_page(&mut self, delta: i64, now: i64) -> Vec<Command> {
        match self.workspace.change_page(delta, now) {
            Some(spec) => self.after_requery(spec),
            None => Vec::new(),
        }
    }

    pub fn refresh_active(&mut self, now: i64) -> Vec<Command> {
        match self.workspace.refresh(now) {
            Some(spec) => self.after_requery(spec),
            None => Vec::new(),
        }
    }

    // ─── Modals and clipboard ────────────────────────────────────────────

    /// `i` on a library row: open the info modal and fetch the record.
    pub fn request_info(&mut self) -> Option<Command> {
        let library = self.workspace.libraries().get(self.library_cursor)?.clone();
        self.set_modal(
            Modal::LibraryInfo,
            format!("loading {} ...", library.table_name),
        );
        Some(Command::FetchLibraryDetail {
            library_id: library.id,
        })
    }

    /// `v` on a raw table: open the views modal and fetch the list.
    pub fn request_views(&mut self) -> Option<Command> {
        if !self.features.views {
            return None;
        }
        let library = self.workspace.libraries().get(self.library_cursor)?.clone();
        if !library.is_raw_table() {
            self.toasts.push(Toast::info("views only apply to raw tables"));
            return None;
        }
        self.set_modal(
            Modal::Views,
            format!("loading views of {} ...", library.table_name),
        );
        Some(Command::FetchViews {
            library_id: library.id,
            table_name: library.table_name,
        })
    }

    /// Enter on a selected log row shows it as pretty JSON.
    pub fn open_row_detail(&mut self) {
        let Some(pane) = self.workspace.active_pane() else {
            return;
        };
        let Some(idx) = self.log_cursor else {
            return;
        };
        let Some(row) = pane.logs.get(idx) else {
            return;
        };
        let content = formatters::row_detail(row);
        self.set_modal(Modal::RowDetail, content);
    }

    pub fn copy_modal_content(&mut self) {
        if self.modal_content.is_empty() {
            return;
        }
        match clipboard::copy_to_clipboard(&self.modal_content) {
            Ok(()) => self.toasts.push(Toast::success("copied")),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard copy failed");
                self.toasts.push(Toast::error("clipboard unavailable"));
            }
        }
    }

    pub fn copy_selected_row(&mut self) {
        let Some(pane) = self.workspace.active_pane() else {
            return;
        };
        let Some(idx) = self.log_cursor else {
            return;
        };
        let Some(row) = pane.logs.get(idx) else {
            return;
        };
        let text = formatters::row_detail(row);
        match clipboard::copy_to_clipboard(&text) {
            Ok(()) => self.toasts.push(Toast::success("row copied")),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard copy failed");
                self.toasts.push(Toast::error("clipboard unavailable"));
            }
        }
    }

    /// `u` copies a console deep link mirroring the active query.
    pub fn copy_share_link(&mut self) {
        let Some(url) = self.link.url(&self.console_url) else {
            self.toasts.push(Toast::info("no active query to link"));
            return;
        };
        match clipboard::copy_to_clipboard(&url) {
            Ok(()) => self.toasts.push(Toast::success("share link copied")),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard copy failed");
                self.toasts.push(Toast::error("clipboard unavailable"));
            }
        }
    }

    // ─── Event application ───────────────────────────────────────────────

    /// Apply a completed service call, returning follow-up commands.
    pub fn apply_event(&mut self, event: SessionEvent) -> Vec<Command> {
        match event {
            SessionEvent::DatabasesLoaded { result } => match result {
                Ok(databases) => {
                    let count = databases.len();
                    self.workspace.set_databases(databases);
                    let selected = self
                        .workspace
                        .select_database(self.preferred_database.as_deref());
                    match selected {
                        Some(db) => {
                            tracing::info!(count, database = %db.name, "databases loaded");
                            self.libraries_loading = true;
                            vec![Command::FetchLibraries { database_id: db.id }]
                        }
                        None => {
                            tracing::warn!("instance has no visible databases");
                            self.libraries_loading = false;
                            self.toasts.push(Toast::error("no databases on this instance"));
                            Vec::new()
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "loading databases failed");
                    self.libraries_loading = false;
                    self.toasts
                        .push(Toast::error(format!("databases: {}", err.brief())));
                    Vec::new()
                }
            },

            SessionEvent::LibrariesLoaded { result } => {
                self.libraries_loading = false;
                match result {
                    Ok(libraries) => {
                        tracing::info!(count = libraries.len(), "libraries loaded");
                        self.workspace.set_libraries(libraries);
                        self.clamp_library_cursor();
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "loading libraries failed");
                        self.toasts
                            .push(Toast::error(format!("libraries: {}", err.brief())));
                    }
                }
                Vec::new()
            }

            SessionEvent::QueryLoaded {
                pane_key,
                generation,
                result,
            } => {
                match result {
                    Ok(query) => {
                        let outcome = self.workspace.merge_results(&pane_key, generation, query);
                        if outcome == MergeOutcome::Merged
                            && self.workspace.active_key() == Some(pane_key.as_str())
                        {
                            self.reset_result_cursors();
                            self.refresh_link();
                        }
                    }
                    Err(err) => {
                        // Only the current generation settles the spinner and
                        // surfaces the error; late failures stay silent.
                        if self.workspace.mark_ready(&pane_key, generation)
                            == MergeOutcome::Merged
                        {
                            tracing::warn!(pane_key = %pane_key, error = %err, "query failed");
                            self.toasts
                                .push(Toast::error(format!("query: {}", err.brief())));
                        }
                    }
                }
                Vec::new()
            }

            SessionEvent::LibraryDeleted {
                library_id,
                table_name,
                result,
            } => match result {
                Ok(()) => self.finish_delete(library_id, table_name),
                Err(err) => {
                    tracing::error!(library = %table_name, error = %err, "delete failed");
                    self.toasts.push(
                        Toast::error(format!("delete {} failed: {}", table_name, err.brief()))
                            .with_key(DELETE_TOAST_KEY),
                    );
                    Vec::new()
                }
            },

            SessionEvent::LibraryDetailLoaded { result } => {
                if matches!(self.modal, Some(Modal::LibraryInfo)) {
                    match result {
                        Ok(detail) => self.modal_content = format_library_detail(&detail),
                        Err(err) => {
                            self.modal = None;
                            self.toasts
                                .push(Toast::error(format!("library info: {}", err.brief())));
                        }
                    }
                }
                Vec::new()
            }

            SessionEvent::ViewsLoaded { table_name, result } => {
                if matches!(self.modal, Some(Modal::Views)) {
                    match result {
                        Ok(views) => self.modal_content = format_views(&table_name, &views),
                        Err(err) => {
                            self.modal = None;
                            self.toasts
                                .push(Toast::error(format!("views: {}", err.brief())));
                        }
                    }
                }
                Vec::new()
            }
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────

    /// Success path of a delete: replace the loading toast, drop the dead
    /// pane and its in-flight fetch, refetch the sidebar.
    fn finish_delete(&mut self, library_id: i64, table_name: String) -> Vec<Command> {
        tracing::info!(library = %table_name, "library deleted");
        self.toasts
            .push(Toast::success(format!("deleted {}", table_name)).with_key(DELETE_TOAST_KEY));

        let mut commands = Vec::new();
        let pane_key = library_id.to_string();
        match self.workspace.remove_library(library_id) {
            CloseOutcome::NotOpen => {}
            outcome => {
                commands.push(Command::AbortQuery { pane_key });
                self.settle_close(outcome);
            }
        }

        let database_id = self.workspace.current_database().map(|db| db.id);
        if let Some(database_id) = database_id {
            self.libraries_loading = true;
            commands.push(Command::FetchLibraries { database_id });
        }
        commands
    }

    fn settle_close(&mut self, outcome: CloseOutcome) {
        match outcome {
            CloseOutcome::ClosedLast => {
                self.reset_result_cursors();
                self.link.reset();
            }
            CloseOutcome::SwitchedTo(_) => self.after_activation(),
            CloseOutcome::ClosedInactive | CloseOutcome::NotOpen => {}
        }
    }

    fn after_activation(&mut self) {
        self.reset_result_cursors();
        self.refresh_link();
    }

    fn after_requery(&mut self, spec: FetchSpec) -> Vec<Command> {
        self.reset_result_cursors();
        self.refresh_link();
        vec![Command::RunQuery(spec)]
    }

    fn reset_result_cursors(&mut self) {
        self.logs_scroll.reset();
        self.log_cursor = None;
        self.chart_cursor = None;
    }

    fn refresh_link(&mut self) {
        match self.workspace.active_pane() {
            Some(pane) => self.link = LinkState::from_pane(pane),
            None => self.link.reset(),
        }
    }

    fn clamp_library_cursor(&mut self) {
        let len = self.workspace.libraries().len();
        if len == 0 {
            self.library_cursor = 0;
        } else if self.library_cursor >= len {
            self.library_cursor = len - 1;
        }
    }

    fn set_modal(&mut self, modal: Modal, content: String) {
        self.modal = Some(modal);
        self.modal_content = content;
        self.modal_scroll = ScrollState::top();
    }
}

fn format_library_detail(detail: &LibraryDetail) -> String {
    let mut lines = vec![
        format!("table       {}", detail.table_name),
        format!("id          {}", detail.id),
        format!(
            "type        {}",
            if detail.create_type == 0 {
                "raw table"
            } else {
                "derived view"
            }
        ),
    ];
    if let Some(desc) = detail.desc.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("desc        {}", desc));
    }
    if let Some(days) = detail.days {
        lines.push(format!("retention   {} days", days));
    }
    if let Some(field) = detail.time_field.as_deref() {
        lines.push(format!("time field  {}", field));
    }
    if let Some(ctime) = detail.ctime {
        if let Some(ts) = chrono::DateTime::from_timestamp(ctime, 0) {
            lines.push(format!(
                "created     {}",
                ts.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
            ));
        }
    }
    if let Some(uid) = detail.uid {
        lines.push(format!("creator     uid {}", uid));
    }
    lines.join("\n")
}

fn format_views(table_name: &str, views: &[LibraryView]) -> String {
    if views.is_empty() {
        return format!("{} has no custom time views", table_name);
    }
    let mut lines = vec![
        format!("{} view(s) of {}", views.len(), table_name),
        String::new(),
    ];
    for view in views {
        let mut line = format!("  {} (id {})", view.view_name, view.id);
        if let Some(key) = view.key.as_deref() {
            line.push_str(&format!("  key={}", key));
        }
        if let Some(format) = view.format.as_deref() {
            line.push_str(&format!("  format={}", format));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::api::models::{ChartBucket, Database, LogLibrary, QueryResult};

    const NOW: i64 = 1_700_000_900;

    fn database(id: i64, name: &str) -> Database {
        Database {
            id,
            iid: 1,
            name: name.to_string(),
            desc: None,
        }
    }

    fn library(id: i64, name: &str, create_type: i64) -> LogLibrary {
        LogLibrary {
            id,
            table_name: name.to_string(),
            create_type,
            desc: None,
            days: None,
        }
    }

    fn rows(n: usize) -> QueryResult {
        QueryResult {
            logs: (0..n)
                .map(|i| serde_json::json!({"_time_second_": NOW - i as i64, "body": "row"}))
                .collect(),
            count: n as u64,
            buckets: vec![ChartBucket {
                from: NOW - 900,
                to: NOW,
                count: n as u64,
            }],
        }
    }

    fn app() -> App {
        App::new(&Config::default(), LogBuffer::new())
    }

    fn loaded(libraries: Vec<LogLibrary>) -> App {
        let mut app = app();
        app.apply_event(SessionEvent::DatabasesLoaded {
            result: Ok(vec![database(1, "default")]),
        });
        app.apply_event(SessionEvent::LibrariesLoaded {
            result: Ok(libraries),
        });
        app
    }

    fn run_query_spec(command: Command) -> FetchSpec {
        match command {
            Command::RunQuery(spec) => spec,
            other => panic!("expected RunQuery, got {:?}", other),
        }
    }

    #[test]
    fn test_startup_chain_fetches_databases_then_libraries() {
        let mut app = app();
        assert_eq!(app.startup_commands(), vec![Command::FetchDatabases]);
        assert!(app.libraries_loading);

        let commands = app.apply_event(SessionEvent::DatabasesLoaded {
            result: Ok(vec![database(1, "default"), database(2, "ops")]),
        });
        assert_eq!(commands, vec![Command::FetchLibraries { database_id: 1 }]);

        let commands = app.apply_event(SessionEvent::LibrariesLoaded {
            result: Ok(vec![library(7, "app_stdout", 0)]),
        });
        assert!(commands.is_empty());
        assert!(!app.libraries_loading);
        assert_eq!(app.workspace.libraries().len(), 1);
    }

    #[test]
    fn test_preferred_database_wins() {
        let mut config = Config::default();
        config.database = Some("ops".to_string());
        let mut app = App::new(&config, LogBuffer::new());

        let commands = app.apply_event(SessionEvent::DatabasesLoaded {
            result: Ok(vec![database(1, "default"), database(2, "ops")]),
        });
        assert_eq!(commands, vec![Command::FetchLibraries { database_id: 2 }]);
    }

    #[test]
    fn test_databases_error_settles_loading() {
        let mut app = app();
        app.startup_commands();
        let commands = app.apply_event(SessionEvent::DatabasesLoaded {
            result: Err(ApiError::Network("connect refused".to_string())),
        });
        assert!(commands.is_empty());
        assert!(!app.libraries_loading);
        assert!(!app.toasts.is_empty());
    }

    #[test]
    fn test_open_selected_creates_pane_and_emits_query() {
        let mut app = loaded(vec![library(7, "app_stdout", 0), library(9, "ingress", 0)]);

        let spec = run_query_spec(app.open_selected(NOW).unwrap());
        assert_eq!(spec.library_id, 7);
        assert_eq!(spec.pane_key, "7");
        assert_eq!(spec.params.page, 1);

        assert!(app.workspace.is_active(7));
        assert!(!app.link.is_empty());
    }

    #[test]
    fn test_reopen_activates_without_fetch() {
        let mut app = loaded(vec![library(7, "app_stdout", 0), library(9, "ingress", 0)]);
        app.open_selected(NOW);
        app.library_cursor = 1;
        app.open_selected(NOW);
        assert!(app.workspace.is_active(9));

        app.library_cursor = 0;
        assert_eq!(app.open_selected(NOW), None);
        assert!(app.workspace.is_active(7));
        assert_eq!(app.workspace.pane_count(), 2);

        // opening the already-active library changes nothing either
        assert_eq!(app.open_selected(NOW), None);
    }

    #[test]
    fn test_delete_flow_confirms_then_reconciles() {
        let mut app = loaded(vec![library(7, "app_stdout", 0), library(9, "ingress", 0)]);
        app.open_selected(NOW);

        app.request_delete();
        assert!(matches!(
            app.modal,
            Some(Modal::ConfirmDelete { library_id: 7, .. })
        ));

        let commands = app.confirm_delete(7, "app_stdout".to_string());
        assert_eq!(
            commands,
            vec![Command::DeleteLibrary {
                library_id: 7,
                table_name: "app_stdout".to_string(),
            }]
        );
        assert!(app.modal.is_none());
        assert!(!app.toasts.is_empty());

        let commands = app.apply_event(SessionEvent::LibraryDeleted {
            library_id: 7,
            table_name: "app_stdout".to_string(),
            result: Ok(()),
        });
        assert!(commands.contains(&Command::AbortQuery {
            pane_key: "7".to_string()
        }));
        assert!(commands.contains(&Command::FetchLibraries { database_id: 1 }));
        assert_eq!(app.workspace.pane_count(), 0);
        assert!(app.link.is_empty());
        assert!(app.libraries_loading);
    }

    #[test]
    fn test_delete_error_keeps_pane() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        app.open_selected(NOW);
        app.confirm_delete(7, "app_stdout".to_string());

        let commands = app.apply_event(SessionEvent::LibraryDeleted {
            library_id: 7,
            table_name: "app_stdout".to_string(),
            result: Err(ApiError::Platform {
                code: 10032,
                msg: "table busy".to_string(),
            }),
        });
        assert!(commands.is_empty());
        assert_eq!(app.workspace.pane_count(), 1);
        assert!(app.workspace.is_active(7));
    }

    #[test]
    fn test_delete_unopened_library_only_refetches() {
        let mut app = loaded(vec![library(7, "app_stdout", 0), library(9, "ingress", 0)]);
        app.open_selected(NOW);

        let commands = app.apply_event(SessionEvent::LibraryDeleted {
            library_id: 9,
            table_name: "ingress".to_string(),
            result: Ok(()),
        });
        // no pane to close, so no abort
        assert_eq!(commands, vec![Command::FetchLibraries { database_id: 1 }]);
        assert!(app.workspace.is_active(7));
    }

    #[test]
    fn test_delete_without_database_is_guarded() {
        let mut app = app();
        app.request_delete();
        assert!(app.modal.is_none());
        assert!(!app.toasts.is_empty());
    }

    #[test]
    fn test_stale_result_dropped_after_search() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        let first = run_query_spec(app.open_selected(NOW).unwrap());

        let commands = app.submit_search("error".to_string(), NOW + 5);
        assert_eq!(commands.len(), 1);
        let second = run_query_spec(commands.into_iter().next().unwrap());
        assert_ne!(first.generation, second.generation);

        // the superseded fetch lands late and must not stick
        app.apply_event(SessionEvent::QueryLoaded {
            pane_key: "7".to_string(),
            generation: first.generation,
            result: Ok(rows(3)),
        });
        let pane = app.workspace.active_pane().unwrap();
        assert!(pane.logs.is_empty());
        assert!(pane.is_fetching());

        app.apply_event(SessionEvent::QueryLoaded {
            pane_key: "7".to_string(),
            generation: second.generation,
            result: Ok(rows(2)),
        });
        let pane = app.workspace.active_pane().unwrap();
        assert_eq!(pane.logs.len(), 2);
        assert!(!pane.is_fetching());
        assert_eq!(app.log_cursor, None);
    }

    #[test]
    fn test_query_error_settles_spinner_and_toasts() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        let spec = run_query_spec(app.open_selected(NOW).unwrap());

        app.apply_event(SessionEvent::QueryLoaded {
            pane_key: "7".to_string(),
            generation: spec.generation,
            result: Err(ApiError::Network("timeout".to_string())),
        });
        assert!(!app.workspace.active_pane().unwrap().is_fetching());
        assert!(!app.toasts.is_empty());
    }

    #[test]
    fn test_close_active_pane_aborts_and_switches() {
        let mut app = loaded(vec![library(7, "app_stdout", 0), library(9, "ingress", 0)]);
        app.open_selected(NOW);
        app.library_cursor = 1;
        app.open_selected(NOW);
        app.log_cursor = Some(3);

        let commands = app.close_active_pane();
        assert_eq!(
            commands,
            vec![Command::AbortQuery {
                pane_key: "9".to_string()
            }]
        );
        assert!(app.workspace.is_active(7));
        assert_eq!(app.log_cursor, None);
        assert!(!app.link.is_empty());
    }

    #[test]
    fn test_change_page_emits_clamped_queries() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        let spec = run_query_spec(app.open_selected(NOW).unwrap());
        let mut result = rows(100);
        result.count = 250; // 3 pages at the default size
        app.apply_event(SessionEvent::QueryLoaded {
            pane_key: "7".to_string(),
            generation: spec.generation,
            result: Ok(result),
        });

        let commands = app.change_page(1, NOW);
        assert_eq!(
            run_query_spec(commands.into_iter().next().unwrap()).params.page,
            2
        );

        let commands = app.change_page(-1, NOW);
        assert_eq!(
            run_query_spec(commands.into_iter().next().unwrap()).params.page,
            1
        );

        // already at the first page
        assert!(app.change_page(-1, NOW).is_empty());
    }

    #[test]
    fn test_refresh_without_pane_is_noop() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        assert!(app.refresh_active(NOW).is_empty());

        app.open_selected(NOW);
        assert_eq!(app.refresh_active(NOW + 60).len(), 1);
    }

    #[test]
    fn test_views_request_gated_to_raw_tables() {
        let mut app = loaded(vec![library(7, "app_stdout", 0), library(9, "derived", 1)]);

        app.library_cursor = 1;
        assert_eq!(app.request_views(), None);
        assert!(app.modal.is_none());

        app.library_cursor = 0;
        let command = app.request_views().unwrap();
        assert_eq!(
            command,
            Command::FetchViews {
                library_id: 7,
                table_name: "app_stdout".to_string(),
            }
        );
        assert!(matches!(app.modal, Some(Modal::Views)));
    }

    #[test]
    fn test_info_modal_fills_from_event() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        let command = app.request_info().unwrap();
        assert_eq!(command, Command::FetchLibraryDetail { library_id: 7 });

        app.apply_event(SessionEvent::LibraryDetailLoaded {
            result: Ok(LibraryDetail {
                id: 7,
                table_name: "app_stdout".to_string(),
                create_type: 0,
                desc: Some("app logs".to_string()),
                days: Some(7),
                time_field: Some("_time_second_".to_string()),
                ctime: Some(NOW),
                uid: None,
            }),
        });
        assert!(app.modal_content.contains("app_stdout"));
        assert!(app.modal_content.contains("raw table"));
        assert!(app.modal_content.contains("7 days"));
    }

    #[test]
    fn test_late_detail_after_modal_closed_is_ignored() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        app.request_info();
        app.modal = None;
        let before = app.modal_content.clone();

        app.apply_event(SessionEvent::LibraryDetailLoaded {
            result: Ok(LibraryDetail {
                id: 7,
                table_name: "late".to_string(),
                create_type: 0,
                desc: None,
                days: None,
                time_field: None,
                ctime: None,
                uid: None,
            }),
        });
        assert!(app.modal.is_none());
        assert_eq!(app.modal_content, before);
    }

    #[test]
    fn test_search_modal_prefills_current_keyword() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        app.open_selected(NOW);

        app.open_search();
        assert!(matches!(&app.modal, Some(Modal::Search { input }) if input.is_empty()));

        app.submit_search("status=500".to_string(), NOW + 5);
        app.open_search();
        assert!(matches!(&app.modal, Some(Modal::Search { input }) if input == "status=500"));
    }

    #[test]
    fn test_library_cursor_clamped_after_refetch() {
        let mut app = loaded(vec![
            library(1, "a", 0),
            library(2, "b", 0),
            library(3, "c", 0),
        ]);
        app.library_cursor = 2;

        app.apply_event(SessionEvent::LibrariesLoaded {
            result: Ok(vec![library(1, "a", 0)]),
        });
        assert_eq!(app.library_cursor, 0);
    }

    #[test]
    fn test_pane_switch_resets_cursors() {
        let mut app = loaded(vec![library(7, "app_stdout", 0), library(9, "ingress", 0)]);
        app.open_selected(NOW);
        app.library_cursor = 1;
        app.open_selected(NOW);
        app.log_cursor = Some(5);
        app.chart_cursor = Some(2);

        app.next_pane();
        assert_eq!(app.log_cursor, None);
        assert_eq!(app.chart_cursor, None);
    }

    #[test]
    fn test_log_cursor_moves_within_rows() {
        let mut app = loaded(vec![library(7, "app_stdout", 0)]);
        let spec = run_query_spec(app.open_selected(NOW).unwrap());
        app.apply_event(SessionEvent::QueryLoaded {
            pane_key: "7".to_string(),
            generation: spec.generation,
            result: Ok(rows(5)),
        });

        app.move_log_cursor(1);
        assert_eq!(app.log_cursor, Some(0));
        app.move_log_cursor(10);
        assert_eq!(app.log_cursor, Some(4));
        app.move_log_cursor(-1);
        assert_eq!(app.log_cursor, Some(3));

        app.clear_selection();
        assert_eq!(app.log_cursor, None);
    }
}
