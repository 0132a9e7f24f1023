// TUI runtime
//
// This module manages the terminal console using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, completed service calls)
// - Executing the commands the app asks for

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod scroll;
pub mod theme;
pub mod ui;

use crate::api::Backend;
use crate::config::Config;
use crate::events::{Command, SessionEvent};
use crate::logging::LogBuffer;
use crate::session::FetchSpec;
use anyhow::{Context, Result};
use app::App;
use chrono::Utc;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use scroll::FocusablePanel;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Wall-clock seconds. Every query range is anchored to this.
fn now() -> i64 {
    Utc::now().timestamp()
}

/// Run the console
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. All service I/O happens on spawned tasks that report back
/// through the session event channel; the loop itself never awaits a
/// request inline.
pub async fn run_tui(backend: Backend, config: Config, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term).context("Failed to create terminal")?;

    let (event_tx, mut event_rx) = mpsc::channel(64);
    let mut executor = CommandExecutor::new(backend, config.instance_id, event_tx);
    let mut app = App::new(&config, log_buffer);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut executor, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Three inputs are multiplexed with tokio::select!:
/// 1. Keyboard and mouse input
/// 2. Timer ticks (spinner frames, toast expiry)
/// 3. Completed service calls arriving on the event channel
///
/// Commands produced by any of them go straight to the executor.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    executor: &mut CommandExecutor,
    event_rx: &mut mpsc::Receiver<SessionEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    let startup = app.startup_commands();
    executor.run(startup);

    loop {
        // Draw the UI
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            input = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            } => {
                match input {
                    Some(Event::Key(key_event)) => {
                        let commands = handle_key_event(app, key_event);
                        executor.run(commands);
                    }
                    Some(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                    _ => {}
                }
            }

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Completed service calls
            Some(session_event) = event_rx.recv() => {
                let commands = app.apply_event(session_event);
                executor.run(commands);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Focused panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Vec<Command> {
    // Layer 1: Modal captures all input when active
    if let Some(commands) = handle_modal_input(app, &key_event) {
        return commands;
    }

    // Layer 2: Global keys (work regardless of focus)
    if let Some(commands) = handle_global_keys(app, &key_event) {
        return commands;
    }

    // Layer 3: Keys for the focused panel
    handle_panel_keys(app, key_event)
}

/// Handle modal input - returns Some if the modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> Option<Vec<Command>> {
    if app.modal.is_none() {
        return None;
    }

    // CRITICAL: Always process Release events to keep InputHandler in sync
    // Without this, keys get stuck in "pressed" state after modal closes
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return Some(Vec::new());
    }
    if key_event.kind != KeyEventKind::Press {
        return Some(Vec::new());
    }

    let action = match app.modal.as_mut() {
        Some(modal) => modal.handle_input(key_event.code),
        None => return None,
    };

    let mut commands = Vec::new();
    match action {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::ConfirmDelete {
            library_id,
            table_name,
        } => {
            commands = app.confirm_delete(library_id, table_name);
        }
        ModalAction::SubmitSearch(keyword) => {
            commands = app.submit_search(keyword, now());
        }
        ModalAction::ScrollUp => app.modal_scroll.scroll_up(),
        ModalAction::ScrollDown => app.modal_scroll.scroll_down(),
        ModalAction::PageUp => app.modal_scroll.page_up(),
        ModalAction::PageDown => app.modal_scroll.page_down(),
        ModalAction::ScrollTop => app.modal_scroll.scroll_to_top(),
        ModalAction::ScrollBottom => app.modal_scroll.scroll_to_bottom(),
        ModalAction::Copy => app.copy_modal_content(),
    }

    Some(commands)
}

/// Handle global keys - returns Some if handled
/// Global keys work the same regardless of which panel has focus
/// Uses InputHandler for debounce (StateChange behavior = trigger once per press)
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> Option<Vec<Command>> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let key = key_event.code;
    let mut commands = Vec::new();

    match key {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            if app.handle_key_press(key) {
                app.should_quit = true;
            }
        }
        // Help modal
        KeyCode::Char('?') => {
            if app.handle_key_press(key) {
                app.modal = Some(Modal::help());
            }
        }
        // Cycle theme
        KeyCode::Char('t') => {
            if app.handle_key_press(key) {
                app.cycle_theme();
            }
        }
        // Focus cycling
        KeyCode::Tab => {
            if app.handle_key_press(key) {
                app.focus_next();
            }
        }
        KeyCode::BackTab => {
            if app.handle_key_press(key) {
                app.focus_prev();
            }
        }
        // Pane tabs
        KeyCode::Char('[') => {
            if app.handle_key_press(key) {
                app.prev_pane();
            }
        }
        KeyCode::Char(']') => {
            if app.handle_key_press(key) {
                app.next_pane();
            }
        }
        KeyCode::Char('x') => {
            if app.handle_key_press(key) {
                commands = app.close_active_pane();
            }
        }
        // Query controls for the active pane
        KeyCode::Char('/') => {
            if app.handle_key_press(key) {
                app.open_search();
            }
        }
        KeyCode::Char('n') => {
            if app.handle_key_press(key) {
                commands = app.change_page(1, now());
            }
        }
        KeyCode::Char('p') => {
            if app.handle_key_press(key) {
                commands = app.change_page(-1, now());
            }
        }
        KeyCode::Char('r') => {
            if app.handle_key_press(key) {
                commands = app.refresh_active(now());
            }
        }
        // Share link for the active pane
        KeyCode::Char('u') => {
            if app.handle_key_press(key) {
                app.copy_share_link();
            }
        }
        // Esc drops row/bucket selection back to auto-follow
        KeyCode::Esc => {
            if app.handle_key_press(key) {
                app.clear_selection();
            }
        }
        _ => return None,
    }

    Some(commands)
}

/// Keys routed to the focused panel. Navigation goes through InputHandler
/// for hold-to-repeat.
fn handle_panel_keys(app: &mut App, key_event: KeyEvent) -> Vec<Command> {
    match key_event.kind {
        KeyEventKind::Press => {}
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
            return Vec::new();
        }
        _ => return Vec::new(),
    }

    let key = key_event.code;
    if !app.handle_key_press(key) {
        return Vec::new();
    }

    match app.focused {
        FocusablePanel::Libraries => match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_library_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_library_cursor(1),
            KeyCode::Enter => {
                return app.open_selected(now()).into_iter().collect();
            }
            KeyCode::Char('d') => app.request_delete(),
            KeyCode::Char('i') => {
                return app.request_info().into_iter().collect();
            }
            KeyCode::Char('v') => {
                return app.request_views().into_iter().collect();
            }
            _ => {}
        },
        FocusablePanel::Chart => match key {
            KeyCode::Left | KeyCode::Char('h') => app.move_chart_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => app.move_chart_cursor(1),
            _ => {}
        },
        FocusablePanel::Logs => match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_log_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_log_cursor(1),
            KeyCode::PageUp => app.logs_scroll.page_up(),
            KeyCode::PageDown => app.logs_scroll.page_down(),
            KeyCode::Home => app.logs_scroll.scroll_to_top(),
            KeyCode::End => app.logs_scroll.scroll_to_bottom(),
            KeyCode::Enter => app.open_row_detail(),
            KeyCode::Char('y') => app.copy_selected_row(),
            _ => {}
        },
        FocusablePanel::SysLogs => match key {
            KeyCode::Up | KeyCode::Char('k') => app.syslog_scroll.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => app.syslog_scroll.scroll_down(),
            KeyCode::PageUp => app.syslog_scroll.page_up(),
            KeyCode::PageDown => app.syslog_scroll.page_down(),
            KeyCode::Home => app.syslog_scroll.scroll_to_top(),
            KeyCode::End => app.syslog_scroll.scroll_to_bottom(),
            _ => {}
        },
    }

    Vec::new()
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => {
            // If a modal is open, scroll its content directly
            if app.modal.is_some() {
                app.modal_scroll.scroll_up();
            } else {
                scroll_focused(app, -1);
            }
        }
        MouseEventKind::ScrollDown => {
            if app.modal.is_some() {
                app.modal_scroll.scroll_down();
            } else {
                scroll_focused(app, 1);
            }
        }
        _ => {}
    }
}

fn scroll_focused(app: &mut App, delta: i64) {
    match app.focused {
        FocusablePanel::Libraries => app.move_library_cursor(delta),
        FocusablePanel::Chart => app.move_chart_cursor(delta),
        FocusablePanel::Logs => app.move_log_cursor(delta),
        FocusablePanel::SysLogs => {
            if delta < 0 {
                app.syslog_scroll.scroll_up();
            } else {
                app.syslog_scroll.scroll_down();
            }
        }
    }
}

/// Executes [`Command`] values by spawning service calls that report back
/// through the session event channel.
///
/// Query tasks are tracked per pane so that a newer fetch supersedes the
/// one still in flight and closing a pane cancels its fetch outright.
/// Aborted tasks never reach the channel; a stale result that slips
/// through anyway is dropped by the workspace generation check.
struct CommandExecutor {
    backend: Arc<Backend>,
    instance_id: i64,
    tx: mpsc::Sender<SessionEvent>,
    /// In-flight query task per pane key. Settled handles linger until the
    /// next fetch replaces them; aborting a finished task is a no-op.
    queries: HashMap<String, AbortHandle>,
}

impl CommandExecutor {
    fn new(backend: Backend, instance_id: i64, tx: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            backend: Arc::new(backend),
            instance_id,
            tx,
            queries: HashMap::new(),
        }
    }

    fn run(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::FetchDatabases => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                let instance_id = self.instance_id;
                tokio::spawn(async move {
                    let result = backend.databases(instance_id).await;
                    let _ = tx.send(SessionEvent::DatabasesLoaded { result }).await;
                });
            }
            Command::FetchLibraries { database_id } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.libraries(database_id).await;
                    let _ = tx.send(SessionEvent::LibrariesLoaded { result }).await;
                });
            }
            Command::RunQuery(spec) => self.run_query(spec),
            Command::AbortQuery { pane_key } => {
                if let Some(handle) = self.queries.remove(&pane_key) {
                    handle.abort();
                    tracing::debug!(pane = %pane_key, "aborted in-flight query");
                }
            }
            Command::DeleteLibrary {
                library_id,
                table_name,
            } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.delete_library(library_id).await;
                    let _ = tx
                        .send(SessionEvent::LibraryDeleted {
                            library_id,
                            table_name,
                            result,
                        })
                        .await;
                });
            }
            Command::FetchLibraryDetail { library_id } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.library_detail(library_id).await;
                    let _ = tx.send(SessionEvent::LibraryDetailLoaded { result }).await;
                });
            }
            Command::FetchViews {
                library_id,
                table_name,
            } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.views(library_id).await;
                    let _ = tx.send(SessionEvent::ViewsLoaded { table_name, result }).await;
                });
            }
        }
    }

    fn run_query(&mut self, spec: FetchSpec) {
        let FetchSpec {
            library_id,
            pane_key,
            generation,
            params,
        } = spec;

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let key = pane_key.clone();
        let task = tokio::spawn(async move {
            let result = backend.query(library_id, &params).await;
            let _ = tx
                .send(SessionEvent::QueryLoaded {
                    pane_key,
                    generation,
                    result,
                })
                .await;
        });

        // A newer fetch supersedes whatever was still running for this pane
        if let Some(previous) = self.queries.insert(key, task.abort_handle()) {
            previous.abort();
        }
    }
}
