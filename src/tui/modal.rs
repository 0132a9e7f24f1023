// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return
// actions. App just holds Option<Modal>, input routing acts on the
// returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// User confirmed deletion of a library
    ConfirmDelete { library_id: i64, table_name: String },
    /// User submitted a search keyword (may be empty to clear)
    SubmitSearch(String),
    /// Scroll cached modal content
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,
    /// Copy modal content to the clipboard
    Copy,
}

/// Available modal types
#[derive(Debug, Clone)]
pub enum Modal {
    /// Help overlay with keyboard shortcuts
    Help,
    /// Delete confirmation for a library
    ConfirmDelete { library_id: i64, table_name: String },
    /// Library metadata - content cached in App
    LibraryInfo,
    /// Parse views of a library - content cached in App
    Views,
    /// Full log row as pretty JSON - content cached in App
    RowDetail,
    /// Keyword search input
    Search { input: String },
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn confirm_delete(library_id: i64, table_name: impl Into<String>) -> Self {
        Modal::ConfirmDelete {
            library_id,
            table_name: table_name.into(),
        }
    }

    /// Search modal pre-filled with the pane's current keyword
    pub fn search(current: &str) -> Self {
        Modal::Search {
            input: current.to_string(),
        }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::ConfirmDelete {
                library_id,
                table_name,
            } => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    ModalAction::ConfirmDelete {
                        library_id: *library_id,
                        table_name: table_name.clone(),
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
                    ModalAction::Close
                }
                _ => ModalAction::None,
            },
            Modal::LibraryInfo | Modal::Views | Modal::RowDetail => match key {
                KeyCode::Esc | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => ModalAction::ScrollUp,
                KeyCode::Down | KeyCode::Char('j') => ModalAction::ScrollDown,
                KeyCode::PageUp => ModalAction::PageUp,
                KeyCode::PageDown => ModalAction::PageDown,
                KeyCode::Home => ModalAction::ScrollTop,
                KeyCode::End => ModalAction::ScrollBottom,
                KeyCode::Char('y') => ModalAction::Copy,
                _ => ModalAction::None,
            },
            // Text entry: every printable char is input, not a shortcut
            Modal::Search { input } => match key {
                KeyCode::Enter => ModalAction::SubmitSearch(input.clone()),
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Backspace => {
                    input.pop();
                    ModalAction::None
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    ModalAction::None
                }
                _ => ModalAction::None,
            },
        }
    }
}
