//! Toast notifications
//!
//! Non-blocking overlays in the bottom-right corner. Timed toasts dismiss
//! themselves; loading toasts stay until they are replaced or dismissed.
//! A toast carries an optional key so a follow-up (for example the success
//! after a delete) replaces its loading toast instead of stacking under it.

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::theme::Theme;

/// Key shared by the delete loading toast and its outcome toast
pub const DELETE_TOAST_KEY: &str = "delete-library";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
    Loading,
}

pub struct Toast {
    key: Option<String>,
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
    /// None keeps the toast until replaced or dismissed
    duration: Option<Duration>,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info, Some(Duration::from_secs(2)))
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success, Some(Duration::from_secs(3)))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error, Some(Duration::from_secs(4)))
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Loading, None)
    }

    fn new(message: impl Into<String>, kind: ToastKind, duration: Option<Duration>) -> Self {
        Self {
            key: None,
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn is_expired(&self) -> bool {
        match self.duration {
            Some(duration) => self.created_at.elapsed() >= duration,
            None => false,
        }
    }
}

/// Active toasts, newest at the end
#[derive(Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    /// Add a toast. A keyed toast replaces any live toast with the same key.
    pub fn push(&mut self, toast: Toast) {
        if let Some(key) = &toast.key {
            self.toasts.retain(|t| t.key.as_deref() != Some(key));
        }
        self.toasts.push(toast);
    }

    /// Drop expired toasts. Call once per tick.
    pub fn prune(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Render all toasts stacked upward from the bottom-right corner
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, spinner: char) {
        let height: u16 = 3;
        let mut bottom = area.bottom().saturating_sub(2);

        for toast in self.toasts.iter().rev() {
            if bottom < area.y + height {
                break;
            }

            let (prefix, accent) = match toast.kind {
                ToastKind::Info => (String::new(), theme.title),
                ToastKind::Success => ("✓ ".to_string(), theme.toast_success),
                ToastKind::Error => ("✗ ".to_string(), theme.toast_error),
                ToastKind::Loading => (format!("{} ", spinner), theme.toast_loading),
            };
            let text = format!("{}{}", prefix, toast.message);

            let width = (text.width() as u16 + 4).min(area.width.saturating_sub(4));
            let x = area.right().saturating_sub(width + 2);
            let y = bottom.saturating_sub(height);
            let toast_area = Rect::new(x, y, width, height);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .style(Style::default().bg(theme.bg));

            let body = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.fg))
                .block(block);

            f.render_widget(Clear, toast_area);
            f.render_widget(body, toast_area);

            bottom = y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_toast_replaces_same_key() {
        let mut stack = ToastStack::new();
        stack.push(Toast::loading("deleting nginx_access ...").with_key(DELETE_TOAST_KEY));
        stack.push(Toast::success("deleted nginx_access").with_key(DELETE_TOAST_KEY));

        assert_eq!(stack.len(), 1);
        assert_eq!(stack.toasts[0].kind, ToastKind::Success);
    }

    #[test]
    fn test_unkeyed_toasts_stack() {
        let mut stack = ToastStack::new();
        stack.push(Toast::info("copied"));
        stack.push(Toast::info("copied again"));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_loading_toast_never_expires() {
        let toast = Toast::loading("working");
        assert!(!toast.is_expired());
    }

    #[test]
    fn test_prune_drops_expired() {
        let mut stack = ToastStack::new();
        let mut toast = Toast::info("gone");
        toast.duration = Some(Duration::ZERO);
        stack.push(toast);
        stack.push(Toast::loading("stays").with_key(DELETE_TOAST_KEY));

        stack.prune();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.toasts[0].kind, ToastKind::Loading);
    }

    #[test]
    fn test_keyed_replacement_leaves_others_alone() {
        let mut stack = ToastStack::new();
        stack.push(Toast::loading("deleting").with_key(DELETE_TOAST_KEY));
        stack.push(Toast::info("unrelated"));
        stack.push(Toast::error("delete failed").with_key(DELETE_TOAST_KEY));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.toasts[0].message, "unrelated");
        assert_eq!(stack.toasts[1].kind, ToastKind::Error);
    }
}
