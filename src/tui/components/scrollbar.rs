//! Scrollbar rendering helper
//!
//! One scrollbar implementation shared by every panel instead of
//! copy-pasted widget setup.

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Visual style for the scrollbar
#[derive(Debug, Clone, Copy, Default)]
pub enum ScrollbarStyle {
    /// Arrows at top and bottom
    Arrows,
    /// Just the thumb
    #[default]
    Minimal,
}

/// Render a vertical scrollbar for a panel. No-op when content fits.
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState, style: ScrollbarStyle) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = match style {
        ScrollbarStyle::Arrows => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓")),
        ScrollbarStyle::Minimal => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
    };

    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut scrollbar_state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}
