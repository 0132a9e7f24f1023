// Scrollable state for TUI panels
//
// Each panel owns its scroll state; App just renders and routes input.
// Auto-follow keeps the view pinned to the newest content until the user
// scrolls up, and re-engages when they return to the bottom.

/// Scroll state for a single panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Line/item index at the top of the viewport
    offset: usize,

    /// Total number of items/lines in content
    total: usize,

    /// Number of items/lines visible in viewport
    viewport: usize,

    /// Whether to follow new content (stick to bottom)
    pub auto_follow: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Create scroll state pinned to the top (for paged content)
    pub fn top() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: false,
        }
    }

    /// Update content and viewport dimensions. Call each render frame.
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up one unit. Disables auto-follow.
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down one unit. Re-enables auto-follow at the bottom.
    pub fn scroll_down(&mut self) {
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }

        if self.total > 0 && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());

        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    /// Reset to top with auto-follow off (new content replaced the old)
    pub fn reset(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Scroll the minimum amount to bring `index` into the viewport
    pub fn ensure_visible(&mut self, index: usize) {
        if self.viewport == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Panels that can be focused for input routing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusablePanel {
    /// Library list (default focus)
    #[default]
    Libraries,
    /// Histogram over the active pane's window
    Chart,
    /// Log rows of the active pane
    Logs,
    /// System log tail at the bottom
    SysLogs,
}

impl FocusablePanel {
    const ORDER: [FocusablePanel; 4] = [
        FocusablePanel::Libraries,
        FocusablePanel::Chart,
        FocusablePanel::Logs,
        FocusablePanel::SysLogs,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|&p| p == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|&p| p == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        assert!(scroll.auto_follow);

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        assert!(scroll.auto_follow);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_scroll_to_bottom_enables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        scroll.scroll_up();
        assert!(!scroll.auto_follow);

        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn test_top_state_stays_put_as_content_grows() {
        let mut scroll = ScrollState::top();

        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_ensure_visible_scrolls_minimally() {
        let mut scroll = ScrollState::top();
        scroll.update_dimensions(50, 10);

        // already visible: no movement
        scroll.ensure_visible(5);
        assert_eq!(scroll.offset(), 0);

        // below the viewport: cursor lands on the last visible line
        scroll.ensure_visible(25);
        assert_eq!(scroll.offset(), 16);

        // above the viewport: cursor lands on the first visible line
        scroll.ensure_visible(3);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn test_visible_range() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(100, 10);

        let (start, end) = scroll.visible_range();
        assert_eq!(start, 90);
        assert_eq!(end, 100);

        scroll.scroll_to_top();
        let (start, end) = scroll.visible_range();
        assert_eq!(start, 0);
        assert_eq!(end, 10);
    }

    #[test]
    fn test_focus_cycle_wraps() {
        let mut panel = FocusablePanel::Libraries;
        for _ in 0..4 {
            panel = panel.next();
        }
        assert_eq!(panel, FocusablePanel::Libraries);
        assert_eq!(FocusablePanel::Libraries.prev(), FocusablePanel::SysLogs);
    }
}
