// Theme system for the TUI
//
// Provides customizable color themes that can be switched at runtime.
// Each theme defines colors for all UI elements.

use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    Dark,
    Light,
    Monokai,
    #[default]
    Dracula,
    Nord,
    Solarized,
}

impl ThemeKind {
    /// Get all available themes
    pub fn all() -> &'static [ThemeKind] {
        &[
            ThemeKind::Dark,
            ThemeKind::Light,
            ThemeKind::Monokai,
            ThemeKind::Dracula,
            ThemeKind::Nord,
            ThemeKind::Solarized,
        ]
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Parse a theme name from config (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(ThemeKind::Dark),
            "light" => Some(ThemeKind::Light),
            "monokai" => Some(ThemeKind::Monokai),
            "dracula" => Some(ThemeKind::Dracula),
            "nord" => Some(ThemeKind::Nord),
            "solarized" => Some(ThemeKind::Solarized),
            _ => None,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Monokai => "Monokai",
            ThemeKind::Dracula => "Dracula",
            ThemeKind::Nord => "Nord",
            ThemeKind::Solarized => "Solarized",
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Monokai => Theme::monokai(),
            ThemeKind::Dracula => Theme::dracula(),
            ThemeKind::Nord => Theme::nord(),
            ThemeKind::Solarized => Theme::solarized(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Selection
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Library list
    pub library_raw: Color,
    pub library_template: Color,

    // Pane tab strip
    pub tab_active: Color,
    pub tab_inactive: Color,
    pub tab_fetching: Color,

    // Keyword matches in log rows
    pub keyword_match: Color,

    // Histogram
    pub histogram_bar: Color,
    pub histogram_cursor: Color,

    // Toasts
    pub toast_success: Color,
    pub toast_error: Color,
    pub toast_loading: Color,

    // Log levels (rows and system logs)
    pub level_error: Color,
    pub level_warn: Color,
    pub level_info: Color,
    pub level_debug: Color,
    pub level_trace: Color,

    // Secondary text (timestamps, counts, hints)
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Theme {
    /// Dark theme
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            border: Color::Gray,
            border_focused: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,

            selected_bg: Color::DarkGray,
            selected_fg: Color::Yellow,

            library_raw: Color::White,
            library_template: Color::Magenta,

            tab_active: Color::Yellow,
            tab_inactive: Color::Gray,
            tab_fetching: Color::Cyan,

            keyword_match: Color::Yellow,

            histogram_bar: Color::Cyan,
            histogram_cursor: Color::Yellow,

            toast_success: Color::Green,
            toast_error: Color::Red,
            toast_loading: Color::Cyan,

            level_error: Color::Red,
            level_warn: Color::Yellow,
            level_info: Color::Blue,
            level_debug: Color::Gray,
            level_trace: Color::DarkGray,

            dim: Color::DarkGray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            border: Color::DarkGray,
            border_focused: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,

            library_raw: Color::Black,
            library_template: Color::Magenta,

            tab_active: Color::Blue,
            tab_inactive: Color::DarkGray,
            tab_fetching: Color::Cyan,

            keyword_match: Color::Rgb(184, 134, 11),

            histogram_bar: Color::Blue,
            histogram_cursor: Color::Rgb(184, 134, 11),

            toast_success: Color::Green,
            toast_error: Color::Red,
            toast_loading: Color::Blue,

            level_error: Color::Red,
            level_warn: Color::Rgb(184, 134, 11),
            level_info: Color::Blue,
            level_debug: Color::DarkGray,
            level_trace: Color::Gray,

            dim: Color::Gray,
        }
    }

    /// Monokai theme
    pub fn monokai() -> Self {
        Self {
            bg: Color::Rgb(39, 40, 34),
            fg: Color::Rgb(248, 248, 242),
            border: Color::Rgb(117, 113, 94),
            border_focused: Color::Rgb(166, 226, 46),

            title: Color::Rgb(166, 226, 46),
            status_bar: Color::Rgb(102, 217, 239),

            selected_bg: Color::Rgb(73, 72, 62),
            selected_fg: Color::Rgb(230, 219, 116),

            library_raw: Color::Rgb(248, 248, 242),
            library_template: Color::Rgb(174, 129, 255),

            tab_active: Color::Rgb(230, 219, 116),
            tab_inactive: Color::Rgb(117, 113, 94),
            tab_fetching: Color::Rgb(102, 217, 239),

            keyword_match: Color::Rgb(230, 219, 116),

            histogram_bar: Color::Rgb(102, 217, 239),
            histogram_cursor: Color::Rgb(230, 219, 116),

            toast_success: Color::Rgb(166, 226, 46),
            toast_error: Color::Rgb(249, 38, 114),
            toast_loading: Color::Rgb(102, 217, 239),

            level_error: Color::Rgb(249, 38, 114),
            level_warn: Color::Rgb(230, 219, 116),
            level_info: Color::Rgb(102, 217, 239),
            level_debug: Color::Rgb(117, 113, 94),
            level_trace: Color::Rgb(117, 113, 94),

            dim: Color::Rgb(117, 113, 94),
        }
    }

    /// Dracula theme (default)
    pub fn dracula() -> Self {
        Self {
            bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            border: Color::Rgb(68, 71, 90),
            border_focused: Color::Rgb(189, 147, 249),

            title: Color::Rgb(139, 233, 253),
            status_bar: Color::Rgb(80, 250, 123),

            selected_bg: Color::Rgb(68, 71, 90),
            selected_fg: Color::Rgb(241, 250, 140),

            library_raw: Color::Rgb(248, 248, 242),
            library_template: Color::Rgb(189, 147, 249),

            tab_active: Color::Rgb(241, 250, 140),
            tab_inactive: Color::Rgb(98, 114, 164),
            tab_fetching: Color::Rgb(139, 233, 253),

            keyword_match: Color::Rgb(241, 250, 140),

            histogram_bar: Color::Rgb(139, 233, 253),
            histogram_cursor: Color::Rgb(241, 250, 140),

            toast_success: Color::Rgb(80, 250, 123),
            toast_error: Color::Rgb(255, 85, 85),
            toast_loading: Color::Rgb(139, 233, 253),

            level_error: Color::Rgb(255, 85, 85),
            level_warn: Color::Rgb(241, 250, 140),
            level_info: Color::Rgb(139, 233, 253),
            level_debug: Color::Rgb(98, 114, 164),
            level_trace: Color::Rgb(68, 71, 90),

            dim: Color::Rgb(98, 114, 164),
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            border: Color::Rgb(76, 86, 106),
            border_focused: Color::Rgb(136, 192, 208),

            title: Color::Rgb(136, 192, 208),
            status_bar: Color::Rgb(163, 190, 140),

            selected_bg: Color::Rgb(67, 76, 94),
            selected_fg: Color::Rgb(235, 203, 139),

            library_raw: Color::Rgb(236, 239, 244),
            library_template: Color::Rgb(180, 142, 173),

            tab_active: Color::Rgb(235, 203, 139),
            tab_inactive: Color::Rgb(76, 86, 106),
            tab_fetching: Color::Rgb(136, 192, 208),

            keyword_match: Color::Rgb(235, 203, 139),

            histogram_bar: Color::Rgb(136, 192, 208),
            histogram_cursor: Color::Rgb(235, 203, 139),

            toast_success: Color::Rgb(163, 190, 140),
            toast_error: Color::Rgb(191, 97, 106),
            toast_loading: Color::Rgb(136, 192, 208),

            level_error: Color::Rgb(191, 97, 106),
            level_warn: Color::Rgb(235, 203, 139),
            level_info: Color::Rgb(129, 161, 193),
            level_debug: Color::Rgb(76, 86, 106),
            level_trace: Color::Rgb(59, 66, 82),

            dim: Color::Rgb(76, 86, 106),
        }
    }

    /// Solarized dark theme
    pub fn solarized() -> Self {
        Self {
            bg: Color::Rgb(0, 43, 54),
            fg: Color::Rgb(131, 148, 150),
            border: Color::Rgb(88, 110, 117),
            border_focused: Color::Rgb(38, 139, 210),

            title: Color::Rgb(38, 139, 210),
            status_bar: Color::Rgb(133, 153, 0),

            selected_bg: Color::Rgb(7, 54, 66),
            selected_fg: Color::Rgb(181, 137, 0),

            library_raw: Color::Rgb(147, 161, 161),
            library_template: Color::Rgb(108, 113, 196),

            tab_active: Color::Rgb(181, 137, 0),
            tab_inactive: Color::Rgb(88, 110, 117),
            tab_fetching: Color::Rgb(42, 161, 152),

            keyword_match: Color::Rgb(181, 137, 0),

            histogram_bar: Color::Rgb(42, 161, 152),
            histogram_cursor: Color::Rgb(181, 137, 0),

            toast_success: Color::Rgb(133, 153, 0),
            toast_error: Color::Rgb(220, 50, 47),
            toast_loading: Color::Rgb(42, 161, 152),

            level_error: Color::Rgb(220, 50, 47),
            level_warn: Color::Rgb(181, 137, 0),
            level_info: Color::Rgb(38, 139, 210),
            level_debug: Color::Rgb(88, 110, 117),
            level_trace: Color::Rgb(101, 123, 131),

            dim: Color::Rgb(88, 110, 117),
        }
    }

    // Helper methods for creating styles

    /// Base style with theme foreground
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Border style for a panel, focused or not
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Title style
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Dim style for secondary text
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Style for a log level string ("error", "warn", ...), any case
    pub fn level_style(&self, level: &str) -> Style {
        let color = match level.to_ascii_lowercase().as_str() {
            "error" | "fatal" | "critical" => self.level_error,
            "warn" | "warning" => self.level_warn,
            "info" => self.level_info,
            "debug" => self.level_debug,
            "trace" => self.level_trace,
            _ => self.fg,
        };
        if color == self.level_error {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_wraps() {
        let mut kind = ThemeKind::Dark;
        for _ in 0..ThemeKind::all().len() {
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ThemeKind::from_name("dracula"), Some(ThemeKind::Dracula));
        assert_eq!(ThemeKind::from_name("NORD"), Some(ThemeKind::Nord));
        assert_eq!(ThemeKind::from_name("neon"), None);
    }

    #[test]
    fn test_level_style_ignores_case() {
        let theme = Theme::dark();
        assert_eq!(
            theme.level_style("ERROR").fg,
            Some(theme.level_error)
        );
        // unknown levels fall back to the plain foreground
        assert_eq!(theme.level_style("verbose").fg, Some(theme.fg));
    }
}
