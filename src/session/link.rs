//! Share-link state
//!
//! The web console persists the active query in the URL so a view can be
//! shared. The terminal has no URL bar, so the equivalent state lives here
//! and `u` copies a console deep link built from it. When the last pane
//! closes the state resets to defaults, matching a cleared URL.

use crate::session::pane::Pane;
use crate::util::query_escape;

/// Mirror of the active pane's query parameters, all unset by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkState {
    pub library_id: Option<i64>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub keyword: Option<String>,
}

impl LinkState {
    pub fn from_pane(pane: &Pane) -> LinkState {
        LinkState {
            library_id: Some(pane.library_id),
            start: Some(pane.range.start),
            end: Some(pane.range.end),
            page: Some(pane.page),
            page_size: Some(pane.page_size),
            keyword: if pane.keyword.is_empty() {
                None
            } else {
                Some(pane.keyword.clone())
            },
        }
    }

    pub fn reset(&mut self) {
        *self = LinkState::default();
    }

    pub fn is_empty(&self) -> bool {
        self.library_id.is_none()
    }

    /// Build the console deep link, or None when no pane is reflected.
    pub fn url(&self, console_url: &str) -> Option<String> {
        let tid = self.library_id?;
        let mut url = format!("{}/query?tid={}", console_url.trim_end_matches('/'), tid);
        if let (Some(st), Some(et)) = (self.start, self.end) {
            url.push_str(&format!("&st={}&et={}", st, et));
        }
        if let Some(page) = self.page {
            url.push_str(&format!("&page={}", page));
        }
        if let Some(size) = self.page_size {
            url.push_str(&format!("&pageSize={}", size));
        }
        if let Some(kw) = &self.keyword {
            url.push_str(&format!("&kw={}", query_escape(kw)));
        }
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::LogLibrary;
    use crate::session::pane::Pane;

    fn sample_pane() -> Pane {
        let lib = LogLibrary {
            id: 7,
            table_name: "app_stdout".to_string(),
            create_type: 0,
            desc: None,
            days: None,
        };
        Pane::open(&lib, 1_700_000_900, 15, 100, 1)
    }

    #[test]
    fn test_default_is_empty() {
        let link = LinkState::default();
        assert!(link.is_empty());
        assert_eq!(link.url("https://logs.example.com"), None);
    }

    #[test]
    fn test_url_from_pane() {
        let pane = sample_pane();
        let link = LinkState::from_pane(&pane);
        let url = link.url("https://logs.example.com/").unwrap();
        assert_eq!(
            url,
            "https://logs.example.com/query?tid=7&st=1700000000&et=1700000900&page=1&pageSize=100"
        );
    }

    #[test]
    fn test_url_escapes_keyword() {
        let mut pane = sample_pane();
        pane.keyword = "status=500 error".to_string();
        let link = LinkState::from_pane(&pane);
        let url = link.url("https://logs.example.com").unwrap();
        assert!(url.ends_with("&kw=status%3D500%20error"));
    }

    #[test]
    fn test_reset_returns_to_defaults() {
        let mut link = LinkState::from_pane(&sample_pane());
        assert!(!link.is_empty());
        link.reset();
        assert_eq!(link, LinkState::default());
    }
}
