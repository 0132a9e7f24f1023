//! Pane state
//!
//! A pane is one open tab bound to a log library. It owns the library's
//! cached query results and the parameters that produced them. Panes are
//! created from a default template on first open and mutated in place by
//! the workspace on merge, re-query and activation.

use crate::api::models::{ChartBucket, LogLibrary, LogRow, QueryParams};
use crate::session::timerange::TimeRange;

/// First page of a query, 1-based as the platform counts.
pub const FIRST_PAGE: u64 = 1;

/// Load state of a pane's cached results.
///
/// A pane enters `Fetching` when created or re-queried and becomes `Ready`
/// when its fetch settles, whether or not it produced rows. A failed fetch
/// leaves the pane `Ready` with whatever results it already had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneState {
    Fetching,
    Ready,
}

/// One open tab and its cached results.
#[derive(Debug, Clone)]
pub struct Pane {
    /// Registry key, the library id stringified
    pub key: String,
    pub library_id: i64,
    /// Display label, the library's table name
    pub label: String,
    /// The library's createType discriminator
    pub library_type: i64,
    pub range: TimeRange,
    pub page: u64,
    pub page_size: u64,
    pub keyword: String,
    pub logs: Vec<LogRow>,
    /// Total row count reported by the platform for the current query
    pub total: u64,
    pub buckets: Vec<ChartBucket>,
    pub state: PaneState,
    /// Token of the most recent fetch issued for this pane. Results
    /// carrying any other token are stale and must be dropped.
    pub generation: u64,
}

impl Pane {
    /// Build a pane from the default template: fixed lookback ending now,
    /// first page, empty keyword, fetch pending.
    pub fn open(
        library: &LogLibrary,
        now: i64,
        lookback_minutes: i64,
        page_size: u64,
        generation: u64,
    ) -> Pane {
        Pane {
            key: library.id.to_string(),
            library_id: library.id,
            label: library.table_name.clone(),
            library_type: library.create_type,
            range: TimeRange::last_minutes(now, lookback_minutes),
            page: FIRST_PAGE,
            page_size,
            keyword: String::new(),
            logs: Vec::new(),
            total: 0,
            buckets: Vec::new(),
            state: PaneState::Fetching,
            generation,
        }
    }

    /// Rebuild library metadata from the pane's stored fields.
    ///
    /// Used when activation has no library record at hand, e.g. after the
    /// active library was deleted and the next pane takes over.
    pub fn library(&self) -> LogLibrary {
        LogLibrary {
            id: self.library_id,
            table_name: self.label.clone(),
            create_type: self.library_type,
            desc: None,
            days: None,
        }
    }

    /// Current query parameters in wire form.
    pub fn params(&self) -> QueryParams {
        QueryParams {
            start: self.range.start,
            end: self.range.end,
            page: self.page,
            page_size: self.page_size,
            keyword: self.keyword.clone(),
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.state == PaneState::Fetching
    }

    /// Number of pages the current total spans, at least 1.
    pub fn total_pages(&self) -> u64 {
        let size = self.page_size.max(1);
        (self.total.max(1) + size - 1) / size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(id: i64, name: &str, create_type: i64) -> LogLibrary {
        LogLibrary {
            id,
            table_name: name.to_string(),
            create_type,
            desc: None,
            days: None,
        }
    }

    #[test]
    fn test_open_uses_default_template() {
        let lib = library(7, "app_stdout", 0);
        let pane = Pane::open(&lib, 1_700_000_900, 15, 100, 1);

        assert_eq!(pane.key, "7");
        assert_eq!(pane.library_id, 7);
        assert_eq!(pane.label, "app_stdout");
        assert_eq!(pane.range.start, 1_700_000_000);
        assert_eq!(pane.range.end, 1_700_000_900);
        assert_eq!(pane.page, FIRST_PAGE);
        assert_eq!(pane.page_size, 100);
        assert_eq!(pane.keyword, "");
        assert!(pane.logs.is_empty());
        assert!(pane.buckets.is_empty());
        assert!(pane.is_fetching());
    }

    #[test]
    fn test_library_rebuilt_from_stored_fields() {
        let lib = library(12, "nginx_access", 1);
        let pane = Pane::open(&lib, 1_700_000_000, 15, 100, 1);
        let rebuilt = pane.library();

        assert_eq!(rebuilt.id, 12);
        assert_eq!(rebuilt.table_name, "nginx_access");
        assert_eq!(rebuilt.create_type, 1);
        assert_eq!(rebuilt.desc, None);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let lib = library(1, "t", 0);
        let mut pane = Pane::open(&lib, 0, 15, 100, 1);

        assert_eq!(pane.total_pages(), 1);
        pane.total = 100;
        assert_eq!(pane.total_pages(), 1);
        pane.total = 101;
        assert_eq!(pane.total_pages(), 2);
        pane.total = 250;
        assert_eq!(pane.total_pages(), 3);
    }
}
