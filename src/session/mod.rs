//! Session state: the pane registry and selection
//!
//! `Workspace` is the single writer for everything the console session
//! knows: the database list, the library list, the open panes and the
//! current selection. Event handlers receive it by `&mut` and mutate it
//! through controller methods only; nothing here touches the network or
//! the runtime, which keeps the whole lifecycle testable without tokio.
//!
//! Fetches are coordinated by value: methods that need I/O return a
//! [`FetchSpec`] describing the query to run, and completed fetches come
//! back through [`Workspace::merge_results`] carrying the spec's
//! generation token. Results whose pane is gone or whose generation is
//! stale are dropped, so a closed pane can never be resurrected by a
//! late response.

pub mod link;
pub mod pane;
pub mod timerange;

use std::collections::HashMap;

use crate::api::models::{Database, LogLibrary, QueryParams, QueryResult};
use pane::{Pane, PaneState, FIRST_PAGE};

/// Everything needed to run one logs+charts fetch for a pane.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSpec {
    pub library_id: i64,
    pub pane_key: String,
    /// Token to present when merging results back
    pub generation: u64,
    pub params: QueryParams,
}

/// What `open` did.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    /// The library was already the active one; nothing changed
    AlreadyActive,
    /// An existing pane became active; no fetch needed
    Activated,
    /// A new pane was registered; run this fetch
    Created(FetchSpec),
}

/// What happened to a completed fetch's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged,
    /// Pane was re-queried since this fetch started; results dropped
    Stale,
    /// Pane was closed since this fetch started; results dropped
    Gone,
}

/// Reconciliation result of removing a pane.
#[derive(Debug, Clone, PartialEq)]
pub enum CloseOutcome {
    /// No pane was open for the key
    NotOpen,
    /// The last pane closed; selection cleared
    ClosedLast,
    /// The active pane closed; the first remaining pane took over
    SwitchedTo(LogLibrary),
    /// An inactive pane closed; selection untouched
    ClosedInactive,
}

/// The active library and its pane, always in lockstep.
///
/// Holding both in one struct keeps the both-set-or-neither invariant by
/// construction.
#[derive(Debug, Clone)]
pub struct Selection {
    pub library: LogLibrary,
    pub pane_key: String,
}

/// Owned, single-writer session state.
pub struct Workspace {
    databases: Vec<Database>,
    current_database: Option<Database>,
    libraries: Vec<LogLibrary>,
    panes: HashMap<String, Pane>,
    /// Pane keys in open order; always the same key set as `panes`
    order: Vec<String>,
    selection: Option<Selection>,
    next_generation: u64,
    lookback_minutes: i64,
    page_size: u64,
}

impl Workspace {
    pub fn new(lookback_minutes: i64, page_size: u64) -> Self {
        Self {
            databases: Vec::new(),
            current_database: None,
            libraries: Vec::new(),
            panes: HashMap::new(),
            order: Vec::new(),
            selection: None,
            next_generation: 1,
            lookback_minutes,
            page_size,
        }
    }

    fn bump_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        generation
    }

    // ─── Databases and libraries ─────────────────────────────────────────

    pub fn set_databases(&mut self, databases: Vec<Database>) {
        self.databases = databases;
    }

    /// Pick the current database, preferring `name` when it matches,
    /// falling back to the first known database.
    pub fn select_database(&mut self, name: Option<&str>) -> Option<Database> {
        let chosen = match name {
            Some(wanted) => self
                .databases
                .iter()
                .find(|db| db.name == wanted)
                .or_else(|| self.databases.first()),
            None => self.databases.first(),
        }
        .cloned();
        self.current_database = chosen.clone();
        chosen
    }

    pub fn current_database(&self) -> Option<&Database> {
        self.current_database.as_ref()
    }

    pub fn set_libraries(&mut self, libraries: Vec<LogLibrary>) {
        self.libraries = libraries;
    }

    pub fn libraries(&self) -> &[LogLibrary] {
        &self.libraries
    }

    // ─── Pane lifecycle ──────────────────────────────────────────────────

    /// Open a library: activate its pane if one exists, otherwise register
    /// a fresh pane and return the fetch to run for it.
    ///
    /// Opening the already-active library is a no-op.
    pub fn open(&mut self, library: &LogLibrary, now: i64) -> OpenOutcome {
        if let Some(selection) = &self.selection {
            if selection.library.id == library.id {
                return OpenOutcome::AlreadyActive;
            }
        }

        let key = library.id.to_string();
        if self.panes.contains_key(&key) {
            self.selection = Some(Selection {
                library: library.clone(),
                pane_key: key,
            });
            tracing::debug!(library = %library.table_name, "activated existing pane");
            return OpenOutcome::Activated;
        }

        let generation = self.bump_generation();
        let pane = Pane::open(
            library,
            now,
            self.lookback_minutes,
            self.page_size,
            generation,
        );
        let spec = FetchSpec {
            library_id: library.id,
            pane_key: key.clone(),
            generation,
            params: pane.params(),
        };
        self.panes.insert(key.clone(), pane);
        self.order.push(key.clone());
        self.selection = Some(Selection {
            library: library.clone(),
            pane_key: key,
        });
        tracing::debug!(library = %library.table_name, generation, "opened new pane");
        OpenOutcome::Created(spec)
    }

    /// Merge fetched rows and buckets into a pane, dropping the results if
    /// the pane is gone or was re-queried since the fetch started.
    pub fn merge_results(
        &mut self,
        pane_key: &str,
        generation: u64,
        result: QueryResult,
    ) -> MergeOutcome {
        let Some(pane) = self.panes.get_mut(pane_key) else {
            tracing::debug!(pane_key, generation, "dropping results for closed pane");
            return MergeOutcome::Gone;
        };
        if pane.generation != generation {
            tracing::debug!(
                pane_key,
                generation,
                current = pane.generation,
                "dropping stale results"
            );
            return MergeOutcome::Stale;
        }
        pane.logs = result.logs;
        pane.total = result.count;
        pane.buckets = result.buckets;
        pane.state = PaneState::Ready;
        MergeOutcome::Merged
    }

    /// Settle a fetch that failed or returned nothing: the pane keeps its
    /// current (possibly empty) results and just stops spinning.
    pub fn mark_ready(&mut self, pane_key: &str, generation: u64) -> MergeOutcome {
        let Some(pane) = self.panes.get_mut(pane_key) else {
            return MergeOutcome::Gone;
        };
        if pane.generation != generation {
            return MergeOutcome::Stale;
        }
        pane.state = PaneState::Ready;
        MergeOutcome::Merged
    }

    /// Make an open pane the active one, rebuilding library metadata from
    /// its stored fields. Returns false if no pane has the key.
    pub fn activate(&mut self, pane_key: &str) -> bool {
        let Some(pane) = self.panes.get(pane_key) else {
            return false;
        };
        self.selection = Some(Selection {
            library: pane.library(),
            pane_key: pane_key.to_string(),
        });
        true
    }

    /// Activate the next pane in open order, wrapping. Returns the new
    /// active key when the activation changed anything.
    pub fn next_pane(&mut self) -> Option<String> {
        self.step_pane(1)
    }

    /// Activate the previous pane in open order, wrapping.
    pub fn prev_pane(&mut self) -> Option<String> {
        self.step_pane(-1)
    }

    fn step_pane(&mut self, delta: i64) -> Option<String> {
        if self.order.len() < 2 {
            return None;
        }
        let current = self.selection.as_ref()?.pane_key.clone();
        let idx = self.order.iter().position(|key| *key == current)?;
        let len = self.order.len() as i64;
        let next_idx = ((idx as i64 + delta).rem_euclid(len)) as usize;
        let next_key = self.order[next_idx].clone();
        if next_key == current {
            return None;
        }
        self.activate(&next_key);
        Some(next_key)
    }

    /// Remove a pane and reconcile selection, per the delete rules: last
    /// pane out clears selection, the active pane's removal hands over to
    /// the first remaining key in prior order, an inactive removal changes
    /// nothing else.
    pub fn close(&mut self, pane_key: &str) -> CloseOutcome {
        if self.panes.remove(pane_key).is_none() {
            return CloseOutcome::NotOpen;
        }
        self.order.retain(|key| key != pane_key);

        if self.order.is_empty() {
            self.selection = None;
            tracing::debug!(pane_key, "closed last pane, selection cleared");
            return CloseOutcome::ClosedLast;
        }

        let was_active = self
            .selection
            .as_ref()
            .map(|selection| selection.pane_key == pane_key)
            .unwrap_or(false);
        if !was_active {
            return CloseOutcome::ClosedInactive;
        }

        let next_key = self.order[0].clone();
        self.activate(&next_key);
        let library = self
            .selection
            .as_ref()
            .map(|selection| selection.library.clone())
            .unwrap_or_else(|| self.panes[&next_key].library());
        tracing::debug!(pane_key, next = %next_key, "active pane closed, switched");
        CloseOutcome::SwitchedTo(library)
    }

    /// Reconcile pane state after a library was deleted on the platform.
    pub fn remove_library(&mut self, library_id: i64) -> CloseOutcome {
        self.close(&library_id.to_string())
    }

    // ─── Re-query ────────────────────────────────────────────────────────

    /// Apply a new keyword filter to the active pane and return the fetch
    /// to run. Resets to the first page; relative windows re-anchor to now.
    pub fn search(&mut self, keyword: String, now: i64) -> Option<FetchSpec> {
        self.requery(now, |pane| {
            pane.keyword = keyword;
            pane.page = FIRST_PAGE;
        })
    }

    /// Move the active pane by `delta` pages, clamped to the known page
    /// range. Returns None when the page did not change.
    pub fn change_page(&mut self, delta: i64, now: i64) -> Option<FetchSpec> {
        let pane = self.active_pane()?;
        let pages = pane.total_pages();
        let target = (pane.page as i64 + delta).clamp(1, pages as i64) as u64;
        if target == pane.page {
            return None;
        }
        self.requery(now, |pane| pane.page = target)
    }

    /// Re-run the active pane's query as-is, re-anchoring relative windows.
    pub fn refresh(&mut self, now: i64) -> Option<FetchSpec> {
        self.requery(now, |_| {})
    }

    fn requery(&mut self, now: i64, mutate: impl FnOnce(&mut Pane)) -> Option<FetchSpec> {
        let key = self.selection.as_ref()?.pane_key.clone();
        let generation = self.bump_generation();
        let pane = self.panes.get_mut(&key)?;
        mutate(pane);
        pane.range = pane.range.reanchor(now);
        pane.generation = generation;
        pane.state = PaneState::Fetching;
        Some(FetchSpec {
            library_id: pane.library_id,
            pane_key: key,
            generation,
            params: pane.params(),
        })
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn current_library(&self) -> Option<&LogLibrary> {
        self.selection.as_ref().map(|selection| &selection.library)
    }

    pub fn active_key(&self) -> Option<&str> {
        self.selection
            .as_ref()
            .map(|selection| selection.pane_key.as_str())
    }

    pub fn active_pane(&self) -> Option<&Pane> {
        let key = self.active_key()?;
        self.panes.get(key)
    }

    pub fn pane_count(&self) -> usize {
        self.order.len()
    }

    /// Panes in open order, for the tab strip.
    pub fn panes_in_order(&self) -> impl Iterator<Item = &Pane> {
        self.order.iter().filter_map(|key| self.panes.get(key))
    }

    pub fn is_open(&self, library_id: i64) -> bool {
        self.panes.contains_key(&library_id.to_string())
    }

    pub fn is_active(&self, library_id: i64) -> bool {
        self.selection
            .as_ref()
            .map(|selection| selection.library.id == library_id)
            .unwrap_or(false)
    }

    /// True while any pane has a fetch outstanding.
    pub fn any_fetching(&self) -> bool {
        self.panes.values().any(|pane| pane.is_fetching())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::ChartBucket;

    const NOW: i64 = 1_700_000_900;

    fn library(id: i64, name: &str, create_type: i64) -> LogLibrary {
        LogLibrary {
            id,
            table_name: name.to_string(),
            create_type,
            desc: None,
            days: None,
        }
    }

    fn workspace() -> Workspace {
        Workspace::new(15, 100)
    }

    fn sample_result(rows: usize) -> QueryResult {
        QueryResult {
            logs: (0..rows)
                .map(|i| serde_json::json!({"_time_second_": NOW - i as i64, "body": "row"}))
                .collect(),
            count: rows as u64,
            buckets: vec![ChartBucket {
                from: NOW - 900,
                to: NOW,
                count: rows as u64,
            }],
        }
    }

    fn assert_registry_invariant(ws: &Workspace) {
        assert_eq!(ws.order.len(), ws.panes.len());
        for key in &ws.order {
            assert!(ws.panes.contains_key(key), "order key {} missing", key);
        }
        if let Some(selection) = &ws.selection {
            assert!(
                ws.panes.contains_key(&selection.pane_key),
                "selection points at missing pane"
            );
            assert_eq!(
                selection.library.id.to_string(),
                selection.pane_key,
                "selection library and pane disagree"
            );
        }
    }

    #[test]
    fn test_open_creates_pane_and_activates() {
        let mut ws = workspace();
        let lib = library(7, "app_stdout", 0);

        let outcome = ws.open(&lib, NOW);
        let spec = match outcome {
            OpenOutcome::Created(spec) => spec,
            other => panic!("expected Created, got {:?}", other),
        };

        assert_eq!(spec.library_id, 7);
        assert_eq!(spec.pane_key, "7");
        assert_eq!(spec.params.start, NOW - 900);
        assert_eq!(spec.params.end, NOW);
        assert_eq!(spec.params.page, 1);
        assert_eq!(spec.params.page_size, 100);
        assert_eq!(spec.params.keyword, "");

        assert_eq!(ws.pane_count(), 1);
        assert_eq!(ws.order, ["7"]);
        assert!(ws.is_active(7));
        assert!(ws.active_pane().unwrap().is_fetching());
        assert_registry_invariant(&ws);

        // results arrive and merge in
        let merged = ws.merge_results("7", spec.generation, sample_result(3));
        assert_eq!(merged, MergeOutcome::Merged);
        let pane = ws.active_pane().unwrap();
        assert_eq!(pane.logs.len(), 3);
        assert_eq!(pane.total, 3);
        assert_eq!(pane.buckets.len(), 1);
        assert!(!pane.is_fetching());
    }

    #[test]
    fn test_reopen_existing_is_activation_without_fetch() {
        let mut ws = workspace();
        let first = library(7, "app_stdout", 0);
        let second = library(9, "ingress", 0);

        ws.open(&first, NOW);
        ws.open(&second, NOW);
        assert!(ws.is_active(9));

        let outcome = ws.open(&first, NOW + 60);
        assert_eq!(outcome, OpenOutcome::Activated);
        assert_eq!(ws.pane_count(), 2);
        assert_eq!(ws.order, ["7", "9"]);
        assert!(ws.is_active(7));
        assert_registry_invariant(&ws);
    }

    #[test]
    fn test_open_active_library_is_noop() {
        let mut ws = workspace();
        let lib = library(7, "app_stdout", 0);

        ws.open(&lib, NOW);
        let before = ws.next_generation;
        assert_eq!(ws.open(&lib, NOW + 5), OpenOutcome::AlreadyActive);
        assert_eq!(ws.next_generation, before);
        assert_eq!(ws.pane_count(), 1);
    }

    #[test]
    fn test_delete_only_open_library_clears_selection() {
        let mut ws = workspace();
        ws.open(&library(7, "app_stdout", 0), NOW);

        let outcome = ws.remove_library(7);
        assert_eq!(outcome, CloseOutcome::ClosedLast);
        assert_eq!(ws.pane_count(), 0);
        assert!(ws.selection.is_none());
        assert!(ws.current_library().is_none());
        assert!(ws.active_pane().is_none());
        assert_registry_invariant(&ws);
    }

    #[test]
    fn test_delete_active_switches_to_first_remaining() {
        let mut ws = workspace();
        ws.open(&library(1, "pane_a", 0), NOW);
        ws.open(&library(2, "pane_b", 1), NOW);
        ws.open(&library(3, "pane_c", 0), NOW);
        assert!(ws.activate("1"));
        assert!(ws.is_active(1));

        let outcome = ws.remove_library(1);
        let switched = match outcome {
            CloseOutcome::SwitchedTo(lib) => lib,
            other => panic!("expected SwitchedTo, got {:?}", other),
        };

        // first remaining key in prior order is "2"
        assert_eq!(switched.id, 2);
        assert_eq!(switched.table_name, "pane_b");
        assert_eq!(switched.create_type, 1);
        assert_eq!(ws.order, ["2", "3"]);
        assert!(ws.is_active(2));
        assert_registry_invariant(&ws);
    }

    #[test]
    fn test_delete_inactive_keeps_selection() {
        let mut ws = workspace();
        ws.open(&library(1, "pane_a", 0), NOW);
        ws.open(&library(2, "pane_b", 0), NOW);
        assert!(ws.is_active(2));

        let outcome = ws.remove_library(1);
        assert_eq!(outcome, CloseOutcome::ClosedInactive);
        assert_eq!(ws.order, ["2"]);
        assert!(ws.is_active(2));
        assert_registry_invariant(&ws);
    }

    #[test]
    fn test_delete_unopened_library_is_not_open() {
        let mut ws = workspace();
        ws.open(&library(1, "pane_a", 0), NOW);

        assert_eq!(ws.remove_library(99), CloseOutcome::NotOpen);
        assert_eq!(ws.pane_count(), 1);
        assert!(ws.is_active(1));
    }

    #[test]
    fn test_delete_active_of_two_hands_over() {
        // panes {"1": A(active), "2": B}; delete 1 leaves {"2"} with B current
        let mut ws = workspace();
        ws.open(&library(1, "pane_a", 0), NOW);
        ws.open(&library(2, "pane_b", 1), NOW);
        assert!(ws.activate("1"));

        match ws.remove_library(1) {
            CloseOutcome::SwitchedTo(lib) => {
                assert_eq!(lib.id, 2);
                assert_eq!(lib.table_name, "pane_b");
            }
            other => panic!("expected SwitchedTo, got {:?}", other),
        }
        assert_eq!(ws.order, ["2"]);
        assert_eq!(ws.current_library().unwrap().id, 2);
    }

    #[test]
    fn test_stale_generation_results_dropped() {
        let mut ws = workspace();
        let spec = match ws.open(&library(7, "app_stdout", 0), NOW) {
            OpenOutcome::Created(spec) => spec,
            other => panic!("expected Created, got {:?}", other),
        };

        // user filters before the open fetch lands
        let requeried = ws.search("error".to_string(), NOW + 30).unwrap();
        assert_ne!(requeried.generation, spec.generation);

        let outcome = ws.merge_results("7", spec.generation, sample_result(5));
        assert_eq!(outcome, MergeOutcome::Stale);
        let pane = ws.active_pane().unwrap();
        assert!(pane.logs.is_empty());
        assert!(pane.is_fetching());

        let outcome = ws.merge_results("7", requeried.generation, sample_result(2));
        assert_eq!(outcome, MergeOutcome::Merged);
        assert_eq!(ws.active_pane().unwrap().logs.len(), 2);
    }

    #[test]
    fn test_results_for_closed_pane_dropped() {
        let mut ws = workspace();
        let spec = match ws.open(&library(7, "app_stdout", 0), NOW) {
            OpenOutcome::Created(spec) => spec,
            other => panic!("expected Created, got {:?}", other),
        };

        assert_eq!(ws.close("7"), CloseOutcome::ClosedLast);

        // late response must not resurrect the pane
        let outcome = ws.merge_results(&spec.pane_key, spec.generation, sample_result(4));
        assert_eq!(outcome, MergeOutcome::Gone);
        assert_eq!(ws.pane_count(), 0);
        assert!(!ws.panes.contains_key("7"));
    }

    #[test]
    fn test_mark_ready_settles_failed_fetch() {
        let mut ws = workspace();
        let spec = match ws.open(&library(7, "app_stdout", 0), NOW) {
            OpenOutcome::Created(spec) => spec,
            other => panic!("expected Created, got {:?}", other),
        };

        assert_eq!(
            ws.mark_ready(&spec.pane_key, spec.generation),
            MergeOutcome::Merged
        );
        let pane = ws.active_pane().unwrap();
        assert!(!pane.is_fetching());
        assert!(pane.logs.is_empty());
        assert_eq!(pane.total, 0);
    }

    #[test]
    fn test_search_resets_page_and_reanchors() {
        let mut ws = workspace();
        let spec = match ws.open(&library(7, "app_stdout", 0), NOW) {
            OpenOutcome::Created(spec) => spec,
            other => panic!("expected Created, got {:?}", other),
        };
        ws.merge_results("7", spec.generation, {
            let mut result = sample_result(10);
            result.count = 250;
            result
        });
        ws.change_page(1, NOW + 10).unwrap();

        let later = NOW + 600;
        let spec = ws.search("status=500".to_string(), later).unwrap();
        assert_eq!(spec.params.keyword, "status=500");
        assert_eq!(spec.params.page, 1);
        assert_eq!(spec.params.end, later);
        assert_eq!(spec.params.end - spec.params.start, 900);
        assert!(ws.active_pane().unwrap().is_fetching());
    }

    #[test]
    fn test_change_page_clamps_to_known_range() {
        let mut ws = workspace();
        let spec = match ws.open(&library(7, "app_stdout", 0), NOW) {
            OpenOutcome::Created(spec) => spec,
            other => panic!("expected Created, got {:?}", other),
        };
        let mut result = sample_result(100);
        result.count = 250; // 3 pages at size 100
        ws.merge_results("7", spec.generation, result);

        assert_eq!(ws.change_page(-1, NOW).map(|s| s.params.page), None);
        assert_eq!(ws.change_page(1, NOW).map(|s| s.params.page), Some(2));
        assert_eq!(ws.change_page(1, NOW).map(|s| s.params.page), Some(3));
        assert_eq!(ws.change_page(1, NOW).map(|s| s.params.page), None);
        assert_eq!(ws.change_page(-10, NOW).map(|s| s.params.page), Some(1));
    }

    #[test]
    fn test_refresh_bumps_generation_and_reanchors() {
        let mut ws = workspace();
        let spec = match ws.open(&library(7, "app_stdout", 0), NOW) {
            OpenOutcome::Created(spec) => spec,
            other => panic!("expected Created, got {:?}", other),
        };
        ws.merge_results("7", spec.generation, sample_result(1));

        let later = NOW + 3600;
        let refreshed = ws.refresh(later).unwrap();
        assert!(refreshed.generation > spec.generation);
        assert_eq!(refreshed.params.end, later);
        assert_eq!(refreshed.params.keyword, "");
        assert!(ws.active_pane().unwrap().is_fetching());
    }

    #[test]
    fn test_pane_switching_cycles_in_open_order() {
        let mut ws = workspace();
        ws.open(&library(1, "pane_a", 0), NOW);
        ws.open(&library(2, "pane_b", 0), NOW);
        ws.open(&library(3, "pane_c", 0), NOW);
        assert!(ws.is_active(3));

        assert_eq!(ws.next_pane().as_deref(), Some("1"));
        assert!(ws.is_active(1));
        assert_eq!(ws.prev_pane().as_deref(), Some("3"));
        assert_eq!(ws.prev_pane().as_deref(), Some("2"));
        assert_eq!(ws.current_library().unwrap().table_name, "pane_b");
        assert_registry_invariant(&ws);
    }

    #[test]
    fn test_pane_switching_single_pane_is_noop() {
        let mut ws = workspace();
        ws.open(&library(1, "pane_a", 0), NOW);
        assert_eq!(ws.next_pane(), None);
        assert_eq!(ws.prev_pane(), None);
        assert!(ws.is_active(1));
    }

    #[test]
    fn test_select_database_prefers_configured_name() {
        let mut ws = workspace();
        ws.set_databases(vec![
            Database {
                id: 1,
                iid: 1,
                name: "default".to_string(),
                desc: None,
            },
            Database {
                id: 2,
                iid: 1,
                name: "ops".to_string(),
                desc: None,
            },
        ]);

        let chosen = ws.select_database(Some("ops")).unwrap();
        assert_eq!(chosen.id, 2);
        assert_eq!(ws.current_database().unwrap().name, "ops");

        // unknown name falls back to the first database
        let chosen = ws.select_database(Some("missing")).unwrap();
        assert_eq!(chosen.id, 1);

        let chosen = ws.select_database(None).unwrap();
        assert_eq!(chosen.id, 1);
    }

    #[test]
    fn test_select_database_empty_list() {
        let mut ws = workspace();
        assert!(ws.select_database(Some("default")).is_none());
        assert!(ws.current_database().is_none());
    }

    #[test]
    fn test_registry_invariant_across_lifecycle() {
        let mut ws = workspace();
        for id in 1..=5 {
            ws.open(&library(id, &format!("table_{}", id), 0), NOW);
            assert_registry_invariant(&ws);
        }
        ws.activate("3");
        assert_registry_invariant(&ws);
        ws.remove_library(3);
        assert_registry_invariant(&ws);
        ws.close("1");
        assert_registry_invariant(&ws);
        ws.next_pane();
        assert_registry_invariant(&ws);
        for key in ["2", "4", "5"] {
            ws.close(key);
            assert_registry_invariant(&ws);
        }
        assert!(ws.selection.is_none());
    }
}
