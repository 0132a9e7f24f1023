// Events that flow between the service tasks and the TUI
//
// Service calls run on spawned tokio tasks and report back through an mpsc
// channel as SessionEvent values. The TUI never awaits a request inline;
// it applies events to the workspace as they arrive. Commands travel the
// other way: the app describes I/O it wants as Command values and the
// runtime layer executes them.

use crate::api::error::ApiError;
use crate::api::models::{Database, LibraryDetail, LibraryView, LogLibrary, QueryResult};
use crate::session::FetchSpec;

/// Completed service calls, applied to the workspace on the event loop.
#[derive(Debug)]
pub enum SessionEvent {
    DatabasesLoaded {
        result: Result<Vec<Database>, ApiError>,
    },

    LibrariesLoaded {
        result: Result<Vec<LogLibrary>, ApiError>,
    },

    /// A logs+charts fetch settled. The generation token decides whether
    /// the result is still current for the pane.
    QueryLoaded {
        pane_key: String,
        generation: u64,
        result: Result<QueryResult, ApiError>,
    },

    LibraryDeleted {
        library_id: i64,
        table_name: String,
        result: Result<(), ApiError>,
    },

    LibraryDetailLoaded {
        result: Result<LibraryDetail, ApiError>,
    },

    ViewsLoaded {
        table_name: String,
        result: Result<Vec<LibraryView>, ApiError>,
    },
}

/// I/O requested by the app, executed by the runtime layer.
///
/// Keeping commands as plain values keeps the app itself runtime-free,
/// so the whole state layer tests without tokio.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchDatabases,

    FetchLibraries {
        database_id: i64,
    },

    /// Spawn a cancellable logs+charts fetch for a pane
    RunQuery(FetchSpec),

    /// Abort the in-flight fetch for a pane, if any
    AbortQuery {
        pane_key: String,
    },

    DeleteLibrary {
        library_id: i64,
        table_name: String,
    },

    FetchLibraryDetail {
        library_id: i64,
    },

    FetchViews {
        library_id: i64,
        table_name: String,
    },
}
