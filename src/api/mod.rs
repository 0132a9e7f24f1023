//! Platform API surface
//!
//! [`Backend`] is the single entry point the rest of the app talks to. It
//! dispatches to the real HTTP client or the demo generator so the event
//! loop never has to care which one is live.

pub mod client;
pub mod demo;
pub mod error;
pub mod models;

pub use client::HttpClient;
pub use demo::DemoBackend;
pub use error::ApiError;

use crate::api::models::{
    Database, LibraryDetail, LibraryView, LogLibrary, QueryParams, QueryResult,
};

pub enum Backend {
    Http(HttpClient),
    Demo(DemoBackend),
}

impl Backend {
    pub async fn databases(&self, instance_id: i64) -> Result<Vec<Database>, ApiError> {
        match self {
            Backend::Http(c) => c.databases(instance_id).await,
            Backend::Demo(d) => d.databases(instance_id).await,
        }
    }

    pub async fn libraries(&self, database_id: i64) -> Result<Vec<LogLibrary>, ApiError> {
        match self {
            Backend::Http(c) => c.libraries(database_id).await,
            Backend::Demo(d) => d.libraries(database_id).await,
        }
    }

    pub async fn query(
        &self,
        library_id: i64,
        params: &QueryParams,
    ) -> Result<QueryResult, ApiError> {
        match self {
            Backend::Http(c) => c.query(library_id, params).await,
            Backend::Demo(d) => d.query(library_id, params).await,
        }
    }

    pub async fn library_detail(&self, library_id: i64) -> Result<LibraryDetail, ApiError> {
        match self {
            Backend::Http(c) => c.library_detail(library_id).await,
            Backend::Demo(d) => d.library_detail(library_id).await,
        }
    }

    pub async fn views(&self, library_id: i64) -> Result<Vec<LibraryView>, ApiError> {
        match self {
            Backend::Http(c) => c.views(library_id).await,
            Backend::Demo(d) => d.views(library_id).await,
        }
    }

    pub async fn delete_library(&self, library_id: i64) -> Result<(), ApiError> {
        match self {
            Backend::Http(c) => c.delete_library(library_id).await,
            Backend::Demo(d) => d.delete_library(library_id).await,
        }
    }
}
