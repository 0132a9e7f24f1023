//! Demo backend with generated data
//!
//! Serves plausible databases, libraries, log rows and histograms without a
//! platform to talk to. Latency is simulated so loading states render the
//! same way they do against a real API. Deletes are honored for the lifetime
//! of the process.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;

use crate::api::error::ApiError;
use crate::api::models::{
    ChartBucket, Database, LibraryDetail, LibraryView, LogLibrary, LogRow, QueryParams, QueryResult,
};

const DEMO_LATENCY_MS: u64 = 150;

/// Maximum buckets the generated histogram is split into.
const MAX_BUCKETS: i64 = 30;

struct DemoLibrary {
    id: i64,
    database_id: i64,
    name: &'static str,
    create_type: i64,
    desc: &'static str,
    days: i64,
}

const DEMO_LIBRARIES: &[DemoLibrary] = &[
    DemoLibrary {
        id: 101,
        database_id: 1,
        name: "app_stdout",
        create_type: 0,
        desc: "application stdout via fluent-bit",
        days: 7,
    },
    DemoLibrary {
        id: 102,
        database_id: 1,
        name: "ingress_access",
        create_type: 0,
        desc: "nginx ingress access logs",
        days: 14,
    },
    DemoLibrary {
        id: 103,
        database_id: 1,
        name: "mysql_slow",
        create_type: 0,
        desc: "slow query log",
        days: 30,
    },
    DemoLibrary {
        id: 104,
        database_id: 1,
        name: "app_errors_view",
        create_type: 1,
        desc: "errors filtered from app_stdout",
        days: 7,
    },
    DemoLibrary {
        id: 105,
        database_id: 1,
        name: "k8s_events",
        create_type: 0,
        desc: "cluster event stream",
        days: 3,
    },
    DemoLibrary {
        id: 201,
        database_id: 2,
        name: "deploy_audit",
        create_type: 0,
        desc: "deployment audit trail",
        days: 90,
    },
    DemoLibrary {
        id: 202,
        database_id: 2,
        name: "alertmanager",
        create_type: 1,
        desc: "alert notifications",
        days: 30,
    },
];

const LEVELS: &[&str] = &["info", "info", "info", "debug", "warn", "error"];

const PODS: &[&str] = &[
    "api-7d4b9c6f8-x2vkl",
    "api-7d4b9c6f8-m9qrt",
    "worker-5f6d8b9c7-p4wzn",
    "scheduler-0",
];

const PATHS: &[&str] = &[
    "/api/v1/orders",
    "/api/v1/users/me",
    "/healthz",
    "/api/v1/search",
    "/api/v1/inventory/sync",
];

const METHODS: &[&str] = &["GET", "GET", "GET", "POST", "PUT"];

pub struct DemoBackend {
    deleted: Mutex<HashSet<i64>>,
    latency: Duration,
}

impl DemoBackend {
    pub fn new() -> Self {
        Self {
            deleted: Mutex::new(HashSet::new()),
            latency: Duration::from_millis(DEMO_LATENCY_MS),
        }
    }

    async fn simulate_latency(&self) {
        tokio::time::sleep(self.latency).await;
    }

    fn is_deleted(&self, library_id: i64) -> bool {
        match self.deleted.lock() {
            Ok(set) => set.contains(&library_id),
            Err(_) => false,
        }
    }

    fn find(&self, library_id: i64) -> Option<&'static DemoLibrary> {
        if self.is_deleted(library_id) {
            return None;
        }
        DEMO_LIBRARIES.iter().find(|lib| lib.id == library_id)
    }

    pub async fn databases(&self, _instance_id: i64) -> Result<Vec<Database>, ApiError> {
        self.simulate_latency().await;
        Ok(vec![
            Database {
                id: 1,
                iid: 1,
                name: "default".to_string(),
                desc: Some("primary application logs".to_string()),
            },
            Database {
                id: 2,
                iid: 1,
                name: "ops".to_string(),
                desc: Some("operations and audit".to_string()),
            },
        ])
    }

    pub async fn libraries(&self, database_id: i64) -> Result<Vec<LogLibrary>, ApiError> {
        self.simulate_latency().await;
        Ok(DEMO_LIBRARIES
            .iter()
            .filter(|lib| lib.database_id == database_id && !self.is_deleted(lib.id))
            .map(|lib| LogLibrary {
                id: lib.id,
                table_name: lib.name.to_string(),
                create_type: lib.create_type,
                desc: Some(lib.desc.to_string()),
                days: Some(lib.days),
            })
            .collect())
    }

    pub async fn query(
        &self,
        library_id: i64,
        params: &QueryParams,
    ) -> Result<QueryResult, ApiError> {
        self.simulate_latency().await;
        let library = self
            .find(library_id)
            .ok_or_else(|| ApiError::Platform {
                code: 10032,
                msg: "table not found".to_string(),
            })?;

        let span = (params.end - params.start).max(1);
        let count = 120 + mix(&[library_id, params.start]) % 4200;
        // keyword narrows the result set the way a real filter would
        let count = if params.keyword.is_empty() {
            count
        } else {
            count / 7 + 1
        };

        let first = (params.page.saturating_sub(1)) * params.page_size;
        let last = (first + params.page_size).min(count);
        let logs: Vec<LogRow> = (first..last)
            .map(|i| self.build_row(library, params, i, span))
            .collect();

        let buckets = self.build_buckets(library_id, params, count, span);

        Ok(QueryResult {
            logs,
            count,
            buckets,
        })
    }

    fn build_row(&self, library: &DemoLibrary, params: &QueryParams, i: u64, span: i64) -> LogRow {
        let seed = mix(&[library.id, params.start, i as i64]);
        // newest rows first, spread across the window
        let ts = params.end - ((i as i64 * span) / ((params.page_size as i64 * 3).max(1))) % span;
        let level = LEVELS[(seed % LEVELS.len() as u64) as usize];
        let pod = PODS[(seed / 7 % PODS.len() as u64) as usize];
        let path = PATHS[(seed / 13 % PATHS.len() as u64) as usize];
        let method = METHODS[(seed / 17 % METHODS.len() as u64) as usize];
        let status = if level == "error" { 500 } else { 200 };
        let latency_ms = 3 + seed % 240;

        let mut body = format!(
            "{} {} {} {}ms trace={:08x}",
            method, path, status, latency_ms, seed as u32
        );
        if !params.keyword.is_empty() {
            body.push(' ');
            body.push_str(&params.keyword);
        }

        json!({
            "_time_second_": ts,
            "level": level,
            "pod": pod,
            "namespace": if library.database_id == 1 { "prod" } else { "ops" },
            "_raw_log_": body,
        })
    }

    fn build_buckets(
        &self,
        library_id: i64,
        params: &QueryParams,
        count: u64,
        span: i64,
    ) -> Vec<ChartBucket> {
        let buckets = span.min(MAX_BUCKETS).max(1);
        let step = span / buckets;
        let mut remaining = count;
        let mut out = Vec::with_capacity(buckets as usize);
        for b in 0..buckets {
            let from = params.start + b * step;
            let to = if b == buckets - 1 { params.end } else { from + step };
            let share = if b == buckets - 1 {
                remaining
            } else {
                let c = mix(&[library_id, from]) % (count / buckets as u64 * 2 + 1);
                c.min(remaining)
            };
            remaining -= share;
            out.push(ChartBucket {
                from,
                to,
                count: share,
            });
        }
        out
    }

    pub async fn library_detail(&self, library_id: i64) -> Result<LibraryDetail, ApiError> {
        self.simulate_latency().await;
        let library = self
            .find(library_id)
            .ok_or_else(|| ApiError::Platform {
                code: 10032,
                msg: "table not found".to_string(),
            })?;

        Ok(LibraryDetail {
            id: library.id,
            table_name: library.name.to_string(),
            create_type: library.create_type,
            desc: Some(library.desc.to_string()),
            days: Some(library.days),
            time_field: Some("_time_second_".to_string()),
            ctime: Some(1_690_000_000),
            uid: Some(1),
        })
    }

    pub async fn views(&self, library_id: i64) -> Result<Vec<LibraryView>, ApiError> {
        self.simulate_latency().await;
        if self.find(library_id).is_none() {
            return Err(ApiError::Platform {
                code: 10032,
                msg: "table not found".to_string(),
            });
        }
        // only raw tables carry parse views
        if self.find(library_id).map(|l| l.create_type) != Some(0) {
            return Ok(Vec::new());
        }
        Ok(vec![
            LibraryView {
                id: library_id * 10 + 1,
                view_name: "default".to_string(),
                key: Some("_time_second_".to_string()),
                format: Some("fluent-bit-json".to_string()),
            },
            LibraryView {
                id: library_id * 10 + 2,
                view_name: "nanosecond".to_string(),
                key: Some("_time_nanosecond_".to_string()),
                format: Some("fluent-bit-json".to_string()),
            },
        ])
    }

    pub async fn delete_library(&self, library_id: i64) -> Result<(), ApiError> {
        self.simulate_latency().await;
        if self.find(library_id).is_none() {
            return Err(ApiError::Platform {
                code: 10032,
                msg: "table not found".to_string(),
            });
        }
        if let Ok(mut set) = self.deleted.lock() {
            set.insert(library_id);
        }
        Ok(())
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheap deterministic mixer for generated data.
fn mix(parts: &[i64]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for p in parts {
        p.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> QueryParams {
        QueryParams {
            start: 1_700_000_000,
            end: 1_700_000_900,
            page: 1,
            page_size: 100,
            keyword: String::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_libraries_scoped_to_database() {
        let backend = DemoBackend::new();
        let default_db = backend.libraries(1).await.unwrap();
        let ops_db = backend.libraries(2).await.unwrap();
        assert_eq!(default_db.len(), 5);
        assert_eq!(ops_db.len(), 2);
        assert!(default_db.iter().any(|l| l.table_name == "app_stdout"));
        assert!(ops_db.iter().all(|l| l.id >= 200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_rows_within_window() {
        let backend = DemoBackend::new();
        let p = params();
        let result = backend.query(101, &p).await.unwrap();
        assert!(result.count > 0);
        assert!(!result.logs.is_empty());
        for row in &result.logs {
            let ts = row["_time_second_"].as_i64().unwrap();
            assert!(ts >= p.start && ts <= p.end);
        }
        let total: u64 = result.buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, result.count);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_narrows_and_marks_rows() {
        let backend = DemoBackend::new();
        let unfiltered = backend.query(101, &params()).await.unwrap();
        let mut p = params();
        p.keyword = "timeout".to_string();
        let filtered = backend.query(101, &p).await.unwrap();
        assert!(filtered.count < unfiltered.count);
        for row in &filtered.logs {
            assert!(row["_raw_log_"].as_str().unwrap().contains("timeout"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_removes_library() {
        let backend = DemoBackend::new();
        backend.delete_library(103).await.unwrap();
        let libraries = backend.libraries(1).await.unwrap();
        assert_eq!(libraries.len(), 4);
        assert!(libraries.iter().all(|l| l.id != 103));

        let again = backend.delete_library(103).await;
        assert!(matches!(again, Err(ApiError::Platform { code: 10032, .. })));
        let query = backend.query(103, &params()).await;
        assert!(query.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_views_only_for_raw_tables() {
        let backend = DemoBackend::new();
        let raw = backend.views(101).await.unwrap();
        assert_eq!(raw.len(), 2);
        let templated = backend.views(104).await.unwrap();
        assert!(templated.is_empty());
    }
}
