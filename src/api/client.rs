//! HTTP client for the log platform API
//!
//! Thin reqwest wrapper around the platform's REST endpoints. Every call
//! unwraps the `{code, msg, data}` envelope and maps failures into
//! [`ApiError`]. The combined logs+charts query runs both requests
//! concurrently since the UI always wants them together.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::models::{
    ChartsData, Database, Envelope, LibraryDetail, LibraryView, LogLibrary, LogsData, QueryParams,
    QueryResult,
};

pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn query_pairs(params: &QueryParams) -> Vec<(&'static str, String)> {
        vec![
            ("st", params.start.to_string()),
            ("et", params.end.to_string()),
            ("page", params.page.to_string()),
            ("pageSize", params.page_size.to_string()),
            ("kw", params.keyword.clone()),
        ]
    }

    pub async fn databases(&self, instance_id: i64) -> Result<Vec<Database>, ApiError> {
        self.get(&format!("/api/v1/instances/{}/databases", instance_id), &[])
            .await?
            .into_data()
    }

    pub async fn libraries(&self, database_id: i64) -> Result<Vec<LogLibrary>, ApiError> {
        self.get(&format!("/api/v1/databases/{}/tables", database_id), &[])
            .await?
            .into_data()
    }

    async fn logs(&self, library_id: i64, params: &QueryParams) -> Result<LogsData, ApiError> {
        self.get(
            &format!("/api/v1/tables/{}/logs", library_id),
            &Self::query_pairs(params),
        )
        .await?
        .into_data()
    }

    async fn charts(&self, library_id: i64, params: &QueryParams) -> Result<ChartsData, ApiError> {
        // the charts endpoint ignores paging
        let query = vec![
            ("st", params.start.to_string()),
            ("et", params.end.to_string()),
            ("kw", params.keyword.clone()),
        ];
        self.get(&format!("/api/v1/tables/{}/charts", library_id), &query)
            .await?
            .into_data()
    }

    /// Fetch log rows and histogram buckets concurrently and combine them.
    pub async fn query(
        &self,
        library_id: i64,
        params: &QueryParams,
    ) -> Result<QueryResult, ApiError> {
        let (logs, charts) =
            tokio::try_join!(self.logs(library_id, params), self.charts(library_id, params))?;

        Ok(QueryResult {
            logs: logs.logs,
            count: logs.count,
            buckets: charts.histograms,
        })
    }

    pub async fn library_detail(&self, library_id: i64) -> Result<LibraryDetail, ApiError> {
        self.get(&format!("/api/v1/tables/{}", library_id), &[])
            .await?
            .into_data()
    }

    pub async fn views(&self, library_id: i64) -> Result<Vec<LibraryView>, ApiError> {
        self.get(&format!("/api/v1/tables/{}/views", library_id), &[])
            .await?
            .into_data()
    }

    pub async fn delete_library(&self, library_id: i64) -> Result<(), ApiError> {
        let url = format!("{}/api/v1/tables/{}", self.base_url, library_id);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode::<serde_json::Value>(response).await?.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_wire_names() {
        let params = QueryParams {
            start: 1_700_000_000,
            end: 1_700_000_900,
            page: 2,
            page_size: 100,
            keyword: "error".to_string(),
        };
        let pairs = HttpClient::query_pairs(&params);
        assert_eq!(pairs[0], ("st", "1700000000".to_string()));
        assert_eq!(pairs[1], ("et", "1700000900".to_string()));
        assert_eq!(pairs[2], ("page", "2".to_string()));
        assert_eq!(pairs[3], ("pageSize", "100".to_string()));
        assert_eq!(pairs[4], ("kw", "error".to_string()));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpClient::new("http://localhost:19001/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://localhost:19001");
    }
}
