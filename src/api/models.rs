//! Wire types for the log platform API
//!
//! The platform wraps every response in a `{code, msg, data}` envelope and
//! uses camelCase field names on the wire. `code == 0` is success; anything
//! else is a logical failure even when the HTTP status is 200.

use serde::Deserialize;

use crate::api::error::ApiError;

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, mapping a non-zero code to `ApiError::Platform`.
    pub fn into_data(self) -> Result<T, ApiError> {
        if self.code != 0 {
            return Err(ApiError::Platform {
                code: self.code,
                msg: self.msg,
            });
        }
        self.data
            .ok_or_else(|| ApiError::Decode("envelope carried no data".to_string()))
    }

    /// Check the code only. Mutating endpoints return `data: null` on success.
    pub fn ok(self) -> Result<(), ApiError> {
        if self.code != 0 {
            return Err(ApiError::Platform {
                code: self.code,
                msg: self.msg,
            });
        }
        Ok(())
    }
}

/// A database inside a platform instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub id: i64,
    /// Owning instance id
    pub iid: i64,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
}

/// A log library (log table) listed in the sidebar.
///
/// `create_type` 0 is a raw table; any other value is a derived or
/// materialized view. Views hide the table-views action in the UI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLibrary {
    pub id: i64,
    pub table_name: String,
    pub create_type: i64,
    #[serde(default)]
    pub desc: Option<String>,
    /// Retention in days, when the platform reports it
    #[serde(default)]
    pub days: Option<i64>,
}

impl LogLibrary {
    pub fn is_raw_table(&self) -> bool {
        self.create_type == 0
    }
}

/// Full library record returned by the detail endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDetail {
    pub id: i64,
    pub table_name: String,
    pub create_type: i64,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub days: Option<i64>,
    #[serde(default)]
    pub time_field: Option<String>,
    /// Creation time, epoch seconds
    #[serde(default)]
    pub ctime: Option<i64>,
    #[serde(default)]
    pub uid: Option<i64>,
}

/// A custom time-parse view attached to a raw table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryView {
    pub id: i64,
    pub view_name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// One log row: schemaless JSON object from the platform.
pub type LogRow = serde_json::Value;

/// Payload of the logs endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsData {
    #[serde(default)]
    pub logs: Vec<LogRow>,
    #[serde(default)]
    pub count: u64,
}

/// One histogram bucket: row count over a closed sub-window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBucket {
    pub from: i64,
    pub to: i64,
    pub count: u64,
}

/// Payload of the charts endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsData {
    #[serde(default)]
    pub histograms: Vec<ChartBucket>,
}

/// Query window and filter sent to the logs/charts endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    /// Window start, epoch seconds (`st` on the wire)
    pub start: i64,
    /// Window end, epoch seconds (`et` on the wire)
    pub end: i64,
    pub page: u64,
    pub page_size: u64,
    /// Keyword filter (`kw` on the wire); empty means unfiltered
    pub keyword: String,
}

/// Combined result of the concurrent logs + charts fetch.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub logs: Vec<LogRow>,
    pub count: u64,
    pub buckets: Vec<ChartBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_library_list() {
        let body = r#"{
            "code": 0,
            "msg": "succ",
            "data": [
                {"id": 7, "tableName": "app_stdout", "createType": 0, "desc": "app logs", "days": 7},
                {"id": 9, "tableName": "ingress_json", "createType": 1}
            ]
        }"#;
        let envelope: Envelope<Vec<LogLibrary>> = serde_json::from_str(body).unwrap();
        let libraries = envelope.into_data().unwrap();
        assert_eq!(libraries.len(), 2);
        assert_eq!(libraries[0].table_name, "app_stdout");
        assert!(libraries[0].is_raw_table());
        assert_eq!(libraries[1].create_type, 1);
        assert!(!libraries[1].is_raw_table());
        assert_eq!(libraries[1].days, None);
    }

    #[test]
    fn test_nonzero_code_is_platform_error() {
        let body = r#"{"code": 10032, "msg": "table not found", "data": null}"#;
        let envelope: Envelope<Vec<LogLibrary>> = serde_json::from_str(body).unwrap();
        match envelope.into_data() {
            Err(ApiError::Platform { code, msg }) => {
                assert_eq!(code, 10032);
                assert_eq!(msg, "table not found");
            }
            other => panic!("expected platform error, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_delete_envelope_null_data_ok() {
        let body = r#"{"code": 0, "msg": "", "data": null}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(body).unwrap();
        assert!(envelope.ok().is_ok());
    }

    #[test]
    fn test_decode_logs_and_charts() {
        let logs_body = r#"{
            "code": 0,
            "msg": "",
            "data": {"logs": [{"_time_second_": 1700000000, "body": "hello"}], "count": 1}
        }"#;
        let logs: Envelope<LogsData> = serde_json::from_str(logs_body).unwrap();
        let data = logs.into_data().unwrap();
        assert_eq!(data.count, 1);
        assert_eq!(data.logs.len(), 1);

        let charts_body = r#"{
            "code": 0,
            "msg": "",
            "data": {"histograms": [{"from": 1700000000, "to": 1700000060, "count": 42}]}
        }"#;
        let charts: Envelope<ChartsData> = serde_json::from_str(charts_body).unwrap();
        let data = charts.into_data().unwrap();
        assert_eq!(data.histograms[0].count, 42);
    }

    #[test]
    fn test_missing_data_on_success_is_decode_error() {
        let body = r#"{"code": 0, "msg": ""}"#;
        let envelope: Envelope<LogsData> = serde_json::from_str(body).unwrap();
        assert!(matches!(envelope.into_data(), Err(ApiError::Decode(_))));
    }
}
