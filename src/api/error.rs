//! Error type for platform API calls

use std::fmt;

/// Errors that can occur talking to the log platform.
///
/// `Platform` is the interesting variant: the API returns HTTP 200 with a
/// `{code, msg, data}` envelope, and any non-zero `code` is a logical
/// failure that must be handled like an error.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout)
    Network(String),
    /// Non-2xx HTTP status from the platform
    Http { status: u16, message: String },
    /// Response body did not match the expected shape
    Decode(String),
    /// Envelope carried a non-zero code
    Platform { code: i64, msg: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Http { status, message } => {
                write!(f, "HTTP error ({}): {}", status, message)
            }
            Self::Decode(msg) => write!(f, "Decode error: {}", msg),
            Self::Platform { code, msg } => {
                write!(f, "Platform error (code {}): {}", code, msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Short form for toasts and the status line.
    pub fn brief(&self) -> String {
        match self {
            Self::Network(_) => "network error".to_string(),
            Self::Http { status, .. } => format!("HTTP {}", status),
            Self::Decode(_) => "bad response".to_string(),
            Self::Platform { code, msg } => {
                if msg.is_empty() {
                    format!("code {}", code)
                } else {
                    msg.clone()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let err = ApiError::Platform {
            code: 1,
            msg: "table not found".to_string(),
        };
        assert_eq!(err.to_string(), "Platform error (code 1): table not found");

        let err = ApiError::Http {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error (502): bad gateway");
    }

    #[test]
    fn test_brief_prefers_platform_msg() {
        let err = ApiError::Platform {
            code: 7,
            msg: "no permission".to_string(),
        };
        assert_eq!(err.brief(), "no permission");

        let err = ApiError::Platform {
            code: 7,
            msg: String::new(),
        };
        assert_eq!(err.brief(), "code 7");
    }
}
