//! Errors from talking to the upstream dashboard API.
//!
//! Normalization never errors; only the fetch boundary does, and
//! `fetcher::fetch_dashboard` folds these into a not-ok response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Missing {0} in .env.local")]
    MissingConfig(&'static str),

    #[error("Invalid {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dashboard API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode dashboard payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// Worth retrying on the next refresh without operator action.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(_) => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FetchError::MissingConfig("DASHBOARD_API_URL").to_string(),
            "Missing DASHBOARD_API_URL in .env.local"
        );
        let err = FetchError::Status { status: 502, body: "Bad Gateway".into() };
        assert_eq!(err.to_string(), "Dashboard API error (502): Bad Gateway");
    }

    #[test]
    fn test_transient() {
        assert!(FetchError::Status { status: 503, body: String::new() }.is_transient());
        assert!(FetchError::Status { status: 429, body: String::new() }.is_transient());
        assert!(!FetchError::Status { status: 401, body: String::new() }.is_transient());
        assert!(!FetchError::MissingConfig("DASHBOARD_API_TOKEN").is_transient());
        assert!(!FetchError::Decode("eof".into()).is_transient());
    }
}
