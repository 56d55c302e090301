use async_trait::async_trait;
use super::DataSource;
use crate::config::DashboardConfig;
use crate::error::FetchError;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;

/// Spreadsheet-backed dashboard API: `GET {url}?token=...` returning one JSON document.
pub struct SheetsFetcher {
    api_url: String,
    api_token: String,
    client: Client,
}

impl SheetsFetcher {
    pub fn new(config: &DashboardConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("TradingDashboard/1.0"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
            client,
        }
    }

    pub fn from_env() -> Result<Self, FetchError> {
        Ok(Self::new(&DashboardConfig::from_env()?))
    }

    fn parse_response(body: &str) -> Result<Value, FetchError> {
        serde_json::from_str(body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            FetchError::Decode(format!("{} - Response: {}", e, preview))
        })
    }
}

#[async_trait]
impl DataSource for SheetsFetcher {
    fn name(&self) -> &str {
        "sheets"
    }

    async fn fetch_payload(&self) -> Result<Value, FetchError> {
        log::info!("Fetching dashboard payload (token length: {})", self.api_token.len());

        // `query` percent-encodes the token.
        let resp = self
            .client
            .get(&self.api_url)
            .query(&[("token", self.api_token.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = resp.text().await?;
        let value = Self::parse_response(&body)?;
        log::info!("Dashboard payload received ({} bytes)", body.len());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_valid_response() {
        let body = r#"{"ok": true, "kpis": {"pf30d_latest": 1.2}}"#;
        let value = SheetsFetcher::parse_response(body).unwrap();
        assert_eq!(value["ok"], Value::Bool(true));
        assert_eq!(value["kpis"]["pf30d_latest"], 1.2);
    }

    #[test]
    fn test_parse_html_error_page() {
        let err = SheetsFetcher::parse_response("<html>Sign in</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(ref msg) if msg.contains("<html>Sign in</html>")));
    }

    #[test]
    fn test_new_from_config() {
        let config = DashboardConfig {
            api_url: "https://script.example.com/exec".into(),
            api_token: "abc".into(),
            timeout: Duration::from_secs(3),
        };
        let fetcher = SheetsFetcher::new(&config);
        assert_eq!(fetcher.name(), "sheets");
        assert_eq!(fetcher.api_url, config.api_url);
    }
}
