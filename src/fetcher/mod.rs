use async_trait::async_trait;
use serde_json::Value;
use crate::error::FetchError;
use crate::payload::DashboardResponse;

pub mod sheets;

/// Anything that can hand back the raw dashboard JSON.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_payload(&self) -> Result<Value, FetchError>;
}

/// Fetch and check the `ok` discriminant. Errors never escape: they become
/// `DashboardResponse::NotOk` carrying a readable message.
pub async fn fetch_dashboard(source: &dyn DataSource) -> DashboardResponse {
    match source.fetch_payload().await {
        Ok(value) => {
            let response = DashboardResponse::from_value(value);
            if let Some(message) = response.error_message() {
                log::warn!("{}: upstream reported failure: {}", source.name(), message);
            }
            response
        }
        Err(e) => {
            if e.is_transient() {
                log::warn!("{}: fetch failed, will retry on next refresh: {}", source.name(), e);
            } else {
                log::error!("{}: fetch failed: {}", source.name(), e);
            }
            DashboardResponse::not_ok(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticSource(Value);

    #[async_trait]
    impl DataSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch_payload(&self) -> Result<Value, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl DataSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch_payload(&self) -> Result<Value, FetchError> {
            Err(FetchError::Status { status: 500, body: "boom".into() })
        }
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let source = StaticSource(json!({ "ok": true, "meta": { "generatedAt": "now" } }));
        let response = fetch_dashboard(&source).await;
        assert!(response.is_ok());
        assert_eq!(response.generated_at(), Some("now"));
    }

    #[tokio::test]
    async fn test_fetch_error_becomes_not_ok() {
        let response = fetch_dashboard(&BrokenSource).await;
        assert_eq!(response.error_message(), Some("Dashboard API error (500): boom"));
    }

    #[tokio::test]
    async fn test_upstream_not_ok() {
        let source = StaticSource(json!({ "ok": false, "error": "Invalid token" }));
        let response = fetch_dashboard(&source).await;
        assert_eq!(response.error_message(), Some("Invalid token"));
    }
}
