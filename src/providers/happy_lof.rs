use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::fund::FundRecord;
use crate::core::source::{FundList, FundSource, HistoryPoint};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Happy LOF JSON API, which serves pre-screened jisilu data
/// and the premium history it records every trading day.
pub struct HappyLofProvider {
    base_url: String,
}

impl HappyLofProvider {
    pub fn new(base_url: &str) -> Self {
        HappyLofProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<ApiResponse<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Requesting {}", url);

        let client = reqwest::Client::builder()
            .user_agent("lofarb/1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let text = response.text().await?;
        let body: ApiResponse<T> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", url, e))?;

        if !body.success {
            return Err(anyhow!(
                "Server reported failure for {}: {}",
                url,
                body.error.as_deref().unwrap_or("unknown error")
            ));
        }

        Ok(body)
    }

    async fn fetch_list(&self, endpoint: &str) -> Result<FundList> {
        let body = self.get::<Vec<FundRecord>>(endpoint).await?;
        let funds = body.data.unwrap_or_default();
        debug!(count = funds.len(), "Received fund list");
        Ok(FundList {
            funds,
            update_time: body.update_time,
        })
    }
}

#[derive(Deserialize, Debug)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    update_time: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl FundSource for HappyLofProvider {
    #[instrument(name = "HappyLofHighPremium", skip(self))]
    async fn high_premium(&self) -> Result<FundList> {
        self.fetch_list("/lof").await
    }

    #[instrument(name = "HappyLofAll", skip(self))]
    async fn all(&self) -> Result<FundList> {
        self.fetch_list("/lof/all").await
    }

    #[instrument(name = "HappyLofHistory", skip(self), fields(fund_id = %fund_id))]
    async fn history(&self, fund_id: &str, days: u32) -> Result<Vec<HistoryPoint>> {
        let endpoint = format!("/lof/history/{fund_id}?days={days}");
        let body = self.get::<Vec<HistoryPoint>>(&endpoint).await?;
        Ok(body.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(request_path: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_high_premium_fetch() {
        let mock_response = r#"{
            "success": true,
            "data": [
                {
                    "fund_id": "161129",
                    "fund_name": "原油LOF易方达",
                    "price": 1.234,
                    "change_pct": -0.5,
                    "net_value": 1.18,
                    "premium_rate": 4.58,
                    "volume": 3520.5,
                    "apply_status": "暂停申购",
                    "fund_type": "QDII"
                },
                {
                    "fund_id": "501018",
                    "fund_name": "南方原油",
                    "premium_rate": 2.1,
                    "volume": 1200,
                    "apply_status": "限100"
                }
            ],
            "total": 2,
            "update_time": "2024-05-06 14:55:00"
        }"#;
        let mock_server = create_mock_server("/lof", 200, mock_response).await;

        let provider = HappyLofProvider::new(&mock_server.uri());
        let list = provider.high_premium().await.unwrap();
        assert_eq!(list.funds.len(), 2);
        assert_eq!(list.update_time.as_deref(), Some("2024-05-06 14:55:00"));
        assert_eq!(list.funds[0].fund_id, "161129");
        assert_eq!(list.funds[0].fund_type.as_deref(), Some("QDII"));
        assert_eq!(list.funds[0].premium_rate, Some(4.58));
        assert!(list.funds[1].fund_type.is_none());
        assert!(list.funds[1].price.is_none());
    }

    #[tokio::test]
    async fn test_all_uses_all_endpoint() {
        let mock_response = r#"{"success": true, "data": [], "total": 0}"#;
        let mock_server = create_mock_server("/lof/all", 200, mock_response).await;

        let provider = HappyLofProvider::new(&format!("{}/", mock_server.uri()));
        let list = provider.all().await.unwrap();
        assert!(list.funds.is_empty());
        assert!(list.update_time.is_none());
    }

    #[tokio::test]
    async fn test_missing_data_is_empty_list() {
        let mock_server = create_mock_server("/lof", 200, r#"{"success": true}"#).await;

        let provider = HappyLofProvider::new(&mock_server.uri());
        let list = provider.high_premium().await.unwrap();
        assert!(list.funds.is_empty());
    }

    #[tokio::test]
    async fn test_server_failure_is_error() {
        let mock_response = r#"{"success": false, "error": "upstream timeout"}"#;
        let mock_server = create_mock_server("/lof", 500, mock_response).await;

        let provider = HappyLofProvider::new(&mock_server.uri());
        let result = provider.high_premium().await;
        let err = result.unwrap_err().to_string();
        assert!(err.starts_with("HTTP error: 500 Internal Server Error"), "{err}");
    }

    #[tokio::test]
    async fn test_success_false_is_error() {
        let mock_response = r#"{"success": false, "error": "upstream timeout"}"#;
        let mock_server = create_mock_server("/lof", 200, mock_response).await;

        let provider = HappyLofProvider::new(&mock_server.uri());
        let err = provider.high_premium().await.unwrap_err().to_string();
        assert!(err.contains("upstream timeout"), "{err}");
    }

    #[tokio::test]
    async fn test_malformed_response_is_error() {
        let mock_server = create_mock_server("/lof", 200, "<html>oops</html>").await;

        let provider = HappyLofProvider::new(&mock_server.uri());
        let err = provider.high_premium().await.unwrap_err().to_string();
        assert!(err.contains("Failed to parse JSON response"), "{err}");
    }

    #[tokio::test]
    async fn test_history_fetch() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "success": true,
            "fund_id": "161129",
            "data": [
                {"date": "2024-05-05", "premium_rate": 3.1, "price": 1.2, "net_value": 1.16, "volume": 2000},
                {"date": "2024-05-06", "premium_rate": 4.5, "price": 1.23, "net_value": 1.18, "volume": 3500}
            ],
            "total": 2
        }"#;
        Mock::given(method("GET"))
            .and(path("/lof/history/161129"))
            .and(query_param("days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = HappyLofProvider::new(&mock_server.uri());
        let history = provider.history("161129", 7).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].date, "2024-05-06");
        assert_eq!(history[1].premium_rate, Some(4.5));
    }
}
