//! HTTP client for the forecast data endpoint.
//!
//! The endpoint is a single unauthenticated URL answering
//! `?time=current&type=<component>` with a JSON envelope
//! `{type, data}`. One request fetches one component's full series.

use reqwest::Client;
use tracing::debug;

use crate::models::ForecastResponse;

use super::ApiError;

/// Fetch seam for the cache controller. The production implementation
/// is [`ApiClient`]; tests substitute counting fakes.
pub trait ForecastBackend {
    fn fetch_component(
        &self,
        component: &str,
    ) -> impl std::future::Future<Output = Result<ForecastResponse, ApiError>> + Send;
}

/// Client for the forecast data endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with no request timeout. A request that never
    /// completes leaves its component pending indefinitely; callers
    /// that want bounded waits use [`ApiClient::with_timeout`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into(),
        })
    }

    /// Same as [`ApiClient::new`] but with a per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
        })
    }

    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

impl ForecastBackend for ApiClient {
    async fn fetch_component(&self, component: &str) -> Result<ForecastResponse, ApiError> {
        debug!(component, "Fetching component from backend");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("time", "current"), ("type", component)])
            .send()
            .await?;

        let response = Self::check_response(response).await?;

        let parsed: ForecastResponse = response.json().await?;
        debug!(
            component,
            remote_type = %parsed.kind,
            records = parsed.data.len(),
            "Component fetched"
        );
        Ok(parsed)
    }
}
