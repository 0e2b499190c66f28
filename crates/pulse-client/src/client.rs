//! Pulse HTTP client implementation

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{PulseClientError, Result};
use crate::types::*;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pulse REST API client
#[derive(Debug, Clone)]
pub struct PulseClient {
    client: Client,
    base_url: Url,
}

impl PulseClient {
    /// Create a new Pulse client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Pulse server (e.g., "http://localhost:9200")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new Pulse client with custom configuration
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Create a new Pulse client that sends a bearer token with every request.
    ///
    /// The token is set as a default `Authorization: Bearer <token>` header.
    pub fn with_bearer_token(base_url: &str, token: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let header_value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| PulseClientError::ParseError(format!("Invalid auth token: {}", e)))?;
        headers.insert(reqwest::header::AUTHORIZATION, header_value);

        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Decode a response, turning non-2xx statuses into `ServerError`
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body: ErrorBody = response.json().await.unwrap_or(ErrorBody {
                error: "unknown".to_string(),
                message: status.to_string(),
            });
            Err(PulseClientError::server_error(status.as_u16(), body.message))
        }
    }

    /// Check a body-less response status
    async fn check(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body: ErrorBody = response.json().await.unwrap_or(ErrorBody {
                error: "unknown".to_string(),
                message: status.to_string(),
            });
            Err(PulseClientError::server_error(status.as_u16(), body.message))
        }
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// List all monitored services
    pub async fn list_services(&self) -> Result<ServicesResponse> {
        let url = self.url("/apm/v1/services")?;
        debug!(%url, "listing services");
        Self::decode(self.client.get(url).send().await?).await
    }

    /// Get one service with its capabilities
    pub async fn get_service(&self, service_id: &str) -> Result<Service> {
        let url = self.url(&format!("/apm/v1/services/{}", service_id))?;
        Self::decode(self.client.get(url).send().await?).await
    }

    // =========================================================================
    // Logs
    // =========================================================================

    /// Query log entries
    pub async fn get_logs(&self, service_id: &str, query: &LogQuery) -> Result<LogsResponse> {
        let url = self.url(&format!("/apm/v1/services/{}/logs", service_id))?;
        Self::decode(self.client.get(url).query(query).send().await?).await
    }

    /// Ingest a log entry
    pub async fn ingest_log(&self, service_id: &str, entry: &IngestLog) -> Result<LogItem> {
        let url = self.url(&format!("/apm/v1/services/{}/logs", service_id))?;
        Self::decode(self.client.post(url).json(entry).send().await?).await
    }

    /// Fetch the template-grouped log view
    pub async fn get_log_groups(
        &self,
        service_id: &str,
        max_groups: Option<usize>,
        range: Option<&str>,
    ) -> Result<LogGroupsResponse> {
        let url = self.url(&format!("/apm/v1/services/{}/logs/groups", service_id))?;
        let mut request = self.client.get(url);
        if let Some(max) = max_groups {
            request = request.query(&[("max_groups", max.to_string())]);
        }
        if let Some(range) = range {
            request = request.query(&[("range", range)]);
        }
        Self::decode(request.send().await?).await
    }

    // =========================================================================
    // Traces
    // =========================================================================

    /// List trace summaries
    pub async fn list_traces(&self, service_id: &str) -> Result<TracesResponse> {
        let url = self.url(&format!("/apm/v1/services/{}/traces", service_id))?;
        Self::decode(self.client.get(url).send().await?).await
    }

    /// Fetch the duration-ranked waterfall view of a trace
    pub async fn get_waterfall(
        &self,
        service_id: &str,
        trace_id: &str,
    ) -> Result<WaterfallResponse> {
        let url = self.url(&format!(
            "/apm/v1/services/{}/traces/{}/waterfall",
            service_id, trace_id
        ))?;
        Self::decode(self.client.get(url).send().await?).await
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    /// Fetch a metric series for a symbolic range key
    pub async fn get_metric_series(
        &self,
        service_id: &str,
        metric: &str,
        range: &str,
    ) -> Result<MetricSeriesResponse> {
        let url = self.url(&format!(
            "/apm/v1/services/{}/metrics/{}",
            service_id, metric
        ))?;
        Self::decode(self.client.get(url).query(&[("range", range)]).send().await?).await
    }

    // =========================================================================
    // SLOs
    // =========================================================================

    /// List SLO definitions
    pub async fn list_slos(&self, service_id: &str) -> Result<SlosResponse> {
        let url = self.url(&format!("/apm/v1/services/{}/slos", service_id))?;
        Self::decode(self.client.get(url).send().await?).await
    }

    /// Create an SLO definition
    pub async fn create_slo(&self, service_id: &str, payload: &SloPayload) -> Result<SloItem> {
        let url = self.url(&format!("/apm/v1/services/{}/slos", service_id))?;
        Self::decode(self.client.post(url).json(payload).send().await?).await
    }

    /// Delete an SLO definition
    pub async fn delete_slo(&self, service_id: &str, slo_id: &str) -> Result<()> {
        let url = self.url(&format!("/apm/v1/services/{}/slos/{}", service_id, slo_id))?;
        Self::check(self.client.delete(url).send().await?).await
    }

    /// Error-budget status for the selected range
    pub async fn get_slo_status(
        &self,
        service_id: &str,
        slo_id: &str,
        range: &str,
    ) -> Result<SloStatusResponse> {
        let url = self.url(&format!(
            "/apm/v1/services/{}/slos/{}/status",
            service_id, slo_id
        ))?;
        Self::decode(self.client.get(url).query(&[("range", range)]).send().await?).await
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// List notification channels
    pub async fn list_channels(&self) -> Result<ChannelsResponse> {
        let url = self.url("/apm/v1/notifications/channels")?;
        Self::decode(self.client.get(url).send().await?).await
    }

    /// Create a notification channel
    pub async fn create_channel(&self, channel: &Channel) -> Result<Channel> {
        let url = self.url("/apm/v1/notifications/channels")?;
        Self::decode(self.client.post(url).json(channel).send().await?).await
    }

    /// Delete a notification channel and its rules
    pub async fn delete_channel(&self, channel_id: &str) -> Result<()> {
        let url = self.url(&format!("/apm/v1/notifications/channels/{}", channel_id))?;
        Self::check(self.client.delete(url).send().await?).await
    }

    /// List notification rules
    pub async fn list_rules(&self) -> Result<RulesResponse> {
        let url = self.url("/apm/v1/notifications/rules")?;
        Self::decode(self.client.get(url).send().await?).await
    }

    /// Create a notification rule
    pub async fn create_rule(&self, rule: &Rule) -> Result<Rule> {
        let url = self.url("/apm/v1/notifications/rules")?;
        Self::decode(self.client.post(url).json(rule).send().await?).await
    }
}
