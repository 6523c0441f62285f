//! HTTP gateway to the OpsPilot reconciliation service.
//!
//! [`ReconApi`] is the only seam through which the dashboard talks to the
//! outside world. [`HttpGateway`] implements it over reqwest; tests drive the
//! controller with scripted implementations instead.
//!
//! Every operation issues exactly one request and never retries. Failures
//! carry the [`Resource`] they were addressed to.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{Resource, TransportError, TransportErrorKind, ValidationError};
use crate::models::{
    CopilotAnswer, CopilotQuery, ExplanationResponse, HealthStatus, Issue, ReconciliationResult,
    Trade,
};
use crate::Result;

/// Operations offered by the reconciliation service.
#[async_trait]
pub trait ReconApi: Send + Sync {
    /// Fetches every trade.
    async fn list_trades(&self) -> Result<Vec<Trade>>;

    /// Fetches every unresolved issue.
    async fn list_issues(&self) -> Result<Vec<Issue>>;

    /// Runs a reconciliation pass. Mutates remote state; not idempotent.
    async fn run_reconciliation(&self) -> Result<ReconciliationResult>;

    /// Asks the copilot to explain one issue.
    async fn explain_issue(&self, issue_id: i64) -> Result<ExplanationResponse>;

    /// Sends a free-text question to the copilot.
    ///
    /// A query that is empty after trimming fails with
    /// [`ValidationError::EmptyQuery`] without touching the network.
    async fn ask_question(&self, query: &str) -> Result<CopilotAnswer>;

    /// Probes the service health endpoint.
    async fn health(&self) -> Result<HealthStatus>;
}

/// [`ReconApi`] over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Builds a gateway for the service at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`OpsPilotError::Tls`](crate::OpsPilotError::Tls) if the
    /// configured CA bundle is unusable or the client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(path) = &config.ca_cert {
            builder = builder.use_preconfigured_tls(crate::tls::build_tls_config(path)?);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| crate::OpsPilotError::Tls(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends `request` and decodes a JSON body of type `T`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: Resource,
        request: RequestBuilder,
    ) -> Result<T> {
        let fail = |kind: TransportErrorKind| TransportError::new(resource, kind);

        let response = request
            .send()
            .await
            .map_err(|e| fail(TransportErrorKind::Network(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(TransportErrorKind::Status(status.as_u16())).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fail(TransportErrorKind::Network(e.to_string())))?;
        let value = serde_json::from_slice(&body)
            .map_err(|e| fail(TransportErrorKind::Decode(e.to_string())))?;

        debug!(resource = %resource, bytes = body.len(), "response decoded");
        Ok(value)
    }
}

#[async_trait]
impl ReconApi for HttpGateway {
    async fn list_trades(&self) -> Result<Vec<Trade>> {
        self.fetch(Resource::Trades, self.request(Method::GET, "/trades/"))
            .await
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        self.fetch(Resource::Issues, self.request(Method::GET, "/issues/"))
            .await
    }

    async fn run_reconciliation(&self) -> Result<ReconciliationResult> {
        self.fetch(
            Resource::Reconciliation,
            self.request(Method::POST, "/reconcile/"),
        )
        .await
    }

    async fn explain_issue(&self, issue_id: i64) -> Result<ExplanationResponse> {
        let path = format!("/copilot/explain/{issue_id}");
        self.fetch(Resource::Explanation, self.request(Method::POST, &path))
            .await
    }

    async fn ask_question(&self, query: &str) -> Result<CopilotAnswer> {
        if query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }
        let request = self
            .request(Method::POST, "/copilot/query")
            .json(&CopilotQuery { query });
        self.fetch(Resource::Copilot, request).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.fetch(Resource::Health, self.request(Method::GET, "/health"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let gateway = HttpGateway::with_client(Client::new(), "http://127.0.0.1:8000/");
        assert_eq!(gateway.base_url(), "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn blank_query_short_circuits() {
        // Nothing listens on port 9; reaching the network would yield a
        // transport error instead of a validation error.
        let gateway = HttpGateway::with_client(Client::new(), "http://127.0.0.1:9");
        for query in ["", "   ", "\t\n"] {
            let err = gateway.ask_question(query).await.unwrap_err();
            assert!(matches!(
                err,
                crate::OpsPilotError::Validation(ValidationError::EmptyQuery)
            ));
        }
    }
}
