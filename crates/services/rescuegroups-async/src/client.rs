use secrecy::ExposeSecret;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    error::{self, ApiError},
    types::envelope::{AuthenticatedEnvelope, EnvelopeStatus, RequestEnvelope, ResponseEnvelope},
};

/// RescueGroups API client
///
/// The client is generic over a [`Config`] implementation that provides the
/// endpoint, credential, and paging policy. Each call performs exactly one
/// request/response cycle; nothing is retried.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::RescueGroupsConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables:
    /// - `RESCUEGROUPS_API_KEY` for the API key
    /// - `RESCUEGROUPS_API_URL` for a custom endpoint
    /// - `RESCUEGROUPS_TIMEOUT_SECS` for the request timeout
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::RescueGroupsConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// The HTTP client gets no request timeout of its own; the configured
    /// budget is enforced per call.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// Whether a credential is currently available
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.api_key().is_some()
    }

    /// Sends one envelope and classifies the outcome
    ///
    /// On success the envelope is returned unmodified; its status is `ok`
    /// or `warning`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Timeout`] when the configured budget elapses,
    /// [`ApiError::Network`] on transport failure or cancellation,
    /// [`ApiError::HttpStatus`] for non-2xx replies, and
    /// [`ApiError::Upstream`] for envelopes with status `error`.
    pub async fn send(
        &self,
        envelope: &RequestEnvelope,
        cancel: Option<&CancellationToken>,
    ) -> Result<ResponseEnvelope, ApiError> {
        let timeout = self.config.timeout();
        let never = CancellationToken::new();
        let cancel = cancel.unwrap_or(&never);

        tracing::debug!(
            object_type = ?envelope.object_type,
            offset = envelope.search.result_start,
            limit = envelope.search.result_limit,
            filters = envelope.search.filters.len(),
            "sending search envelope"
        );

        let result = tokio::select! {
            result = self.exchange(envelope) => result,
            () = tokio::time::sleep(timeout) => Err(ApiError::timeout()),
            () = cancel.cancelled() => Err(ApiError::aborted()),
        };

        match &result {
            Ok(response) => tracing::debug!(
                status = ?response.status,
                found_rows = ?response.found_rows,
                records = response.data.as_ref().map_or(0, serde_json::Map::len),
                "search envelope answered"
            ),
            Err(e) => tracing::warn!(error = %e, "search envelope failed"),
        }
        result
    }

    async fn exchange(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, ApiError> {
        let key = self.config.api_key();
        if key.is_none() {
            tracing::warn!("sending request without an API key");
        }
        let body = AuthenticatedEnvelope {
            apikey: key.as_ref().map(|k| k.expose_secret()),
            envelope,
        };

        let request = self
            .http
            .post(self.config.endpoint())
            .json(&body)
            .build()?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error::http_status_error(status));
        }

        let bytes = response.bytes().await?;
        let parsed: ResponseEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| error::map_deser(&e, &bytes))?;

        match parsed.status {
            EnvelopeStatus::Error => Err(error::upstream_error(&parsed)),
            EnvelopeStatus::Warning => {
                tracing::warn!(
                    messages = ?parsed.general_message_texts(),
                    "upstream answered with warnings"
                );
                Ok(parsed)
            }
            EnvelopeStatus::Ok => Ok(parsed),
        }
    }
}
