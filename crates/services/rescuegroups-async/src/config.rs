use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Default RescueGroups HTTP v2 endpoint
pub const RESCUEGROUPS_DEFAULT_ENDPOINT: &str = "https://api.rescuegroups.org/http/v2.json";
/// Default time budget for one request/response cycle
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Page size used when a search does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Largest page size ever sent upstream
pub const MAX_PAGE_SIZE: u32 = 100;
/// Distance (miles) applied to location searches without an explicit radius
pub const DEFAULT_RADIUS: u32 = 50;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "RESCUEGROUPS_API_KEY";
/// Environment variable overriding the endpoint URL
pub const ENV_API_URL: &str = "RESCUEGROUPS_API_URL";
/// Environment variable overriding the timeout, in whole seconds
pub const ENV_TIMEOUT_SECS: &str = "RESCUEGROUPS_TIMEOUT_SECS";

/// Paging and distance policy applied by the query builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDefaults {
    /// Page size when the caller gives none
    pub default_limit: u32,
    /// Upper bound every requested page size is clamped to
    pub max_limit: u32,
    /// Radius used for location searches without a radius
    pub default_radius: u32,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
            max_limit: MAX_PAGE_SIZE,
            default_radius: DEFAULT_RADIUS,
        }
    }
}

impl SearchDefaults {
    /// Sets the default page size
    #[must_use]
    pub const fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Sets the maximum page size
    #[must_use]
    pub const fn with_max_limit(mut self, limit: u32) -> Self {
        self.max_limit = limit;
        self
    }

    /// Sets the default search radius
    #[must_use]
    pub const fn with_default_radius(mut self, radius: u32) -> Self {
        self.default_radius = radius;
        self
    }

    /// Resolves a requested page size: default when absent, never below 1,
    /// never above `max_limit`.
    #[must_use]
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

/// Configuration for the RescueGroups client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct RescueGroupsConfig {
    endpoint: String,
    api_key: Option<SecretString>,
    timeout: Duration,
    search: SearchDefaults,
}

/// Helper to read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for RescueGroupsConfig {
    fn default() -> Self {
        let timeout = env_trimmed(ENV_TIMEOUT_SECS)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Self {
            endpoint: env_trimmed(ENV_API_URL)
                .unwrap_or_else(|| RESCUEGROUPS_DEFAULT_ENDPOINT.into()),
            api_key: env_trimmed(ENV_API_KEY).map(SecretString::from),
            timeout,
            search: SearchDefaults::default(),
        }
    }
}

impl RescueGroupsConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `RESCUEGROUPS_API_KEY` for the API key
    /// - `RESCUEGROUPS_API_URL` for a custom endpoint
    /// - `RESCUEGROUPS_TIMEOUT_SECS` for the request timeout (defaults to 30)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint URL
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Clears the API key
    #[must_use]
    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Sets the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the paging and radius policy
    #[must_use]
    pub const fn with_search_defaults(mut self, search: SearchDefaults) -> Self {
        self.search = search;
        self
    }
}

/// Configuration trait for the RescueGroups client
///
/// Implementors are both the configuration source and the credential
/// provider. `api_key` is consulted on every call.
pub trait Config: Send + Sync {
    /// Endpoint every envelope is posted to
    fn endpoint(&self) -> &str;

    /// Current API key, or `None` when the service is not configured.
    /// Blank keys must be reported as `None`.
    fn api_key(&self) -> Option<SecretString>;

    /// Time budget for one request/response cycle
    fn timeout(&self) -> Duration;

    /// Paging and radius policy for the query builders
    fn search_defaults(&self) -> SearchDefaults;
}

impl Config for RescueGroupsConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Option<SecretString> {
        self.api_key
            .as_ref()
            .map(|secret| secret.expose_secret().trim())
            .filter(|key| !key.is_empty())
            .map(|key| SecretString::from(key.to_string()))
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn search_defaults(&self) -> SearchDefaults {
        self.search
    }
}
