//! Cached liveness check for the upstream service.
//!
//! A credential-less client is reported as [`ServiceStatus::NotConfigured`]
//! without touching the network. Otherwise a minimal probe decides between
//! [`ServiceStatus::Configured`] and [`ServiceStatus::Error`], and the answer
//! is reused for the cache window.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{client::Client, config::Config, query};

/// How long a probe result is reused
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(60);

/// Observable service state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceStatus {
    /// A credential is present and the probe succeeded
    Configured,
    /// No credential is available
    NotConfigured,
    /// A credential is present but the probe failed
    Error,
}

/// A cached status with the wall-clock time it was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Probe outcome
    pub status: ServiceStatus,
    /// When the probe completed
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct CachedStatus {
    snapshot: StatusSnapshot,
    at: Instant,
}

/// Probes the service and caches the outcome
///
/// The cached pair lives behind one async mutex that a refresh holds across
/// its probe, so concurrent callers see either the old pair or the new one
/// and at most one probe is in flight.
#[derive(Debug)]
pub struct StatusMonitor<C: Config> {
    client: Client<C>,
    ttl: Duration,
    cached: Mutex<Option<CachedStatus>>,
}

impl<C: Config> StatusMonitor<C> {
    /// Creates a monitor with the default 60 second window
    #[must_use]
    pub fn new(client: Client<C>) -> Self {
        Self {
            client,
            ttl: DEFAULT_STATUS_TTL,
            cached: Mutex::new(None),
        }
    }

    /// Overrides the cache window
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The client used for probing
    #[must_use]
    pub const fn client(&self) -> &Client<C> {
        &self.client
    }

    /// Current service status
    ///
    /// Reuses a result younger than the cache window unless `force_refresh`
    /// is set; a forced result replaces the cached one.
    pub async fn status(&self, force_refresh: bool) -> ServiceStatus {
        if !self.client.is_configured() {
            tracing::debug!("no API key configured; skipping probe");
            return ServiceStatus::NotConfigured;
        }

        let mut cached = self.cached.lock().await;
        let fresh = cached.as_ref().filter(|c| c.at.elapsed() < self.ttl).copied();
        if let (false, Some(hit)) = (force_refresh, fresh) {
            tracing::debug!(status = ?hit.snapshot.status, "service status cache hit");
            return hit.snapshot.status;
        }

        let status = match self.client.send(&query::probe(), None).await {
            Ok(_) => ServiceStatus::Configured,
            Err(e) => {
                tracing::warn!(error = %e, "service probe failed");
                ServiceStatus::Error
            }
        };
        tracing::debug!(?status, force_refresh, "service status refreshed");

        *cached = Some(CachedStatus {
            snapshot: StatusSnapshot {
                status,
                checked_at: Utc::now(),
            },
            at: Instant::now(),
        });
        status
    }

    /// Last probed status, regardless of age
    pub async fn snapshot(&self) -> Option<StatusSnapshot> {
        self.cached.lock().await.as_ref().map(|c| c.snapshot)
    }

    /// Drops the cached result so the next check probes again
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
