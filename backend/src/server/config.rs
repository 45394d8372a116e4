//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use url::Url;

use culture_proof::domain::CodeExpiry;
use culture_proof::domain::ports::MintFailurePolicy;
use culture_proof::outbound::persistence::DbPool;
use culture_proof::settings::{AppSettings, SettingsError};

/// Resolved settings plus the adapters built from them.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) code_expiry: CodeExpiry,
    pub(crate) mint_endpoint: Option<Url>,
    pub(crate) mint_timeout: Duration,
    pub(crate) mint_failure_policy: MintFailurePolicy,
    pub(crate) seed_demo_events: bool,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Resolve every setting up front so misconfiguration fails at startup.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            code_expiry: settings.code_expiry(),
            mint_endpoint: settings.mint_endpoint()?,
            mint_timeout: settings.mint_timeout(),
            mint_failure_policy: settings.mint_failure_policy()?,
            seed_demo_events: settings.seed_demo_events,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        })
    }

    /// Attach a database pool; storage ports then use the Diesel adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the bind address.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "used by server tests to bind an ephemeral port")
    )]
    #[must_use]
    pub const fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
