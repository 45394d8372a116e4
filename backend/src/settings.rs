//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PROOF_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence order.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::ports::{MintFailurePolicy, UnknownMintFailurePolicy};
use crate::domain::{CodeExpiry, DEFAULT_EXPIRY_SECONDS};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MINT_TIMEOUT_SECONDS: u64 = 10;

/// Configuration values that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {message}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `mint_endpoint` is not a URL.
    #[error("invalid mint endpoint '{value}': {message}")]
    MintEndpoint {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `mint_failure_policy` is unknown.
    #[error(transparent)]
    MintFailurePolicy(#[from] UnknownMintFailurePolicy),
}

/// Service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROOF")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Seconds a generated code stays redeemable.
    pub code_expiry_seconds: Option<u64>,
    /// PostgreSQL URL. In-memory stores are used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection before failing.
    pub db_checkout_timeout_seconds: Option<u64>,
    /// Minting gateway endpoint. Minting is disabled when unset.
    pub mint_endpoint: Option<String>,
    /// Request timeout for the minting gateway.
    pub mint_timeout_seconds: Option<u64>,
    /// `placeholder` or `reject`.
    pub mint_failure_policy: Option<String>,
    /// Seed the in-memory event store with the demo catalogue.
    #[ortho_config(default = true)]
    pub seed_demo_events: bool,
}

impl AppSettings {
    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Expiry window shared by generator and verifier, clamped to range.
    #[must_use]
    pub fn code_expiry(&self) -> CodeExpiry {
        CodeExpiry::from_seconds(self.code_expiry_seconds.unwrap_or(DEFAULT_EXPIRY_SECONDS))
    }

    /// Configured database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool settings for the configured database, if any.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let mut config = PoolConfig::new(self.database_url()?);
        if let Some(max) = self.db_max_connections {
            config = config.with_max_size(max);
        }
        if let Some(seconds) = self.db_checkout_timeout_seconds {
            config = config.with_connection_timeout(Duration::from_secs(seconds.max(1)));
        }
        Some(config)
    }

    /// Parsed minting endpoint, if configured.
    pub fn mint_endpoint(&self) -> Result<Option<Url>, SettingsError> {
        let Some(raw) = self.mint_endpoint.as_deref().map(str::trim).filter(|raw| !raw.is_empty())
        else {
            return Ok(None);
        };
        Url::parse(raw)
            .map(Some)
            .map_err(|err| SettingsError::MintEndpoint {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Minting request timeout (at least one second).
    #[must_use]
    pub fn mint_timeout(&self) -> Duration {
        Duration::from_secs(
            self.mint_timeout_seconds
                .unwrap_or(DEFAULT_MINT_TIMEOUT_SECONDS)
                .max(1),
        )
    }

    /// Parsed failure policy, defaulting to placeholder references.
    pub fn mint_failure_policy(&self) -> Result<MintFailurePolicy, SettingsError> {
        self.mint_failure_policy
            .as_deref()
            .map_or(Ok(MintFailurePolicy::default()), |raw| {
                raw.parse().map_err(SettingsError::from)
            })
    }
}
