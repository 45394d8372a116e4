//! Service entry point: loads settings, builds adapters, and runs the HTTP
//! server.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Context as _, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use culture_proof::inbound::http::health::HealthState;
use culture_proof::outbound::persistence::DbPool;
use culture_proof::settings::AppSettings;
use ortho_config::OrthoConfig as _;

use server::{ServerConfig, create_server};

#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> std::result::Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "Prometheus metrics disabled");
            None
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;
    let mut config = ServerConfig::from_settings(&settings).wrap_err("invalid settings")?;

    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(initialize_metrics(|| {
            PrometheusMetricsBuilder::new("culture_proof")
                .endpoint("/metrics")
                .build()
        }));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    info!("server started");
    server.await.wrap_err("server terminated with an error")
}
