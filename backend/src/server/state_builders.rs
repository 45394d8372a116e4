//! Builders wiring outbound adapters into the attendance service.

use std::io;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use culture_proof::domain::ports::{
    CodeLedger, DisabledMintingService, EventRepository, MintingService, NoOpProofMetrics,
    ProofMetrics, ProofRepository,
};
use culture_proof::domain::{
    AttendanceService, AttendanceServiceParts, CodeGenerator, CodeVerifier, ProofRecorder,
};
use culture_proof::inbound::http::state::HttpState;
use culture_proof::outbound::memory::{
    InMemoryCodeLedger, InMemoryEventRepository, InMemoryProofRepository, demo_events,
};
#[cfg(feature = "metrics")]
use culture_proof::outbound::metrics::PrometheusProofMetrics;
use culture_proof::outbound::minting::HttpMintingService;
use culture_proof::outbound::persistence::{
    DieselCodeLedger, DieselEventRepository, DieselProofRepository,
};
use culture_proof::outbound::qr::QrCodePngRenderer;

use super::ServerConfig;

struct Stores {
    ledger: Arc<dyn CodeLedger>,
    proofs: Arc<dyn ProofRepository>,
    events: Arc<dyn EventRepository>,
}

fn build_stores(config: &ServerConfig) -> Stores {
    if let Some(pool) = &config.db_pool {
        info!("using PostgreSQL stores");
        return Stores {
            ledger: Arc::new(DieselCodeLedger::new(pool.clone())),
            proofs: Arc::new(DieselProofRepository::new(pool.clone())),
            events: Arc::new(DieselEventRepository::new(pool.clone())),
        };
    }

    warn!("no database configured; ledger and proofs are kept in memory");
    let events = if config.seed_demo_events {
        InMemoryEventRepository::with_events(demo_events())
    } else {
        InMemoryEventRepository::default()
    };
    Stores {
        ledger: Arc::new(InMemoryCodeLedger::new()),
        proofs: Arc::new(InMemoryProofRepository::new()),
        events: Arc::new(events),
    }
}

fn build_minting(config: &ServerConfig) -> io::Result<Arc<dyn MintingService>> {
    match &config.mint_endpoint {
        Some(endpoint) => {
            let service = HttpMintingService::new(endpoint.clone(), config.mint_timeout)
                .map_err(|err| io::Error::other(format!("minting client build failed: {err}")))?;
            info!(endpoint = %endpoint, "minting gateway configured");
            Ok(Arc::new(service))
        }
        None => {
            warn!(
                policy = ?config.mint_failure_policy,
                "no minting endpoint configured; every claim takes the failure policy"
            );
            Ok(Arc::new(DisabledMintingService))
        }
    }
}

#[cfg(feature = "metrics")]
fn build_metrics(config: &ServerConfig) -> io::Result<Arc<dyn ProofMetrics>> {
    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusProofMetrics::new(&prom.registry).map_err(|err| {
                io::Error::other(format!("proof metrics registration failed: {err}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpProofMetrics)),
    }
}

#[cfg(not(feature = "metrics"))]
fn build_metrics(_config: &ServerConfig) -> io::Result<Arc<dyn ProofMetrics>> {
    Ok(Arc::new(NoOpProofMetrics))
}

/// Build the attendance service from configured adapters.
pub(super) fn build_attendance_service(config: &ServerConfig) -> io::Result<AttendanceService> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let Stores {
        ledger,
        proofs,
        events,
    } = build_stores(config);

    Ok(AttendanceService::new(AttendanceServiceParts {
        events,
        generator: CodeGenerator::new(
            clock.clone(),
            Arc::new(QrCodePngRenderer::new()),
            config.code_expiry,
        ),
        verifier: CodeVerifier::new(ledger, clock.clone(), config.code_expiry),
        recorder: ProofRecorder::new(proofs, clock),
        minting: build_minting(config)?,
        metrics: build_metrics(config)?,
        mint_failure_policy: config.mint_failure_policy,
    }))
}

/// Build the shared HTTP state.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    Ok(HttpState::from(Arc::new(build_attendance_service(config)?)))
}
