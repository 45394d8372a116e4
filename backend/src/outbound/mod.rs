//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local ledger, proof and event stores
//! - **persistence**: PostgreSQL-backed stores using Diesel
//! - **minting**: reqwest client for the minting gateway
//! - **qr**: PNG QR rendering
//! - **metrics**: Prometheus exporters (feature-gated)
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod minting;
pub mod persistence;
pub mod qr;
