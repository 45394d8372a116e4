//! PostgreSQL persistence adapters using Diesel.
//!
//! Adapters only translate between Diesel rows and domain types. Row structs
//! and table definitions stay private to this module.
//!
//! ```ignore
//! use culture_proof::outbound::persistence::{DbPool, DieselCodeLedger, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/proofs")).await?;
//! let ledger = DieselCodeLedger::new(pool);
//! ```

mod diesel_code_ledger;
mod diesel_error_mapping;
mod diesel_event_repository;
mod diesel_proof_repository;
mod models;
mod pool;
mod schema;

pub use diesel_code_ledger::DieselCodeLedger;
pub use diesel_event_repository::DieselEventRepository;
pub use diesel_proof_repository::DieselProofRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
