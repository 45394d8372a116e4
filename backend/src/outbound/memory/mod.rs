//! In-memory adapters.
//!
//! Used by tests and by the default run mode when no database is configured.
//! State lives for the lifetime of the process. Every critical section is a
//! plain `std::sync::Mutex` guard with no `.await` inside.

mod code_ledger;
mod event_repository;
mod proof_repository;

pub use code_ledger::InMemoryCodeLedger;
pub use event_repository::{InMemoryEventRepository, demo_events};
pub use proof_repository::InMemoryProofRepository;
