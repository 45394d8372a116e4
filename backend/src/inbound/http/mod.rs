//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod proof;
pub mod qr;
pub mod state;
mod validation;

pub use error::{ApiResult, json_config};

use actix_web::web;

/// Register every API route on `cfg`.
///
/// Handlers read [`state::HttpState`] and [`health::HealthState`] from app
/// data, so callers must register both.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(qr::generate_qr)
        .service(proof::verify_proof)
        .service(proof::list_user_proofs)
        .service(health::status)
        .service(health::ready)
        .service(health::live)
        .service(health::root);
}
