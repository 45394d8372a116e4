//! Minting gateway adapters.

mod dto;
mod http_gateway;

pub use http_gateway::HttpMintingService;
