//! Reqwest-backed minting gateway adapter.
//!
//! Owns transport details only: request serialisation, timeout, HTTP status
//! mapping, and decoding the transaction hash.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{MintRequestDto, MintResponseDto};
use crate::domain::UserAddress;
use crate::domain::ports::{MintReceipt, MintingError, MintingService};

const USER_AGENT: &str = concat!("culture-proof/", env!("CARGO_PKG_VERSION"));

/// Mints by POSTing `{"wallet_address": ...}` to one gateway endpoint.
pub struct HttpMintingService {
    client: Client,
    endpoint: Url,
}

impl HttpMintingService {
    /// Build an adapter whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl MintingService for HttpMintingService {
    async fn mint(&self, user_address: &UserAddress) -> Result<MintReceipt, MintingError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&MintRequestDto {
                wallet_address: user_address.as_ref(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_receipt(body.as_ref())
    }
}

fn parse_receipt(body: &[u8]) -> Result<MintReceipt, MintingError> {
    let decoded: MintResponseDto = serde_json::from_slice(body)
        .map_err(|error| MintingError::decode(format!("invalid gateway JSON payload: {error}")))?;
    decoded.into_receipt().map_err(MintingError::decode)
}

fn map_transport_error(error: reqwest::Error) -> MintingError {
    if error.is_timeout() {
        MintingError::transport(format!("timed out: {error}"))
    } else {
        MintingError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MintingError {
    MintingError::rejected(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
