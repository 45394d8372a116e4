//! Wire types exchanged with the minting gateway.

use serde::{Deserialize, Serialize};

use crate::domain::ExternalReference;
use crate::domain::ports::MintReceipt;

#[derive(Debug, Serialize)]
pub(super) struct MintRequestDto<'a> {
    pub wallet_address: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct MintResponseDto {
    pub tx_hash: String,
    #[serde(default)]
    pub token_id: Option<u64>,
}

impl MintResponseDto {
    pub(super) fn into_receipt(self) -> Result<MintReceipt, String> {
        let tx_hash = self.tx_hash.trim();
        if tx_hash.is_empty() {
            return Err("tx_hash must not be empty".to_owned());
        }
        Ok(MintReceipt {
            external_reference: ExternalReference::new(tx_hash),
            token_id: self.token_id,
        })
    }
}
