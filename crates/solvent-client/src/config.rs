//! Client configuration.

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use solvent_interface::{
    CORE_TREASURY, DEFAULT_DROPLET_UNIT, LOCKERS_TREASURY, SOLVENT_PROGRAM_ID,
    TOKEN_METADATA_PROGRAM_ID,
};

use crate::error::ClientResult;

/// Ledger packet limit for a serialized transaction.
pub const MAX_TRANSACTION_SIZE: usize = 1232;

/// Addresses and limits a [`crate::SolventClient`] works with.
///
/// Every field has a default, so a JSON file only needs the overrides:
///
/// ```json
/// { "program_id": "SVTy4zMgDPExf1RaJdoCo5HvuyxrxdRsqF1uf2Rcd7J", "droplet_unit": 100000000 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Solvent program
    #[serde(with = "base58")]
    pub program_id: Pubkey,
    /// Token metadata program
    #[serde(with = "base58")]
    pub token_metadata_program_id: Pubkey,
    /// Treasury receiving redemption fees
    #[serde(with = "base58")]
    pub core_treasury: Pubkey,
    /// Treasury receiving locker interest
    #[serde(with = "base58")]
    pub lockers_treasury: Pubkey,
    /// Smallest-unit scale of one droplet
    pub droplet_unit: u64,
    /// Serialized transaction size limit
    pub max_transaction_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program_id: SOLVENT_PROGRAM_ID,
            token_metadata_program_id: TOKEN_METADATA_PROGRAM_ID,
            core_treasury: CORE_TREASURY,
            lockers_treasury: LOCKERS_TREASURY,
            droplet_unit: DEFAULT_DROPLET_UNIT,
            max_transaction_size: MAX_TRANSACTION_SIZE,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON configuration, missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`crate::ClientError::Config`] on malformed JSON or addresses.
    pub fn from_json(json: &str) -> ClientResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    /// Returns [`crate::ClientError::Config`] if serialization fails.
    pub fn to_json(&self) -> ClientResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

mod base58 {
    use core::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use solana_pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(|e| D::Error::custom(format!("invalid address {s}: {e}")))
    }
}
