//! Ledger transport collaborator.
//!
//! The client never talks to an RPC node directly. Everything it reads or
//! submits goes through a [`Ledger`] implementation supplied by the caller.

use async_trait::async_trait;
use solana_account::Account;
use solana_hash::Hash;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::Transaction;
use thiserror::Error;

use crate::token::token_account_amount;

/// Failure reported by a [`Ledger`] implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Account does not exist
    #[error("account {address} not found")]
    NotFound {
        /// Requested address
        address: Pubkey,
    },

    /// Program or runtime rejected the transaction
    #[error("rejected: {reason}")]
    Rejected {
        /// Rejection reason as reported by the ledger
        reason: String,
    },

    /// Connectivity or confirmation failure
    #[error("transport: {message}")]
    Transport {
        /// Transport error message
        message: String,
    },

    /// Operation not offered by this ledger
    #[error("{operation} unsupported")]
    Unsupported {
        /// Operation name
        operation: &'static str,
    },
}

/// Filter applied to program account scans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountFilter {
    /// Exact data length
    DataSize(u64),
    /// Bytes at an offset
    Memcmp {
        /// Byte offset into account data
        offset: usize,
        /// Expected bytes
        bytes: Vec<u8>,
    },
}

impl AccountFilter {
    /// Memcmp filter on a public key field.
    pub fn memcmp_key(offset: usize, key: &Pubkey) -> Self {
        Self::Memcmp {
            offset,
            bytes: key.to_bytes().to_vec(),
        }
    }

    /// Whether `data` passes this filter.
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Self::DataSize(size) => data.len() as u64 == *size,
            Self::Memcmp { offset, bytes } => data
                .get(*offset..offset.saturating_add(bytes.len()))
                .is_some_and(|window| window == bytes.as_slice()),
        }
    }
}

/// Async access to the ledger.
///
/// `send_and_confirm_transaction` must only return once the transaction is
/// confirmed, since dependent submissions are issued right after it returns.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Fetch an account, `None` when it does not exist.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, LedgerError>;

    /// Scan accounts owned by `program_id` passing every filter.
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, LedgerError>;

    /// Balance of a token account, `None` when it does not exist.
    async fn get_token_account_balance(&self, address: &Pubkey) -> Result<Option<u64>, LedgerError> {
        let account = self.get_account(address).await?;
        Ok(account.and_then(|account| token_account_amount(&account.data)))
    }

    /// Blockhash to sign new transactions with.
    async fn latest_blockhash(&self) -> Result<Hash, LedgerError>;

    /// Submit a signed transaction and wait for confirmation.
    async fn send_and_confirm_transaction(&self, tx: &Transaction) -> Result<Signature, LedgerError>;

    /// Fund an address (test ledgers only).
    async fn request_airdrop(&self, _to: &Pubkey, _lamports: u64) -> Result<Signature, LedgerError> {
        Err(LedgerError::Unsupported {
            operation: "request_airdrop",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memcmp_filter() {
        let key = Pubkey::new_from_array([7; 32]);
        let mut data = vec![0u8; 41];
        data[9..41].copy_from_slice(key.as_ref());

        assert!(AccountFilter::memcmp_key(9, &key).matches(&data));
        assert!(!AccountFilter::memcmp_key(8, &key).matches(&data));
        // Window past the end never matches
        assert!(!AccountFilter::memcmp_key(10, &key).matches(&data));
    }

    #[test]
    fn test_data_size_filter() {
        assert!(AccountFilter::DataSize(3).matches(&[1, 2, 3]));
        assert!(!AccountFilter::DataSize(4).matches(&[1, 2, 3]));
    }
}
