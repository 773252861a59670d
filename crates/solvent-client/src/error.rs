//! Client error taxonomy.

use solana_pubkey::Pubkey;
use solana_signer::SignerError;
use solvent_interface::AccountDecodeError;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::pda::PdaKind;

/// Result alias used by every fallible client operation.
pub type ClientResult<T> = Result<T, ClientError>;

/// Protocol feature a bucket can toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    /// Time-locked loans
    Locking,
    /// Auto-staking into the farm
    Staking,
}

impl core::fmt::Display for Feature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Locking => f.write_str("locking"),
            Self::Staking => f.write_str("staking"),
        }
    }
}

/// Every failure a client entry point can surface.
///
/// Nothing is retried locally: each variant is returned to the caller with the
/// addresses or amounts involved.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed derivation input
    #[error("invalid seed: {reason}")]
    InvalidSeed { reason: String },

    /// Bump search exhausted, never expected for valid seeds
    #[error("no viable bump for {kind:?} under program {program_id}")]
    AddressDerivation { kind: PdaKind, program_id: Pubkey },

    /// Whitelist proof requested for a non-member item
    #[error("{item} is not a whitelist member")]
    NotAMember { item: Pubkey },

    /// Whitelist tree requested over no items
    #[error("cannot build a whitelist tree from an empty set")]
    EmptyWhitelist,

    /// Computed whitelist root differs from the committed one
    #[error(
        "whitelist root mismatch: bucket commits {}, computed {}",
        hex::encode(.committed),
        hex::encode(.computed)
    )]
    WhitelistRootMismatch { committed: [u8; 32], computed: [u8; 32] },

    /// Existence check failed for a reason other than not-found
    #[error("failed to resolve account {address}: {source}")]
    AccountResolutionFailure {
        address: Pubkey,
        #[source]
        source: LedgerError,
    },

    /// Required account does not exist
    #[error("account {address} not found")]
    AccountNotFound { address: Pubkey },

    /// Account exists but does not decode as the expected schema
    #[error("failed to decode account {address}: {source}")]
    AccountDecode {
        address: Pubkey,
        #[source]
        source: AccountDecodeError,
    },

    /// Whitelisted bucket but no proof source was given
    #[error("bucket {droplet_mint} is whitelisted, a proof for {nft_mint} is required")]
    WhitelistProofRequired { droplet_mint: Pubkey, nft_mint: Pubkey },

    /// Item is not where the operation needs it
    #[error("item {nft_mint} is not held by {expected_holder}")]
    MissingCollateral { nft_mint: Pubkey, expected_holder: Pubkey },

    /// Deposit leg requested while a swap is already in progress
    #[error("{signer} already has a swap in progress on {droplet_mint}")]
    DuplicateSwapLeg { droplet_mint: Pubkey, signer: Pubkey },

    /// Swap flag and balances disagree
    #[error("stale swap state for {signer} on {droplet_mint}: {reason}")]
    StaleSwapState {
        droplet_mint: Pubkey,
        signer: Pubkey,
        reason: &'static str,
    },

    /// Bucket feature switched off
    #[error("{feature} is disabled on bucket {droplet_mint}")]
    FeatureDisabled { droplet_mint: Pubkey, feature: Feature },

    /// Requested lock duration exceeds the bucket maximum
    #[error("lock duration {duration}s outside bucket bounds (max {max_duration}s)")]
    LockDurationOutOfBounds { duration: u64, max_duration: u64 },

    /// Unlock requested after the locker expired
    #[error("locker on {nft_mint} expired at {expiry}, it can only be liquidated")]
    LockerExpired { nft_mint: Pubkey, expiry: i64, now: i64 },

    /// Liquidation requested before the locker expired
    #[error("locker on {nft_mint} runs until {expiry}, it cannot be liquidated yet")]
    LockerNotExpired { nft_mint: Pubkey, expiry: i64, now: i64 },

    /// Loan arithmetic overflowed
    #[error("arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    /// Instruction group does not fit in one transaction
    #[error("transaction of {size} bytes exceeds the {limit} byte limit")]
    TransactionTooLarge { size: usize, limit: usize },

    /// Program rejected the transaction, reason verbatim
    #[error("operation rejected: {reason}")]
    OperationRejected { reason: String },

    /// Submission or confirmation failed at the transport
    #[error("transport failure: {message}")]
    TransportFailure { message: String },

    /// Payer or extra signer failed to sign
    #[error("signing failed: {0}")]
    SigningFailure(#[from] SignerError),

    /// Configuration failed to parse
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Fieldless category of a [`ClientError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Address derivation input or bump search
    InvalidSeed,
    /// Whitelist membership
    NotAMember,
    /// Existence check read
    AccountResolutionFailure,
    /// Swap flag and balances disagree
    StaleSwapState,
    /// Program rejection
    OperationRejected,
    /// Connectivity
    TransportFailure,
    /// Item not in the expected holding account
    MissingCollateral,
    /// Whitelist root
    WhitelistMismatch,
    /// Second deposit leg
    DuplicateSwapLeg,
    /// Bucket feature off
    FeatureDisabled,
    /// Lock duration bounds
    LockDurationOutOfBounds,
    /// Unlock after expiry
    LockerExpired,
    /// Liquidation before expiry
    LockerNotExpired,
    /// Missing or undecodable account
    AccountState,
    /// Packing
    TransactionTooLarge,
    /// Overflow
    Arithmetic,
    /// Signer
    Signing,
    /// Config parsing
    Config,
}

impl ClientError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSeed { .. } | Self::AddressDerivation { .. } => ErrorKind::InvalidSeed,
            Self::NotAMember { .. } | Self::EmptyWhitelist => ErrorKind::NotAMember,
            Self::WhitelistRootMismatch { .. } | Self::WhitelistProofRequired { .. } => {
                ErrorKind::WhitelistMismatch
            }
            Self::AccountResolutionFailure { .. } => ErrorKind::AccountResolutionFailure,
            Self::AccountNotFound { .. } | Self::AccountDecode { .. } => ErrorKind::AccountState,
            Self::MissingCollateral { .. } => ErrorKind::MissingCollateral,
            Self::DuplicateSwapLeg { .. } => ErrorKind::DuplicateSwapLeg,
            Self::StaleSwapState { .. } => ErrorKind::StaleSwapState,
            Self::FeatureDisabled { .. } => ErrorKind::FeatureDisabled,
            Self::LockDurationOutOfBounds { .. } => ErrorKind::LockDurationOutOfBounds,
            Self::LockerExpired { .. } => ErrorKind::LockerExpired,
            Self::LockerNotExpired { .. } => ErrorKind::LockerNotExpired,
            Self::ArithmeticOverflow { .. } => ErrorKind::Arithmetic,
            Self::TransactionTooLarge { .. } => ErrorKind::TransactionTooLarge,
            Self::OperationRejected { .. } => ErrorKind::OperationRejected,
            Self::TransportFailure { .. } => ErrorKind::TransportFailure,
            Self::SigningFailure(_) => ErrorKind::Signing,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Wrap a failed existence check.
    pub(crate) fn resolution(address: Pubkey, source: LedgerError) -> Self {
        Self::AccountResolutionFailure { address, source }
    }
}

impl From<LedgerError> for ClientError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound { address } => Self::AccountNotFound { address },
            LedgerError::Rejected { reason } => Self::OperationRejected { reason },
            LedgerError::Transport { message } => Self::TransportFailure { message },
            LedgerError::Unsupported { operation } => Self::TransportFailure {
                message: format!("{operation} is not supported by this ledger"),
            },
        }
    }
}
