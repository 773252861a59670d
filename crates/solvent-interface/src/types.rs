//! Core types shared by account schemas and instruction arguments.

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_pubkey::Pubkey;

/// Droplets minted per deposited item, in whole droplets.
pub const DROPLETS_PER_NFT: u64 = 100;

/// Smallest-unit scale of a droplet (droplet mints use 8 decimals).
pub const DEFAULT_DROPLET_UNIT: u64 = 100_000_000;

/// Ceiling of a bucket's `interest_scaler` (100 = full raw interest).
pub const LOCKERS_MAX_INTEREST_SCALER: u64 = 100;

/// Length of the account and instruction discriminators.
pub const DISCRIMINATOR_LEN: usize = 8;

// ============================================================================
// Discriminators
// ============================================================================

/// Compute the 8-byte discriminator for `namespace:name`.
///
/// Accounts use the `account` namespace with the type name, instructions use
/// the `global` namespace with the snake_case instruction name.
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let hash = hasher.finalize();

    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    out
}

/// Discriminator of an account type.
pub fn account_discriminator(type_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    discriminator("account", type_name)
}

/// Discriminator of an instruction.
pub fn instruction_discriminator(ix_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    discriminator("global", ix_name)
}

// ============================================================================
// Collection Membership Rule
// ============================================================================

/// Rule deciding which items a bucket accepts.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum CollectionInfo {
    /// Creator set plus a committed whitelist root.
    ///
    /// Deposits must carry a membership proof against `whitelist_root`.
    V1 {
        /// Collection symbol as found in item metadata
        symbol: String,
        /// Creators that must be verified on each item
        verified_creators: Vec<Pubkey>,
        /// Root of the whitelist tree over permitted item mints
        whitelist_root: [u8; 32],
    },
    /// Single verified collection reference.
    V2 {
        /// Verified collection mint
        collection_mint: Pubkey,
    },
}

impl CollectionInfo {
    /// Committed whitelist root, if membership is proof based.
    pub fn whitelist_root(&self) -> Option<&[u8; 32]> {
        match self {
            Self::V1 { whitelist_root, .. } => Some(whitelist_root),
            Self::V2 { .. } => None,
        }
    }

    /// Whether deposits and locks need a whitelist proof.
    pub fn requires_whitelist_proof(&self) -> bool {
        matches!(self, Self::V1 { .. })
    }
}

// ============================================================================
// Staking Targets
// ============================================================================

/// Farm references a bucket auto-stakes its items into.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakingParams {
    /// Gem bank program
    pub gembank_program: Pubkey,
    /// Gem farm program
    pub gemfarm_program: Pubkey,
    /// Farm account
    pub gemworks_farm: Pubkey,
    /// Farm fee account
    pub gemworks_fee_account: Pubkey,
}
