//! Account schemas owned by the Solvent program.
//!
//! Every account starts with an 8-byte discriminator followed by the
//! Borsh-encoded body. Accounts may be allocated larger than their body, so
//! decoding ignores trailing bytes.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

use crate::{AccountDecodeError, CollectionInfo, DISCRIMINATOR_LEN, StakingParams, account_discriminator};

/// Offset of the first field after `discriminator(8) + bump(1)`.
///
/// Bucket, deposit and locker states store `droplet_mint` here, swap states
/// store `signer` here.
pub const FIRST_KEY_OFFSET: usize = DISCRIMINATOR_LEN + 1;

/// Offset of `droplet_mint` in a swap state: `discriminator(8) + bump(1) + signer(32)`.
pub const SWAP_DROPLET_MINT_OFFSET: usize = FIRST_KEY_OFFSET + 32;

/// A typed account schema with a discriminator.
pub trait AccountSchema: BorshSerialize + BorshDeserialize {
    /// Account type name used for the discriminator.
    const NAME: &'static str;

    /// The 8-byte account discriminator.
    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        account_discriminator(Self::NAME)
    }

    /// Decode account data, checking the discriminator.
    ///
    /// # Errors
    /// Returns [`AccountDecodeError`] when the data is too short, belongs to
    /// another account type, or the body does not deserialize.
    fn try_from_account_data(data: &[u8]) -> Result<Self, AccountDecodeError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(AccountDecodeError::TooShort);
        }
        if data[..DISCRIMINATOR_LEN] != Self::discriminator() {
            return Err(AccountDecodeError::DiscriminatorMismatch);
        }
        let mut body = &data[DISCRIMINATOR_LEN..];
        Self::deserialize(&mut body).map_err(|_| AccountDecodeError::InvalidData)
    }

    /// Encode into account data (discriminator + body).
    fn to_account_data(&self) -> Vec<u8> {
        let mut data = Self::discriminator().to_vec();
        // Writing into a Vec cannot fail
        let _ = self.serialize(&mut data);
        data
    }
}

// ============================================================================
// Bucket
// ============================================================================

/// Pool state of a bucket, keyed by its droplet mint.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct BucketState {
    /// PDA bump
    pub bump: u8,
    /// Droplet (pool token) mint
    pub droplet_mint: Pubkey,
    /// Membership rule for accepted items
    pub collection_info: CollectionInfo,
    /// Items currently held by the bucket
    pub num_nfts_in_bucket: u16,
    /// Items currently in lockers
    pub num_nfts_in_lockers: u16,
    /// Whether locking is enabled
    pub is_locking_enabled: bool,
    /// Maximum locker duration in seconds
    pub max_locker_duration: u64,
    /// Interest scaler, out of [`crate::LOCKERS_MAX_INTEREST_SCALER`]
    pub interest_scaler: u8,
    /// Whether auto-staking is enabled
    pub is_staking_enabled: bool,
    /// Farm the bucket stakes into, once configured
    pub staking_params: Option<StakingParams>,
}

impl AccountSchema for BucketState {
    const NAME: &'static str = "BucketStateV3";
}

// ============================================================================
// Deposit
// ============================================================================

/// Marks one item held by a bucket, keyed by (droplet mint, item mint).
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositState {
    /// PDA bump
    pub bump: u8,
    /// Bucket's droplet mint
    pub droplet_mint: Pubkey,
    /// Deposited item mint
    pub nft_mint: Pubkey,
}

impl AccountSchema for DepositState {
    const NAME: &'static str = "DepositState";
}

// ============================================================================
// Locker
// ============================================================================

/// Time-locked loan against one item, keyed by (droplet mint, item mint).
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockerState {
    /// PDA bump
    pub bump: u8,
    /// Bucket's droplet mint
    pub droplet_mint: Pubkey,
    /// Locked item mint
    pub nft_mint: Pubkey,
    /// Unix timestamp of the lock
    pub creation_timestamp: i64,
    /// Requested duration in seconds
    pub duration: u64,
    /// Droplets issued at lock time (smallest units)
    pub principal_amount: u64,
    /// Interest payable at full duration (smallest units)
    pub max_interest_payable: u64,
}

impl AccountSchema for LockerState {
    const NAME: &'static str = "LockerState";
}

impl LockerState {
    /// Unix timestamp after which the locker can be liquidated.
    pub fn expiry_timestamp(&self) -> i64 {
        self.creation_timestamp
            .saturating_add(i64::try_from(self.duration).unwrap_or(i64::MAX))
    }
}

// ============================================================================
// Swap
// ============================================================================

/// Swap-in-progress marker, keyed by (droplet mint, signer).
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapState {
    /// PDA bump
    pub bump: u8,
    /// Party performing the swap
    pub signer: Pubkey,
    /// Bucket's droplet mint
    pub droplet_mint: Pubkey,
    /// Set after the deposit leg, cleared by the redeem leg
    pub flag: bool,
}

impl AccountSchema for SwapState {
    const NAME: &'static str = "SwapState";
}
