//! PDA seed constants.
//!
//! Seed order matters: every layout below must match the deployed program
//! byte for byte.
//!
//! | Account | Seeds | Program |
//! |---------|-------|---------|
//! | Pool authority | `[AUTHORITY_SEED]` | Solvent |
//! | Bucket state | `[droplet_mint, BUCKET_SEED]` | Solvent |
//! | Deposit state | `[droplet_mint, nft_mint, DEPOSIT_SEED]` | Solvent |
//! | Locker state | `[droplet_mint, nft_mint, LOCKER_SEED]` | Solvent |
//! | Swap state | `[droplet_mint, signer, SWAP_SEED]` | Solvent |
//! | Farmer authority | `[FARMER_AUTHORITY_SEED, nft_mint]` | Solvent |
//! | Item metadata | `[METADATA_SEED, metadata_program, nft_mint]` | Token metadata |

/// Pool authority PDA seed.
pub const AUTHORITY_SEED: &[u8] = b"authority-seed";

/// Bucket state PDA seed (v3 bucket layout).
pub const BUCKET_SEED: &[u8] = b"bucket-seed-v3";

/// Deposit state PDA seed.
pub const DEPOSIT_SEED: &[u8] = b"deposit-seed";

/// Locker state PDA seed.
pub const LOCKER_SEED: &[u8] = b"locker-seed";

/// Swap state PDA seed.
pub const SWAP_SEED: &[u8] = b"swap-seed";

/// Farmer authority PDA seed.
pub const FARMER_AUTHORITY_SEED: &[u8] = b"farmer-authority-seed";

/// Token metadata PDA seed.
pub const METADATA_SEED: &[u8] = b"metadata";
