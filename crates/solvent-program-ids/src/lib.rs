//! Single source of truth for all Solvent protocol addresses.
//!
//! This crate defines program IDs and well-known accounts as `&'static str`
//! constants so they can be decoded at compile time by downstream crates.
//!
//! # Usage
//!
//! ```rust,ignore
//! pub const SOLVENT_PROGRAM_ID: Pubkey =
//!     Pubkey::new_from_array(five8_const::decode_32_const(solvent_program_ids::SOLVENT_ID));
//! ```

#![no_std]

// =============================================================================
// Solvent Program ID
// =============================================================================

/// Solvent program ID.
///
/// Owns buckets, deposit/locker/swap states and the pool authority.
pub const SOLVENT_ID: &str = "SVTy4zMgDPExf1RaJdoCo5HvuyxrxdRsqF1uf2Rcd7J";

// =============================================================================
// External Program IDs
// =============================================================================

/// Metaplex token metadata program ID.
///
/// Item metadata accounts are derived under this program.
pub const TOKEN_METADATA_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

/// SPL Token program ID.
pub const SPL_TOKEN_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// SPL Associated Token Account program ID.
pub const ASSOCIATED_TOKEN_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

/// Sysvar rent account.
pub const SYSVAR_RENT_ID: &str = "SysvarRent111111111111111111111111111111111";

// =============================================================================
// Treasuries
// =============================================================================

/// Treasury collecting redemption fees (core bucket operations).
pub const CORE_TREASURY_ID: &str = "45nueWN9Qwn5vDBmJGBLEsYvaJG6vrNmNdCyrntXDk2K";

/// Treasury collecting locker interest and liquidation proceeds.
pub const LOCKERS_TREASURY_ID: &str = "HkjFiwUW7qnREVm2PxBg8LUrCvjExrJjyYY51wsZTUK8";
