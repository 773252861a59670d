//! Program ID and well-known account constants.
//!
//! These addresses are imported from the central `solvent-program-ids` crate,
//! which is the single source of truth for all protocol addresses.

use solana_pubkey::Pubkey;

use crate::seeds::AUTHORITY_SEED;

// =============================================================================
// Program IDs (imported from solvent-program-ids crate)
// =============================================================================

/// Solvent program ID.
pub const SOLVENT_PROGRAM_ID: Pubkey =
    Pubkey::new_from_array(five8_const::decode_32_const(solvent_program_ids::SOLVENT_ID));

/// Token metadata program ID.
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey = Pubkey::new_from_array(
    five8_const::decode_32_const(solvent_program_ids::TOKEN_METADATA_ID),
);

/// SPL Token program ID.
pub const SPL_TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::new_from_array(five8_const::decode_32_const(solvent_program_ids::SPL_TOKEN_ID));

/// Associated Token Account program ID.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = Pubkey::new_from_array(
    five8_const::decode_32_const(solvent_program_ids::ASSOCIATED_TOKEN_ID),
);

/// System program ID.
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_system_interface::program::ID;

/// Rent sysvar.
pub const SYSVAR_RENT_ID: Pubkey =
    Pubkey::new_from_array(five8_const::decode_32_const(solvent_program_ids::SYSVAR_RENT_ID));

// =============================================================================
// Treasuries
// =============================================================================

/// Core treasury (receives redemption fees).
pub const CORE_TREASURY: Pubkey =
    Pubkey::new_from_array(five8_const::decode_32_const(solvent_program_ids::CORE_TREASURY_ID));

/// Lockers treasury (receives interest and liquidation proceeds).
pub const LOCKERS_TREASURY: Pubkey = Pubkey::new_from_array(five8_const::decode_32_const(
    solvent_program_ids::LOCKERS_TREASURY_ID,
));

// =============================================================================
// Compile-time PDAs
// =============================================================================

const SOLVENT_AUTHORITY_PDA: ([u8; 32], u8) = const_crypto::ed25519::derive_program_address(
    &[AUTHORITY_SEED],
    &five8_const::decode_32_const(solvent_program_ids::SOLVENT_ID),
);

/// Pool authority PDA of the mainnet Solvent program.
///
/// Owns every collateral custody account. Clients configured with another
/// program ID must derive the authority at runtime instead.
pub const SOLVENT_AUTHORITY_ADDRESS: Pubkey = Pubkey::new_from_array(SOLVENT_AUTHORITY_PDA.0);

/// Bump of [`SOLVENT_AUTHORITY_ADDRESS`].
pub const SOLVENT_AUTHORITY_BUMP: u8 = SOLVENT_AUTHORITY_PDA.1;
