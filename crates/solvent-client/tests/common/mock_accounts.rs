//! Mock account builders with the real on-ledger byte layouts.

use solana_account::Account;
use solana_pubkey::Pubkey;
use solvent_client::interface::state::AccountSchema;
use solvent_client::interface::{SOLVENT_PROGRAM_ID, SPL_TOKEN_PROGRAM_ID};
use solvent_client::token::{TOKEN_ACCOUNT_AMOUNT_OFFSET, TOKEN_ACCOUNT_LEN};

/// SPL Token mint layout length
pub const MINT_LEN: usize = 82;

/// Rent-exempt-ish balance for every mock account
pub const MOCK_LAMPORTS: u64 = 1_000_000_000;

/// SPL Token mint account
pub fn mint_account(decimals: u8) -> Account {
    let mut data = vec![0u8; MINT_LEN];
    // mint_authority: Some
    data[0] = 1;
    // decimals at offset 44
    data[44] = decimals;
    // is_initialized at offset 45
    data[45] = 1;

    Account {
        lamports: MOCK_LAMPORTS,
        data,
        owner: SPL_TOKEN_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    }
}

/// SPL Token account holding `amount` of `mint` for `owner`
pub fn token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Account {
    let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
    data[0..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    set_amount(&mut data, amount);
    // state: Initialized
    data[108] = 1;

    Account {
        lamports: MOCK_LAMPORTS,
        data,
        owner: SPL_TOKEN_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    }
}

/// Overwrite the amount of a token account
pub fn set_amount(data: &mut [u8], amount: u64) {
    data[TOKEN_ACCOUNT_AMOUNT_OFFSET..TOKEN_ACCOUNT_AMOUNT_OFFSET + 8]
        .copy_from_slice(&amount.to_le_bytes());
}

/// Mint recorded in a token account
pub fn token_mint(data: &[u8]) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[0..32]);
    Pubkey::new_from_array(bytes)
}

/// Solvent-owned account holding `state`
pub fn program_account<T: AccountSchema>(state: &T) -> Account {
    Account {
        lamports: MOCK_LAMPORTS,
        data: state.to_account_data(),
        owner: SOLVENT_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    }
}
