//! Address helpers against the default configuration.

use solana_pubkey::Pubkey;
use solvent_client::ClientConfig;
use solvent_client::pda::{find_authority, find_bucket, find_deposit, find_locker, find_swap};
use solvent_client::token::associated_token_address;

pub fn authority_address() -> Pubkey {
    find_authority(&ClientConfig::default()).unwrap().0
}

pub fn bucket_address(droplet_mint: &Pubkey) -> Pubkey {
    find_bucket(droplet_mint, &ClientConfig::default()).unwrap().0
}

pub fn deposit_address(droplet_mint: &Pubkey, nft_mint: &Pubkey) -> Pubkey {
    find_deposit(droplet_mint, nft_mint, &ClientConfig::default()).unwrap().0
}

pub fn locker_address(droplet_mint: &Pubkey, nft_mint: &Pubkey) -> Pubkey {
    find_locker(droplet_mint, nft_mint, &ClientConfig::default()).unwrap().0
}

pub fn swap_address(droplet_mint: &Pubkey, signer: &Pubkey) -> Pubkey {
    find_swap(droplet_mint, signer, &ClientConfig::default()).unwrap().0
}

/// Pool custody account of an item
pub fn custody_address(nft_mint: &Pubkey) -> Pubkey {
    associated_token_address(&authority_address(), nft_mint, true).unwrap()
}

/// Associated token account of `owner`, which need not be a wallet key
pub fn wallet_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    associated_token_address(owner, mint, true).unwrap()
}
