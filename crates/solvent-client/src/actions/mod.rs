//! Operation entry points.
//!
//! Every operation comes in two forms on [`SolventClient`]:
//!
//! - `build_*` resolves addresses, reads the state it needs and returns the
//!   instructions (holding account creations first) without submitting.
//! - the plain name builds and submits, returning the signature(s).
//!
//! Optional inputs are grouped in option structs whose fields default
//! independently.

mod admin;
mod bucket;
mod locker;
mod staking;
mod swap;

use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solvent_interface::state::BucketState;
use tracing::debug;

use crate::client::SolventClient;
use crate::error::{ClientError, ClientResult};
use crate::ledger::Ledger;
use crate::token::{HoldingAccount, resolve_holding_account};
use crate::whitelist::{Node, WhitelistTree};

pub use staking::FarmAccounts;
pub use swap::SwapPlan;

/// Caller-supplied holding accounts.
///
/// A supplied address is used as is and never created. A missing one is
/// derived as the signer's associated token account and, where the operation
/// pays into it, created when absent. Accounts owned by the protocol are
/// never created here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoldingAccounts {
    /// Signer's item account
    pub nft: Option<Pubkey>,
    /// Signer's droplet account
    pub droplet: Option<Pubkey>,
}

/// Where a whitelist proof comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProofSource {
    /// No proof (collections verified on chain)
    #[default]
    None,
    /// Proof computed elsewhere
    Explicit(Vec<Node>),
    /// Full whitelist, the proof is built here and its root checked against
    /// the bucket
    Whitelist(Vec<Pubkey>),
}

/// Options of `deposit_nft`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepositOptions {
    /// Whitelist proof source
    pub proof: ProofSource,
    /// Deposit as the first leg of a swap
    pub swap: bool,
    /// Holding accounts
    pub holding: HoldingAccounts,
}

/// Options of `redeem_nft`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedeemOptions {
    /// Redeem as the second leg of a swap
    pub swap: bool,
    /// Holding accounts
    pub holding: HoldingAccounts,
}

/// Options of `lock_nft`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockOptions {
    /// Whitelist proof source
    pub proof: ProofSource,
    /// Holding accounts
    pub holding: HoldingAccounts,
}

/// Options of `unlock_nft` and `liquidate_locker`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemOptions {
    /// Holding accounts
    pub holding: HoldingAccounts,
}

/// Options of `swap_nfts`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapOptions {
    /// Whitelist proof source for the deposited item
    pub proof: ProofSource,
    /// Holding accounts (`nft` is the deposited item's source)
    pub holding: HoldingAccounts,
    /// Account receiving the redeemed item
    pub redeem_destination: Option<Pubkey>,
}

/// Proof to attach for `nft_mint` on `bucket`.
///
/// # Errors
/// Returns [`ClientError::WhitelistProofRequired`] when the bucket is
/// whitelisted and no proof source is given,
/// [`ClientError::WhitelistRootMismatch`] when a supplied whitelist does not
/// hash to the committed root and [`ClientError::NotAMember`] when the item is
/// not in it.
pub fn resolve_proof(
    bucket: &BucketState,
    nft_mint: &Pubkey,
    source: &ProofSource,
) -> ClientResult<Option<Vec<Node>>> {
    let Some(committed) = bucket.collection_info.whitelist_root() else {
        return Ok(None);
    };
    match source {
        ProofSource::None => Err(ClientError::WhitelistProofRequired {
            droplet_mint: bucket.droplet_mint,
            nft_mint: *nft_mint,
        }),
        ProofSource::Explicit(proof) => Ok(Some(proof.clone())),
        ProofSource::Whitelist(items) => {
            let tree = WhitelistTree::build(items)?;
            tree.check_root(committed)?;
            let proof = tree.prove(nft_mint)?;
            debug!(%nft_mint, depth = proof.len(), "built whitelist proof");
            Ok(Some(proof))
        }
    }
}

impl<L: Ledger, S: Signer> SolventClient<L, S> {
    /// Holding account of `owner`, taken from `supplied` or resolved.
    pub(crate) async fn holding_account(
        &self,
        supplied: Option<Pubkey>,
        owner: &Pubkey,
        mint: &Pubkey,
        allow_off_curve: bool,
    ) -> ClientResult<HoldingAccount> {
        match supplied {
            Some(address) => Ok(HoldingAccount::existing(address)),
            None => {
                resolve_holding_account(self.ledger(), &self.payer_pubkey(), owner, mint, allow_off_curve)
                    .await
            }
        }
    }

    /// Balance of a token account read for a precondition, zero if missing.
    pub(crate) async fn checked_balance(&self, address: &Pubkey) -> ClientResult<u64> {
        self.ledger()
            .get_token_account_balance(address)
            .await
            .map(|balance| balance.unwrap_or(0))
            .map_err(|e| ClientError::resolution(*address, e))
    }

    /// Fail with `MissingCollateral` unless `holder` holds `nft_mint`.
    pub(crate) async fn require_item(
        &self,
        account: &Pubkey,
        nft_mint: &Pubkey,
        holder: &Pubkey,
    ) -> ClientResult<()> {
        if self.checked_balance(account).await? == 0 {
            return Err(ClientError::MissingCollateral {
                nft_mint: *nft_mint,
                expected_holder: *holder,
            });
        }
        Ok(())
    }
}
