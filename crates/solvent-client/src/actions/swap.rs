//! Swapping one item for another within a bucket.
//!
//! A swap is a deposit leg (which sets the party's swap flag) followed by a
//! redeem leg (which clears it). The flag is read fresh on every call and
//! cross-checked against balances, so calling `swap_nfts` again after a
//! partial failure resumes the session instead of depositing twice.

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use tracing::{debug, info, warn};

use super::SwapOptions;
use crate::accessor::SwapSession;
use crate::client::SolventClient;
use crate::error::{ClientError, ClientResult};
use crate::ledger::Ledger;
use crate::token::associated_token_address;

/// Composed swap, ready to pack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapPlan {
    /// Session observed while composing
    pub session: SwapSession,
    /// Deposit leg, `None` when resuming an already deposited session
    pub deposit_leg: Option<Vec<Instruction>>,
    /// Redeem leg
    pub redeem_leg: Vec<Instruction>,
}

impl SwapPlan {
    /// Instruction groups in submission order.
    pub fn into_groups(self) -> Vec<Vec<Instruction>> {
        self.deposit_leg
            .into_iter()
            .chain(std::iter::once(self.redeem_leg))
            .collect()
    }
}

impl<L: Ledger, S: Signer> SolventClient<L, S> {
    /// Compose a swap of `deposit_nft` for `redeem_nft`.
    ///
    /// `deposit_nft` may be `None` only when resuming a session whose deposit
    /// leg already landed.
    ///
    /// # Errors
    /// Returns [`ClientError::DuplicateSwapLeg`] when both legs name the same
    /// item, [`ClientError::StaleSwapState`] when the swap flag and the
    /// balances disagree, [`ClientError::MissingCollateral`] when an item is
    /// not where the swap needs it, and proof errors for whitelisted buckets.
    pub async fn build_swap(
        &self,
        droplet_mint: &Pubkey,
        deposit_nft: Option<&Pubkey>,
        redeem_nft: &Pubkey,
        options: &SwapOptions,
    ) -> ClientResult<SwapPlan> {
        let signer = self.payer_pubkey();
        if deposit_nft == Some(redeem_nft) {
            return Err(ClientError::DuplicateSwapLeg {
                droplet_mint: *droplet_mint,
                signer,
            });
        }
        let authority = self.authority()?;
        let bucket = self.get_bucket(droplet_mint).await?;
        let session = self.get_swap_session(droplet_mint, &signer).await?;
        let stale = |reason| ClientError::StaleSwapState {
            droplet_mint: *droplet_mint,
            signer,
            reason,
        };

        let deposit_leg = match (session, deposit_nft) {
            (SwapSession::Idle, None) => {
                return Err(stale("no swap in progress and no item to deposit"));
            }
            (SwapSession::Idle, Some(nft_mint)) => {
                let source = match options.holding.nft {
                    Some(address) => address,
                    None => associated_token_address(&signer, nft_mint, false)?,
                };
                let custody = associated_token_address(&authority, nft_mint, true)?;
                let held_by_signer = self.checked_balance(&source).await? > 0;
                let in_custody = self.checked_balance(&custody).await? > 0;

                match (held_by_signer, in_custody) {
                    (true, _) => {}
                    (false, true) => {
                        return Err(stale("deposit item already in custody while no swap is in progress"));
                    }
                    (false, false) => {
                        return Err(ClientError::MissingCollateral {
                            nft_mint: *nft_mint,
                            expected_holder: signer,
                        });
                    }
                }

                Some(
                    self.compose_deposit(&bucket, nft_mint, true, &options.proof, &options.holding)
                        .await?,
                )
            }
            (SwapSession::DepositedAwaitingRedeem, deposit_nft) => {
                if let Some(nft_mint) = deposit_nft {
                    let source = match options.holding.nft {
                        Some(address) => address,
                        None => associated_token_address(&signer, nft_mint, false)?,
                    };
                    if self.checked_balance(&source).await? > 0 {
                        return Err(stale("swap flag set but the deposit item is still with the signer"));
                    }
                }
                warn!(%droplet_mint, %signer, "swap already deposited, resuming with the redeem leg");
                None
            }
        };

        let custody = associated_token_address(&authority, redeem_nft, true)?;
        self.require_item(&custody, redeem_nft, &authority).await?;

        let redeem_holding = super::HoldingAccounts {
            nft: options.redeem_destination,
            droplet: options.holding.droplet,
        };
        let redeem_leg = self
            .compose_redeem(droplet_mint, redeem_nft, true, &redeem_holding)
            .await?;

        debug!(?session, deposit = deposit_leg.is_some(), "composed swap");
        Ok(SwapPlan {
            session,
            deposit_leg,
            redeem_leg,
        })
    }

    /// Swap `deposit_nft` for `redeem_nft`, resuming an interrupted session.
    ///
    /// Both legs go in one transaction when they fit, otherwise in two
    /// transactions sent strictly in order, the redeem leg only after the
    /// deposit leg confirmed. Returns every signature in order.
    ///
    /// # Errors
    /// See [`SolventClient::build_swap`] and [`SolventClient::send_groups`].
    pub async fn swap_nfts(
        &self,
        droplet_mint: &Pubkey,
        deposit_nft: Option<&Pubkey>,
        redeem_nft: &Pubkey,
        options: &SwapOptions,
    ) -> ClientResult<Vec<Signature>> {
        let plan = self
            .build_swap(droplet_mint, deposit_nft, redeem_nft, options)
            .await?;
        let signatures = self.send_groups(plan.into_groups(), &[]).await?;
        info!(%droplet_mint, %redeem_nft, transactions = signatures.len(), "swap complete");
        Ok(signatures)
    }
}
