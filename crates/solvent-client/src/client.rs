//! The Solvent client: a ledger, a payer and a configuration.
//!
//! Operation entry points live in [`crate::actions`]; this module holds the
//! shared plumbing (signing, submission, fresh state reads).

use std::time::{SystemTime, UNIX_EPOCH};

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_transaction::Transaction;
use solvent_interface::state::{BucketState, DepositState, LockerState, SwapState};
use tracing::{debug, info};

use crate::accessor::{self, SwapSession};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::ledger::Ledger;
use crate::loan::{self, LoanTerms};
use crate::packing::{pack_ordered, transaction_size};
use crate::pda::find_authority;
use crate::token::associated_token_address;

/// Client for one payer against one ledger.
pub struct SolventClient<L: Ledger, S: Signer> {
    ledger: L,
    payer: S,
    config: ClientConfig,
}

impl<L: Ledger, S: Signer> SolventClient<L, S> {
    /// Client with the default configuration.
    pub fn new(ledger: L, payer: S) -> Self {
        Self::with_config(ledger, payer, ClientConfig::default())
    }

    /// Client with an explicit configuration.
    pub fn with_config(ledger: L, payer: S, config: ClientConfig) -> Self {
        Self {
            ledger,
            payer,
            config,
        }
    }

    /// Underlying ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Payer and default signer.
    pub fn payer(&self) -> &S {
        &self.payer
    }

    /// Payer address.
    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Pool authority of the configured program.
    ///
    /// # Errors
    /// See [`crate::pda::SolventPda::find`].
    pub fn authority(&self) -> ClientResult<Pubkey> {
        find_authority(&self.config).map(|(address, _)| address)
    }

    /// Custody account holding `nft_mint` for the pool.
    ///
    /// # Errors
    /// See [`crate::pda::SolventPda::find`].
    pub fn custody_account(&self, nft_mint: &Pubkey) -> ClientResult<Pubkey> {
        associated_token_address(&self.authority()?, nft_mint, true)
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Sign with the payer (plus `extra_signers`) and submit one transaction.
    ///
    /// Returns once the ledger has confirmed it.
    ///
    /// # Errors
    /// Returns [`crate::ClientError::SigningFailure`] when a signer fails and
    /// the mapped ledger error when submission fails.
    pub async fn send(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&dyn Signer],
    ) -> ClientResult<Signature> {
        let payer = self.payer.pubkey();
        let blockhash = self.ledger.latest_blockhash().await?;

        let mut signers: Vec<&dyn Signer> = vec![&self.payer as &dyn Signer];
        signers.extend_from_slice(extra_signers);

        let mut tx = Transaction::new_with_payer(instructions, Some(&payer));
        tx.try_sign(&signers, blockhash)?;
        debug!(
            instructions = instructions.len(),
            size = transaction_size(instructions, &payer),
            "submitting transaction"
        );

        let signature = self.ledger.send_and_confirm_transaction(&tx).await?;
        info!(%signature, instructions = instructions.len(), "transaction confirmed");
        Ok(signature)
    }

    /// Pack groups and submit the resulting transactions strictly in order.
    ///
    /// Each transaction is only sent after the previous one confirmed. A
    /// failure stops the sequence and nothing later is sent.
    ///
    /// # Errors
    /// Returns [`crate::ClientError::TransactionTooLarge`] when a group does
    /// not fit, or the first submission failure.
    pub async fn send_groups(
        &self,
        groups: Vec<Vec<Instruction>>,
        extra_signers: &[&dyn Signer],
    ) -> ClientResult<Vec<Signature>> {
        let payer = self.payer.pubkey();
        let packed = pack_ordered(groups, &payer, self.config.max_transaction_size)?;
        debug!(transactions = packed.len(), "packed instruction groups");

        let mut signatures = Vec::with_capacity(packed.len());
        for instructions in &packed {
            // Only sign with extra signers the transaction actually needs
            let needed: Vec<&dyn Signer> = extra_signers
                .iter()
                .copied()
                .filter(|signer| {
                    let key = signer.pubkey();
                    instructions
                        .iter()
                        .flat_map(|ix| &ix.accounts)
                        .any(|meta| meta.is_signer && meta.pubkey == key)
                })
                .collect();
            signatures.push(self.send(instructions, &needed).await?);
        }
        Ok(signatures)
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// Bucket state of `droplet_mint`.
    ///
    /// # Errors
    /// See [`accessor::get_bucket`].
    pub async fn get_bucket(&self, droplet_mint: &Pubkey) -> ClientResult<BucketState> {
        accessor::get_bucket(&self.ledger, &self.config, droplet_mint).await
    }

    /// Every bucket.
    ///
    /// # Errors
    /// See [`accessor::get_all_buckets`].
    pub async fn get_all_buckets(&self) -> ClientResult<Vec<(Pubkey, BucketState)>> {
        accessor::get_all_buckets(&self.ledger, &self.config).await
    }

    /// Deposit state of an item.
    ///
    /// # Errors
    /// See [`accessor::get_deposit`].
    pub async fn get_deposit(&self, droplet_mint: &Pubkey, nft_mint: &Pubkey) -> ClientResult<DepositState> {
        accessor::get_deposit(&self.ledger, &self.config, droplet_mint, nft_mint).await
    }

    /// Every deposit, optionally of one bucket.
    ///
    /// # Errors
    /// See [`accessor::get_all_deposits`].
    pub async fn get_all_deposits(
        &self,
        droplet_mint: Option<&Pubkey>,
    ) -> ClientResult<Vec<(Pubkey, DepositState)>> {
        accessor::get_all_deposits(&self.ledger, &self.config, droplet_mint).await
    }

    /// Locker state of an item.
    ///
    /// # Errors
    /// See [`accessor::get_locker`].
    pub async fn get_locker(&self, droplet_mint: &Pubkey, nft_mint: &Pubkey) -> ClientResult<LockerState> {
        accessor::get_locker(&self.ledger, &self.config, droplet_mint, nft_mint).await
    }

    /// Every locker, optionally of one bucket.
    ///
    /// # Errors
    /// See [`accessor::get_all_lockers`].
    pub async fn get_all_lockers(
        &self,
        droplet_mint: Option<&Pubkey>,
    ) -> ClientResult<Vec<(Pubkey, LockerState)>> {
        accessor::get_all_lockers(&self.ledger, &self.config, droplet_mint).await
    }

    /// Swap state of a party.
    ///
    /// # Errors
    /// See [`accessor::get_swap`].
    pub async fn get_swap(&self, droplet_mint: &Pubkey, signer: &Pubkey) -> ClientResult<Option<SwapState>> {
        accessor::get_swap(&self.ledger, &self.config, droplet_mint, signer).await
    }

    /// Every swap state, optionally of one bucket and/or party.
    ///
    /// # Errors
    /// See [`accessor::get_all_swaps`].
    pub async fn get_all_swaps(
        &self,
        droplet_mint: Option<&Pubkey>,
        signer: Option<&Pubkey>,
    ) -> ClientResult<Vec<(Pubkey, SwapState)>> {
        accessor::get_all_swaps(&self.ledger, &self.config, droplet_mint, signer).await
    }

    /// Current swap session of a party.
    ///
    /// # Errors
    /// See [`accessor::get_swap_session`].
    pub async fn get_swap_session(&self, droplet_mint: &Pubkey, signer: &Pubkey) -> ClientResult<SwapSession> {
        accessor::get_swap_session(&self.ledger, &self.config, droplet_mint, signer).await
    }

    /// Token balance of `owner` for `mint`, zero when the account is missing.
    ///
    /// # Errors
    /// Returns [`crate::ClientError::InvalidSeed`] for an off-curve owner and
    /// transport errors from the ledger.
    pub async fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> ClientResult<u64> {
        let address = associated_token_address(owner, mint, true)?;
        Ok(self.ledger.get_token_account_balance(&address).await?.unwrap_or(0))
    }

    // ------------------------------------------------------------------------
    // Loan economics
    // ------------------------------------------------------------------------

    /// Loan terms for locking an item in `droplet_mint` for `duration` seconds.
    ///
    /// # Errors
    /// See [`loan::calculate_loan`] and [`accessor::get_bucket`].
    pub async fn calculate_loan(&self, droplet_mint: &Pubkey, duration: u64) -> ClientResult<LoanTerms> {
        let bucket = self.get_bucket(droplet_mint).await?;
        loan::calculate_loan(&bucket, duration, self.config.droplet_unit)
    }

    /// Estimated amount owed to unlock an item now.
    ///
    /// Advisory only, see [`loan::estimate_repayment`].
    ///
    /// # Errors
    /// See [`accessor::get_locker`].
    pub async fn calculate_repayment(&self, droplet_mint: &Pubkey, nft_mint: &Pubkey) -> ClientResult<u64> {
        let locker = self.get_locker(droplet_mint, nft_mint).await?;
        Ok(loan::estimate_repayment(&locker, unix_now()))
    }
}

/// Wall-clock unix time in seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|elapsed| i64::try_from(elapsed.as_secs()).ok())
        .unwrap_or(0)
}
