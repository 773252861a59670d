//! Protocol admin operations.
//!
//! These only need addresses, so the `build_*` forms do no reads. The program
//! checks the signer is the protocol admin.

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solvent_interface::StakingParams;
use solvent_interface::instructions::{
    self, BucketAdminAccounts, ClaimBalanceAccounts, UpdateLockingParamsArgs,
};
use tracing::info;

use crate::client::SolventClient;
use crate::error::ClientResult;
use crate::ledger::Ledger;
use crate::pda::find_bucket;

impl<L: Ledger, S: Signer> SolventClient<L, S> {
    fn admin_accounts(&self, droplet_mint: &Pubkey) -> ClientResult<BucketAdminAccounts> {
        Ok(BucketAdminAccounts {
            signer: self.payer_pubkey(),
            bucket_state: find_bucket(droplet_mint, self.config())?.0,
            droplet_mint: *droplet_mint,
        })
    }

    /// `set_locking_enabled` instruction.
    ///
    /// # Errors
    /// Returns address derivation errors.
    pub fn build_set_locking_enabled(&self, droplet_mint: &Pubkey, enable: bool) -> ClientResult<Instruction> {
        let accounts = self.admin_accounts(droplet_mint)?;
        Ok(instructions::set_locking_enabled(&self.config().program_id, &accounts, enable))
    }

    /// Toggle lockers on a bucket.
    ///
    /// # Errors
    /// Returns submission errors.
    pub async fn set_locking_enabled(&self, droplet_mint: &Pubkey, enable: bool) -> ClientResult<Signature> {
        let ix = self.build_set_locking_enabled(droplet_mint, enable)?;
        let signature = self.send(&[ix], &[]).await?;
        info!(%droplet_mint, enable, %signature, "locking toggled");
        Ok(signature)
    }

    /// `update_locking_params` instruction. `None` fields stay unchanged.
    ///
    /// # Errors
    /// Returns address derivation errors.
    pub fn build_update_locking_params(
        &self,
        droplet_mint: &Pubkey,
        max_locker_duration: Option<u64>,
        interest_scaler: Option<u8>,
    ) -> ClientResult<Instruction> {
        let accounts = self.admin_accounts(droplet_mint)?;
        let args = UpdateLockingParamsArgs {
            max_locker_duration,
            interest_scaler,
        };
        Ok(instructions::update_locking_params(&self.config().program_id, &accounts, &args))
    }

    /// Update a bucket's max locker duration and/or interest scaler.
    ///
    /// # Errors
    /// Returns submission errors.
    pub async fn update_locking_params(
        &self,
        droplet_mint: &Pubkey,
        max_locker_duration: Option<u64>,
        interest_scaler: Option<u8>,
    ) -> ClientResult<Signature> {
        let ix = self.build_update_locking_params(droplet_mint, max_locker_duration, interest_scaler)?;
        self.send(&[ix], &[]).await
    }

    /// `set_staking_enabled` instruction.
    ///
    /// # Errors
    /// Returns address derivation errors.
    pub fn build_set_staking_enabled(&self, droplet_mint: &Pubkey, enable: bool) -> ClientResult<Instruction> {
        let accounts = self.admin_accounts(droplet_mint)?;
        Ok(instructions::set_staking_enabled(&self.config().program_id, &accounts, enable))
    }

    /// Toggle auto-staking on a bucket.
    ///
    /// # Errors
    /// Returns submission errors.
    pub async fn set_staking_enabled(&self, droplet_mint: &Pubkey, enable: bool) -> ClientResult<Signature> {
        let ix = self.build_set_staking_enabled(droplet_mint, enable)?;
        let signature = self.send(&[ix], &[]).await?;
        info!(%droplet_mint, enable, %signature, "staking toggled");
        Ok(signature)
    }

    /// `update_staking_params` instruction.
    ///
    /// # Errors
    /// Returns address derivation errors.
    pub fn build_update_staking_params(
        &self,
        droplet_mint: &Pubkey,
        params: &StakingParams,
    ) -> ClientResult<Instruction> {
        let accounts = self.admin_accounts(droplet_mint)?;
        Ok(instructions::update_staking_params(&self.config().program_id, &accounts, params))
    }

    /// Point a bucket at a farm.
    ///
    /// # Errors
    /// Returns submission errors.
    pub async fn update_staking_params(
        &self,
        droplet_mint: &Pubkey,
        params: &StakingParams,
    ) -> ClientResult<Signature> {
        let ix = self.build_update_staking_params(droplet_mint, params)?;
        self.send(&[ix], &[]).await
    }

    /// `claim_balance` instruction.
    ///
    /// # Errors
    /// Returns address derivation errors.
    pub fn build_claim_balance(&self) -> ClientResult<Instruction> {
        let accounts = ClaimBalanceAccounts {
            signer: self.payer_pubkey(),
            solvent_authority: self.authority()?,
            solvent_treasury: self.config().core_treasury,
        };
        Ok(instructions::claim_balance(&self.config().program_id, &accounts))
    }

    /// Sweep the pool authority's lamports into the core treasury.
    ///
    /// # Errors
    /// Returns submission errors.
    pub async fn claim_balance(&self) -> ClientResult<Signature> {
        let ix = self.build_claim_balance()?;
        self.send(&[ix], &[]).await
    }
}
