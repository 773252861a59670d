//! Lockers: lock for a loan, repay, liquidate.

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solvent_interface::instructions::{
    self, LiquidateLockerAccounts, LockNftAccounts, LockNftArgs, UnlockNftAccounts,
};
use tracing::{debug, warn};

use super::{ItemOptions, LockOptions, resolve_proof};
use crate::client::{SolventClient, unix_now};
use crate::error::{ClientError, ClientResult, Feature};
use crate::ledger::Ledger;
use crate::loan::{calculate_loan, estimate_repayment};
use crate::pda::{find_bucket, find_deposit, find_locker, find_metadata};
use crate::token::{associated_token_address, creation_instructions};

impl<L: Ledger, S: Signer> SolventClient<L, S> {
    /// Instructions locking `nft_mint` for `duration` seconds.
    ///
    /// # Errors
    /// Returns [`ClientError::FeatureDisabled`] when locking is off,
    /// [`ClientError::LockDurationOutOfBounds`] for a duration over the bucket
    /// maximum and [`ClientError::MissingCollateral`] when the signer does not
    /// hold the item.
    pub async fn build_lock_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        duration: u64,
        options: &LockOptions,
    ) -> ClientResult<Vec<Instruction>> {
        let config = self.config();
        let signer = self.payer_pubkey();
        let authority = self.authority()?;
        let bucket = self.get_bucket(droplet_mint).await?;

        if !bucket.is_locking_enabled {
            return Err(ClientError::FeatureDisabled {
                droplet_mint: *droplet_mint,
                feature: Feature::Locking,
            });
        }
        let terms = calculate_loan(&bucket, duration, config.droplet_unit)?;
        debug!(
            %nft_mint,
            duration,
            principal = terms.principal,
            max_interest = terms.max_interest,
            "expected loan terms"
        );

        let signer_nft = match options.holding.nft {
            Some(address) => address,
            None => associated_token_address(&signer, nft_mint, false)?,
        };
        self.require_item(&signer_nft, nft_mint, &signer).await?;

        let whitelist_proof = resolve_proof(&bucket, nft_mint, &options.proof)?;
        let custody = associated_token_address(&authority, nft_mint, true)?;
        let destination = self
            .holding_account(options.holding.droplet, &signer, droplet_mint, false)
            .await?;

        let accounts = LockNftAccounts {
            signer,
            droplet_mint: *droplet_mint,
            bucket_state: find_bucket(droplet_mint, config)?.0,
            locker_state: find_locker(droplet_mint, nft_mint, config)?.0,
            solvent_authority: authority,
            nft_mint: *nft_mint,
            nft_metadata: find_metadata(nft_mint, config)?.0,
            signer_nft_token_account: signer_nft,
            solvent_nft_token_account: custody,
            destination_droplet_token_account: destination.address,
        };
        let args = LockNftArgs {
            duration,
            whitelist_proof,
        };

        let mut ixs = creation_instructions([&destination]);
        ixs.push(instructions::lock_nft(&config.program_id, &accounts, &args));
        Ok(ixs)
    }

    /// Lock `nft_mint` for a droplet loan.
    ///
    /// # Errors
    /// See [`SolventClient::build_lock_nft`] and [`SolventClient::send`].
    pub async fn lock_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        duration: u64,
        options: &LockOptions,
    ) -> ClientResult<Signature> {
        let instructions = self
            .build_lock_nft(droplet_mint, nft_mint, duration, options)
            .await?;
        self.send(&instructions, &[]).await
    }

    /// Instructions repaying the loan on `nft_mint` and taking it back.
    ///
    /// # Errors
    /// Returns [`ClientError::AccountNotFound`] when the item is not locked,
    /// [`ClientError::LockerExpired`] after expiry and
    /// [`ClientError::MissingCollateral`] when it is not in custody.
    pub async fn build_unlock_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        options: &ItemOptions,
    ) -> ClientResult<Vec<Instruction>> {
        let config = self.config();
        let signer = self.payer_pubkey();
        let authority = self.authority()?;
        let treasury = config.lockers_treasury;

        let locker = self.get_locker(droplet_mint, nft_mint).await?;
        let now = unix_now();
        let expiry = locker.expiry_timestamp();
        if now > expiry {
            return Err(ClientError::LockerExpired {
                nft_mint: *nft_mint,
                expiry,
                now,
            });
        }

        let custody = associated_token_address(&authority, nft_mint, true)?;
        self.require_item(&custody, nft_mint, &authority).await?;

        let signer_droplets = match options.holding.droplet {
            Some(address) => address,
            None => associated_token_address(&signer, droplet_mint, false)?,
        };
        let owed = estimate_repayment(&locker, now);
        let balance = self.checked_balance(&signer_droplets).await?;
        if balance < owed {
            warn!(%nft_mint, owed, balance, "droplet balance below estimated repayment");
        }

        let destination = self
            .holding_account(options.holding.nft, &signer, nft_mint, false)
            .await?;
        let treasury_droplets = associated_token_address(&treasury, droplet_mint, true)?;

        let accounts = UnlockNftAccounts {
            signer,
            droplet_mint: *droplet_mint,
            bucket_state: find_bucket(droplet_mint, config)?.0,
            locker_state: find_locker(droplet_mint, nft_mint, config)?.0,
            solvent_authority: authority,
            nft_mint: *nft_mint,
            signer_droplet_token_account: signer_droplets,
            solvent_nft_token_account: custody,
            destination_nft_token_account: destination.address,
            solvent_treasury: treasury,
            solvent_treasury_droplet_token_account: treasury_droplets,
        };

        let mut ixs = creation_instructions([&destination]);
        ixs.push(instructions::unlock_nft(&config.program_id, &accounts));
        Ok(ixs)
    }

    /// Repay and unlock `nft_mint`.
    ///
    /// # Errors
    /// See [`SolventClient::build_unlock_nft`] and [`SolventClient::send`].
    pub async fn unlock_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        options: &ItemOptions,
    ) -> ClientResult<Signature> {
        let instructions = self.build_unlock_nft(droplet_mint, nft_mint, options).await?;
        self.send(&instructions, &[]).await
    }

    /// Instructions liquidating the locker on `nft_mint`.
    ///
    /// The item moves into the bucket.
    ///
    /// # Errors
    /// Returns [`ClientError::AccountNotFound`] when the item is not locked,
    /// [`ClientError::LockerNotExpired`] before expiry and
    /// [`ClientError::MissingCollateral`] when it is not in custody.
    pub async fn build_liquidate_locker(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        options: &ItemOptions,
    ) -> ClientResult<Vec<Instruction>> {
        let config = self.config();
        let signer = self.payer_pubkey();
        let authority = self.authority()?;
        let treasury = config.lockers_treasury;

        let locker = self.get_locker(droplet_mint, nft_mint).await?;
        let now = unix_now();
        let expiry = locker.expiry_timestamp();
        if now <= expiry {
            return Err(ClientError::LockerNotExpired {
                nft_mint: *nft_mint,
                expiry,
                now,
            });
        }

        let custody = associated_token_address(&authority, nft_mint, true)?;
        self.require_item(&custody, nft_mint, &authority).await?;

        let treasury_droplets = associated_token_address(&treasury, droplet_mint, true)?;
        let signer_droplets = self
            .holding_account(options.holding.droplet, &signer, droplet_mint, false)
            .await?;

        let accounts = LiquidateLockerAccounts {
            signer,
            droplet_mint: *droplet_mint,
            bucket_state: find_bucket(droplet_mint, config)?.0,
            locker_state: find_locker(droplet_mint, nft_mint, config)?.0,
            deposit_state: find_deposit(droplet_mint, nft_mint, config)?.0,
            solvent_authority: authority,
            nft_mint: *nft_mint,
            solvent_nft_token_account: custody,
            solvent_treasury: treasury,
            solvent_treasury_droplet_token_account: treasury_droplets,
            signer_droplet_token_account: signer_droplets.address,
        };

        let mut ixs = creation_instructions([&signer_droplets]);
        ixs.push(instructions::liquidate_locker(&config.program_id, &accounts));
        Ok(ixs)
    }

    /// Liquidate an expired locker.
    ///
    /// # Errors
    /// See [`SolventClient::build_liquidate_locker`] and [`SolventClient::send`].
    pub async fn liquidate_locker(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        options: &ItemOptions,
    ) -> ClientResult<Signature> {
        let instructions = self
            .build_liquidate_locker(droplet_mint, nft_mint, options)
            .await?;
        self.send(&instructions, &[]).await
    }
}
