//! Bucket creation, deposits and redemptions.

use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solvent_interface::CollectionInfo;
use solvent_interface::instructions::{
    self, CreateBucketAccounts, CreateBucketArgs, DepositNftAccounts, DepositNftArgs,
    RedeemNftAccounts, RedeemNftArgs,
};
use solvent_interface::state::BucketState;
use tracing::{debug, info};

use super::{DepositOptions, HoldingAccounts, ProofSource, RedeemOptions, resolve_proof};
use crate::accessor::SwapSession;
use crate::client::SolventClient;
use crate::error::{ClientError, ClientResult};
use crate::ledger::Ledger;
use crate::pda::{find_bucket, find_deposit, find_metadata, find_swap};
use crate::token::{associated_token_address, creation_instructions};

impl<L: Ledger, S: Signer> SolventClient<L, S> {
    // ------------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------------

    /// Instructions creating a bucket around a fresh `droplet_mint`.
    ///
    /// # Errors
    /// Returns address derivation errors.
    pub fn build_create_bucket(
        &self,
        droplet_mint: &Pubkey,
        collection_info: CollectionInfo,
    ) -> ClientResult<Vec<Instruction>> {
        let config = self.config();
        let accounts = CreateBucketAccounts {
            signer: self.payer_pubkey(),
            droplet_mint: *droplet_mint,
            bucket_state: find_bucket(droplet_mint, config)?.0,
            solvent_authority: self.authority()?,
        };
        let args = CreateBucketArgs { collection_info };
        Ok(vec![instructions::create_bucket(&config.program_id, &accounts, &args)])
    }

    /// Create a bucket. Returns the new droplet mint and the signature.
    ///
    /// # Errors
    /// Returns submission errors.
    pub async fn create_bucket(&self, collection_info: CollectionInfo) -> ClientResult<(Pubkey, Signature)> {
        let droplet_mint = Keypair::new();
        let instructions = self.build_create_bucket(&droplet_mint.pubkey(), collection_info)?;
        let signature = self.send(&instructions, &[&droplet_mint as &dyn Signer]).await?;
        info!(droplet_mint = %droplet_mint.pubkey(), %signature, "bucket created");
        Ok((droplet_mint.pubkey(), signature))
    }

    // ------------------------------------------------------------------------
    // Deposit
    // ------------------------------------------------------------------------

    /// Deposit leg: the signer's droplet account creation when missing,
    /// followed by `deposit_nft`.
    ///
    /// No balance or swap-flag checks happen here.
    pub(crate) async fn compose_deposit(
        &self,
        bucket: &BucketState,
        nft_mint: &Pubkey,
        swap: bool,
        proof: &ProofSource,
        holding: &HoldingAccounts,
    ) -> ClientResult<Vec<Instruction>> {
        let config = self.config();
        let signer = self.payer_pubkey();
        let droplet_mint = bucket.droplet_mint;
        let authority = self.authority()?;
        let whitelist_proof = resolve_proof(bucket, nft_mint, proof)?;

        let custody = associated_token_address(&authority, nft_mint, true)?;
        let destination = self
            .holding_account(holding.droplet, &signer, &droplet_mint, false)
            .await?;
        let signer_nft = match holding.nft {
            Some(address) => address,
            None => associated_token_address(&signer, nft_mint, false)?,
        };

        let accounts = DepositNftAccounts {
            signer,
            droplet_mint,
            bucket_state: find_bucket(&droplet_mint, config)?.0,
            deposit_state: find_deposit(&droplet_mint, nft_mint, config)?.0,
            swap_state: find_swap(&droplet_mint, &signer, config)?.0,
            solvent_authority: authority,
            nft_mint: *nft_mint,
            nft_metadata: find_metadata(nft_mint, config)?.0,
            signer_nft_token_account: signer_nft,
            solvent_nft_token_account: custody,
            destination_droplet_token_account: destination.address,
        };
        let args = DepositNftArgs {
            swap,
            whitelist_proof,
        };

        let mut ixs = creation_instructions([&destination]);
        ixs.push(instructions::deposit_nft(&config.program_id, &accounts, &args));
        debug!(%droplet_mint, %nft_mint, swap, instructions = ixs.len(), "composed deposit");
        Ok(ixs)
    }

    /// Instructions depositing `nft_mint` into the bucket of `droplet_mint`.
    ///
    /// # Errors
    /// Returns [`ClientError::MissingCollateral`] when the signer does not
    /// hold the item, [`ClientError::DuplicateSwapLeg`] for a swap deposit
    /// while a swap is in progress, and proof errors from
    /// [`resolve_proof`].
    pub async fn build_deposit_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        options: &DepositOptions,
    ) -> ClientResult<Vec<Instruction>> {
        let signer = self.payer_pubkey();
        let bucket = self.get_bucket(droplet_mint).await?;

        if options.swap
            && self.get_swap_session(droplet_mint, &signer).await?
                == SwapSession::DepositedAwaitingRedeem
        {
            return Err(ClientError::DuplicateSwapLeg {
                droplet_mint: *droplet_mint,
                signer,
            });
        }

        let source = match options.holding.nft {
            Some(address) => address,
            None => associated_token_address(&signer, nft_mint, false)?,
        };
        self.require_item(&source, nft_mint, &signer).await?;

        self.compose_deposit(&bucket, nft_mint, options.swap, &options.proof, &options.holding)
            .await
    }

    /// Deposit `nft_mint` for droplets.
    ///
    /// # Errors
    /// See [`SolventClient::build_deposit_nft`] and [`SolventClient::send`].
    pub async fn deposit_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        options: &DepositOptions,
    ) -> ClientResult<Signature> {
        let instructions = self.build_deposit_nft(droplet_mint, nft_mint, options).await?;
        self.send(&instructions, &[]).await
    }

    // ------------------------------------------------------------------------
    // Redeem
    // ------------------------------------------------------------------------

    /// Redeem leg: the destination item account creation when missing,
    /// followed by `redeem_nft`.
    ///
    /// No balance or swap-flag checks happen here.
    pub(crate) async fn compose_redeem(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        swap: bool,
        holding: &HoldingAccounts,
    ) -> ClientResult<Vec<Instruction>> {
        let config = self.config();
        let signer = self.payer_pubkey();
        let authority = self.authority()?;
        let treasury = config.core_treasury;

        let destination = self.holding_account(holding.nft, &signer, nft_mint, false).await?;
        let treasury_droplets = associated_token_address(&treasury, droplet_mint, true)?;
        let signer_droplets = match holding.droplet {
            Some(address) => address,
            None => associated_token_address(&signer, droplet_mint, false)?,
        };

        let accounts = RedeemNftAccounts {
            signer,
            droplet_mint: *droplet_mint,
            bucket_state: find_bucket(droplet_mint, config)?.0,
            deposit_state: find_deposit(droplet_mint, nft_mint, config)?.0,
            swap_state: find_swap(droplet_mint, &signer, config)?.0,
            solvent_authority: authority,
            nft_mint: *nft_mint,
            solvent_nft_token_account: associated_token_address(&authority, nft_mint, true)?,
            destination_nft_token_account: destination.address,
            signer_droplet_token_account: signer_droplets,
            solvent_treasury: treasury,
            solvent_treasury_droplet_token_account: treasury_droplets,
        };

        let mut ixs = creation_instructions([&destination]);
        ixs.push(instructions::redeem_nft(
            &config.program_id,
            &accounts,
            &RedeemNftArgs { swap },
        ));
        debug!(%droplet_mint, %nft_mint, swap, instructions = ixs.len(), "composed redeem");
        Ok(ixs)
    }

    /// Instructions redeeming `nft_mint` from the bucket of `droplet_mint`.
    ///
    /// # Errors
    /// Returns [`ClientError::MissingCollateral`] when the item is not in
    /// custody and [`ClientError::StaleSwapState`] for a swap redemption
    /// without a swap in progress.
    pub async fn build_redeem_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        options: &RedeemOptions,
    ) -> ClientResult<Vec<Instruction>> {
        let signer = self.payer_pubkey();
        // Bucket must exist
        self.get_bucket(droplet_mint).await?;

        if options.swap
            && self.get_swap_session(droplet_mint, &signer).await? == SwapSession::Idle
        {
            return Err(ClientError::StaleSwapState {
                droplet_mint: *droplet_mint,
                signer,
                reason: "swap redemption requested without a deposited swap leg",
            });
        }

        let authority = self.authority()?;
        let custody = associated_token_address(&authority, nft_mint, true)?;
        self.require_item(&custody, nft_mint, &authority).await?;

        self.compose_redeem(droplet_mint, nft_mint, options.swap, &options.holding)
            .await
    }

    /// Redeem `nft_mint` by burning droplets.
    ///
    /// # Errors
    /// See [`SolventClient::build_redeem_nft`] and [`SolventClient::send`].
    pub async fn redeem_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        options: &RedeemOptions,
    ) -> ClientResult<Signature> {
        let instructions = self.build_redeem_nft(droplet_mint, nft_mint, options).await?;
        self.send(&instructions, &[]).await
    }
}
