//! Staking bucket items into the external farm.

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solvent_interface::StakingParams;
use solvent_interface::instructions::{
    self, FarmAccountMetas, StakeNftAccounts, UnstakeNftAccounts,
};

use crate::client::SolventClient;
use crate::error::{ClientError, ClientResult, Feature};
use crate::ledger::Ledger;
use crate::pda::{find_bucket, find_farmer_authority};
use crate::token::associated_token_address;

/// Farm accounts the bucket state does not record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FarmAccounts {
    /// Farm's gem bank
    pub bank: Pubkey,
    /// Reward A mint
    pub reward_a_mint: Pubkey,
    /// Reward B mint
    pub reward_b_mint: Pubkey,
}

impl<L: Ledger, S: Signer> SolventClient<L, S> {
    /// Staking parameters of a bucket with staking enabled.
    async fn staking_target(&self, droplet_mint: &Pubkey) -> ClientResult<StakingParams> {
        let bucket = self.get_bucket(droplet_mint).await?;
        match bucket.staking_params {
            Some(params) if bucket.is_staking_enabled => Ok(params),
            _ => Err(ClientError::FeatureDisabled {
                droplet_mint: *droplet_mint,
                feature: Feature::Staking,
            }),
        }
    }

    /// Instructions staking a bucket item into the farm.
    ///
    /// # Errors
    /// Returns [`ClientError::FeatureDisabled`] when staking is off or not
    /// configured and [`ClientError::MissingCollateral`] when the item is not
    /// in custody.
    pub async fn build_stake_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        farm: &FarmAccounts,
    ) -> ClientResult<Vec<Instruction>> {
        let config = self.config();
        let authority = self.authority()?;
        let params = self.staking_target(droplet_mint).await?;

        let custody = associated_token_address(&authority, nft_mint, true)?;
        self.require_item(&custody, nft_mint, &authority).await?;

        let (farmer_authority, _) = find_farmer_authority(nft_mint, config)?;
        let farmer_nft = associated_token_address(&farmer_authority, nft_mint, true)?;

        let accounts = StakeNftAccounts {
            signer: self.payer_pubkey(),
            droplet_mint: *droplet_mint,
            bucket_state: find_bucket(droplet_mint, config)?.0,
            solvent_authority: authority,
            farmer_authority,
            nft_mint: *nft_mint,
            solvent_nft_token_account: custody,
            farmer_nft_token_account: farmer_nft,
            farm: farm_metas(&params, farm),
        };

        Ok(vec![instructions::stake_nft(&config.program_id, &accounts)])
    }

    /// Stake a bucket item.
    ///
    /// # Errors
    /// See [`SolventClient::build_stake_nft`] and [`SolventClient::send`].
    pub async fn stake_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        farm: &FarmAccounts,
    ) -> ClientResult<Signature> {
        let instructions = self.build_stake_nft(droplet_mint, nft_mint, farm).await?;
        self.send(&instructions, &[]).await
    }

    /// Instructions unstaking a bucket item, collecting farm rewards into the
    /// farmer authority's reward accounts.
    ///
    /// # Errors
    /// Returns [`ClientError::FeatureDisabled`] when staking is off or not
    /// configured.
    pub async fn build_unstake_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        farm: &FarmAccounts,
    ) -> ClientResult<Vec<Instruction>> {
        let config = self.config();
        let authority = self.authority()?;
        let params = self.staking_target(droplet_mint).await?;

        let (farmer_authority, _) = find_farmer_authority(nft_mint, config)?;
        let reward_a = associated_token_address(&farmer_authority, &farm.reward_a_mint, true)?;
        let reward_b = associated_token_address(&farmer_authority, &farm.reward_b_mint, true)?;
        let custody = associated_token_address(&authority, nft_mint, true)?;

        let accounts = UnstakeNftAccounts {
            signer: self.payer_pubkey(),
            droplet_mint: *droplet_mint,
            bucket_state: find_bucket(droplet_mint, config)?.0,
            solvent_authority: authority,
            farmer_authority,
            nft_mint: *nft_mint,
            solvent_nft_token_account: custody,
            farm: farm_metas(&params, farm),
            reward_a_mint: farm.reward_a_mint,
            reward_b_mint: farm.reward_b_mint,
            farmer_reward_a_token_account: reward_a,
            farmer_reward_b_token_account: reward_b,
        };

        Ok(vec![instructions::unstake_nft(&config.program_id, &accounts)])
    }

    /// Unstake a bucket item.
    ///
    /// # Errors
    /// See [`SolventClient::build_unstake_nft`] and [`SolventClient::send`].
    pub async fn unstake_nft(
        &self,
        droplet_mint: &Pubkey,
        nft_mint: &Pubkey,
        farm: &FarmAccounts,
    ) -> ClientResult<Signature> {
        let instructions = self.build_unstake_nft(droplet_mint, nft_mint, farm).await?;
        self.send(&instructions, &[]).await
    }
}

fn farm_metas(params: &StakingParams, farm: &FarmAccounts) -> FarmAccountMetas {
    FarmAccountMetas {
        gembank_program: params.gembank_program,
        gemfarm_program: params.gemfarm_program,
        gemworks_bank: farm.bank,
        gemworks_farm: params.gemworks_farm,
        gemworks_fee_account: params.gemworks_fee_account,
    }
}
