//! Instruction builders for the Solvent program.
//!
//! Instruction data layout: `[discriminator: 8 bytes, args: Borsh]`, where the
//! discriminator is derived from the snake_case instruction name (see
//! [`SolventInstruction::discriminator`]).
//!
//! Each builder takes a fully resolved accounts struct. Account order in
//! `to_account_metas` is the order the program expects; the trailing program
//! and sysvar accounts are appended by the builders.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;
use strum::IntoEnumIterator;

use crate::{
    ASSOCIATED_TOKEN_PROGRAM_ID, CollectionInfo, DISCRIMINATOR_LEN, SPL_TOKEN_PROGRAM_ID,
    SYSTEM_PROGRAM_ID, SYSVAR_RENT_ID, instruction_discriminator,
};

// ============================================================================
// Instruction Set
// ============================================================================

/// Every instruction of the Solvent program this crate can build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SolventInstruction {
    /// Create a bucket and its droplet mint
    CreateBucket,
    /// Deposit an item for droplets (optionally as a swap leg)
    DepositNft,
    /// Redeem an item by burning droplets (optionally as a swap leg)
    RedeemNft,
    /// Lock an item for a droplet loan
    LockNft,
    /// Repay a loan and take the item back
    UnlockNft,
    /// Move a defaulted locker's item into the bucket
    LiquidateLocker,
    /// Admin: toggle lockers
    SetLockingEnabled,
    /// Admin: update max duration / interest scaler
    UpdateLockingParams,
    /// Admin: toggle auto-staking
    SetStakingEnabled,
    /// Admin: update farm references
    UpdateStakingParams,
    /// Stake a bucket item into the farm
    StakeNft,
    /// Unstake a bucket item from the farm
    UnstakeNft,
    /// Sweep PDA balances into the treasury
    ClaimBalance,
}

impl SolventInstruction {
    /// snake_case instruction name.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// 8-byte instruction discriminator.
    pub fn discriminator(self) -> [u8; DISCRIMINATOR_LEN] {
        instruction_discriminator(self.name())
    }

    /// Identify an instruction from its data.
    pub fn from_data(data: &[u8]) -> Option<Self> {
        let prefix = data.get(..DISCRIMINATOR_LEN)?;
        Self::iter().find(|ix| ix.discriminator() == prefix)
    }
}

/// Build instruction data with discriminator and Borsh-serialized args.
pub fn build_instruction_data<T: BorshSerialize>(ix: SolventInstruction, args: &T) -> Vec<u8> {
    let mut data = ix.discriminator().to_vec();
    // Writing into a Vec cannot fail
    let _ = args.serialize(&mut data);
    data
}

/// Trailing accounts shared by instructions that create token accounts.
fn token_program_accounts() -> [AccountMeta; 4] {
    [
        AccountMeta::new_readonly(SPL_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(SYSVAR_RENT_ID, false),
    ]
}

// ============================================================================
// Arguments
// ============================================================================

/// Arguments of `create_bucket`.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateBucketArgs {
    /// Membership rule of the new bucket
    pub collection_info: CollectionInfo,
}

/// Arguments of `deposit_nft`.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DepositNftArgs {
    /// Deposit is the first leg of a swap
    pub swap: bool,
    /// Whitelist membership proof, for proof-based collections
    pub whitelist_proof: Option<Vec<[u8; 32]>>,
}

/// Arguments of `redeem_nft`.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedeemNftArgs {
    /// Redemption is the second leg of a swap
    pub swap: bool,
}

/// Arguments of `lock_nft`.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LockNftArgs {
    /// Lock duration in seconds
    pub duration: u64,
    /// Whitelist membership proof, for proof-based collections
    pub whitelist_proof: Option<Vec<[u8; 32]>>,
}

/// Arguments of `update_locking_params`.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateLockingParamsArgs {
    /// New max locker duration, unchanged when `None`
    pub max_locker_duration: Option<u64>,
    /// New interest scaler, unchanged when `None`
    pub interest_scaler: Option<u8>,
}

// ============================================================================
// Bucket Instructions
// ============================================================================

/// Accounts of `create_bucket`.
#[derive(Clone, Copy, Debug)]
pub struct CreateBucketAccounts {
    /// Payer and bucket creator (signer, writable)
    pub signer: Pubkey,
    /// Fresh droplet mint keypair (signer, writable)
    pub droplet_mint: Pubkey,
    /// Bucket state PDA (writable)
    pub bucket_state: Pubkey,
    /// Pool authority PDA
    pub solvent_authority: Pubkey,
}

impl CreateBucketAccounts {
    /// Account metas in program order.
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new(self.droplet_mint, true),
            AccountMeta::new(self.bucket_state, false),
            AccountMeta::new_readonly(self.solvent_authority, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(SPL_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSVAR_RENT_ID, false),
        ]
    }
}

/// Build `create_bucket`.
pub fn create_bucket(
    program_id: &Pubkey,
    accounts: &CreateBucketAccounts,
    args: &CreateBucketArgs,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: build_instruction_data(SolventInstruction::CreateBucket, args),
    }
}

/// Accounts of `deposit_nft`.
#[derive(Clone, Copy, Debug)]
pub struct DepositNftAccounts {
    /// Depositor (signer, writable)
    pub signer: Pubkey,
    /// Droplet mint (writable)
    pub droplet_mint: Pubkey,
    /// Bucket state PDA (writable)
    pub bucket_state: Pubkey,
    /// Deposit state PDA (writable)
    pub deposit_state: Pubkey,
    /// Depositor's swap state PDA (writable)
    pub swap_state: Pubkey,
    /// Pool authority PDA
    pub solvent_authority: Pubkey,
    /// Item mint
    pub nft_mint: Pubkey,
    /// Item metadata PDA
    pub nft_metadata: Pubkey,
    /// Depositor's item account (writable)
    pub signer_nft_token_account: Pubkey,
    /// Custody account for the item (writable)
    pub solvent_nft_token_account: Pubkey,
    /// Account receiving droplets (writable)
    pub destination_droplet_token_account: Pubkey,
}

impl DepositNftAccounts {
    /// Account metas in program order.
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new(self.droplet_mint, false),
            AccountMeta::new(self.bucket_state, false),
            AccountMeta::new(self.deposit_state, false),
            AccountMeta::new(self.swap_state, false),
            AccountMeta::new_readonly(self.solvent_authority, false),
            AccountMeta::new_readonly(self.nft_mint, false),
            AccountMeta::new_readonly(self.nft_metadata, false),
            AccountMeta::new(self.signer_nft_token_account, false),
            AccountMeta::new(self.solvent_nft_token_account, false),
            AccountMeta::new(self.destination_droplet_token_account, false),
        ];
        metas.extend(token_program_accounts());
        metas
    }
}

/// Build `deposit_nft`.
pub fn deposit_nft(
    program_id: &Pubkey,
    accounts: &DepositNftAccounts,
    args: &DepositNftArgs,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: build_instruction_data(SolventInstruction::DepositNft, args),
    }
}

/// Accounts of `redeem_nft`.
#[derive(Clone, Copy, Debug)]
pub struct RedeemNftAccounts {
    /// Redeemer (signer, writable)
    pub signer: Pubkey,
    /// Droplet mint (writable)
    pub droplet_mint: Pubkey,
    /// Bucket state PDA (writable)
    pub bucket_state: Pubkey,
    /// Deposit state PDA of the redeemed item (writable)
    pub deposit_state: Pubkey,
    /// Redeemer's swap state PDA (writable)
    pub swap_state: Pubkey,
    /// Pool authority PDA
    pub solvent_authority: Pubkey,
    /// Item mint
    pub nft_mint: Pubkey,
    /// Custody account of the item (writable)
    pub solvent_nft_token_account: Pubkey,
    /// Account receiving the item (writable)
    pub destination_nft_token_account: Pubkey,
    /// Account droplets are burned from (writable)
    pub signer_droplet_token_account: Pubkey,
    /// Core treasury
    pub solvent_treasury: Pubkey,
    /// Core treasury droplet account (writable)
    pub solvent_treasury_droplet_token_account: Pubkey,
}

impl RedeemNftAccounts {
    /// Account metas in program order.
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new(self.droplet_mint, false),
            AccountMeta::new(self.bucket_state, false),
            AccountMeta::new(self.deposit_state, false),
            AccountMeta::new(self.swap_state, false),
            AccountMeta::new_readonly(self.solvent_authority, false),
            AccountMeta::new_readonly(self.nft_mint, false),
            AccountMeta::new(self.solvent_nft_token_account, false),
            AccountMeta::new(self.destination_nft_token_account, false),
            AccountMeta::new(self.signer_droplet_token_account, false),
            AccountMeta::new_readonly(self.solvent_treasury, false),
            AccountMeta::new(self.solvent_treasury_droplet_token_account, false),
        ];
        metas.extend(token_program_accounts());
        metas
    }
}

/// Build `redeem_nft`.
pub fn redeem_nft(
    program_id: &Pubkey,
    accounts: &RedeemNftAccounts,
    args: &RedeemNftArgs,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: build_instruction_data(SolventInstruction::RedeemNft, args),
    }
}

// ============================================================================
// Locker Instructions
// ============================================================================

/// Accounts of `lock_nft`.
#[derive(Clone, Copy, Debug)]
pub struct LockNftAccounts {
    /// Borrower (signer, writable)
    pub signer: Pubkey,
    /// Droplet mint (writable)
    pub droplet_mint: Pubkey,
    /// Bucket state PDA (writable)
    pub bucket_state: Pubkey,
    /// Locker state PDA (writable)
    pub locker_state: Pubkey,
    /// Pool authority PDA
    pub solvent_authority: Pubkey,
    /// Item mint
    pub nft_mint: Pubkey,
    /// Item metadata PDA
    pub nft_metadata: Pubkey,
    /// Borrower's item account (writable)
    pub signer_nft_token_account: Pubkey,
    /// Custody account for the item (writable)
    pub solvent_nft_token_account: Pubkey,
    /// Account receiving the principal (writable)
    pub destination_droplet_token_account: Pubkey,
}

impl LockNftAccounts {
    /// Account metas in program order.
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new(self.droplet_mint, false),
            AccountMeta::new(self.bucket_state, false),
            AccountMeta::new(self.locker_state, false),
            AccountMeta::new_readonly(self.solvent_authority, false),
            AccountMeta::new_readonly(self.nft_mint, false),
            AccountMeta::new_readonly(self.nft_metadata, false),
            AccountMeta::new(self.signer_nft_token_account, false),
            AccountMeta::new(self.solvent_nft_token_account, false),
            AccountMeta::new(self.destination_droplet_token_account, false),
        ];
        metas.extend(token_program_accounts());
        metas
    }
}

/// Build `lock_nft`.
pub fn lock_nft(program_id: &Pubkey, accounts: &LockNftAccounts, args: &LockNftArgs) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: build_instruction_data(SolventInstruction::LockNft, args),
    }
}

/// Accounts of `unlock_nft`.
#[derive(Clone, Copy, Debug)]
pub struct UnlockNftAccounts {
    /// Borrower (signer, writable)
    pub signer: Pubkey,
    /// Droplet mint (writable)
    pub droplet_mint: Pubkey,
    /// Bucket state PDA (writable)
    pub bucket_state: Pubkey,
    /// Locker state PDA (writable)
    pub locker_state: Pubkey,
    /// Pool authority PDA
    pub solvent_authority: Pubkey,
    /// Item mint
    pub nft_mint: Pubkey,
    /// Account repayment is burned from (writable)
    pub signer_droplet_token_account: Pubkey,
    /// Custody account of the item (writable)
    pub solvent_nft_token_account: Pubkey,
    /// Account receiving the item (writable)
    pub destination_nft_token_account: Pubkey,
    /// Lockers treasury
    pub solvent_treasury: Pubkey,
    /// Lockers treasury droplet account (writable)
    pub solvent_treasury_droplet_token_account: Pubkey,
}

impl UnlockNftAccounts {
    /// Account metas in program order.
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new(self.droplet_mint, false),
            AccountMeta::new(self.bucket_state, false),
            AccountMeta::new(self.locker_state, false),
            AccountMeta::new_readonly(self.solvent_authority, false),
            AccountMeta::new_readonly(self.nft_mint, false),
            AccountMeta::new(self.signer_droplet_token_account, false),
            AccountMeta::new(self.solvent_nft_token_account, false),
            AccountMeta::new(self.destination_nft_token_account, false),
            AccountMeta::new_readonly(self.solvent_treasury, false),
            AccountMeta::new(self.solvent_treasury_droplet_token_account, false),
        ];
        metas.extend(token_program_accounts());
        metas
    }
}

/// Build `unlock_nft`.
pub fn unlock_nft(program_id: &Pubkey, accounts: &UnlockNftAccounts) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: SolventInstruction::UnlockNft.discriminator().to_vec(),
    }
}

/// Accounts of `liquidate_locker`.
#[derive(Clone, Copy, Debug)]
pub struct LiquidateLockerAccounts {
    /// Liquidator (signer, writable)
    pub signer: Pubkey,
    /// Droplet mint (writable)
    pub droplet_mint: Pubkey,
    /// Bucket state PDA (writable)
    pub bucket_state: Pubkey,
    /// Locker state PDA (writable)
    pub locker_state: Pubkey,
    /// Deposit state PDA created for the liquidated item (writable)
    pub deposit_state: Pubkey,
    /// Pool authority PDA
    pub solvent_authority: Pubkey,
    /// Item mint
    pub nft_mint: Pubkey,
    /// Custody account of the item (writable)
    pub solvent_nft_token_account: Pubkey,
    /// Lockers treasury
    pub solvent_treasury: Pubkey,
    /// Lockers treasury droplet account (writable)
    pub solvent_treasury_droplet_token_account: Pubkey,
    /// Account receiving the liquidation reward (writable)
    pub signer_droplet_token_account: Pubkey,
}

impl LiquidateLockerAccounts {
    /// Account metas in program order.
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new(self.droplet_mint, false),
            AccountMeta::new(self.bucket_state, false),
            AccountMeta::new(self.locker_state, false),
            AccountMeta::new(self.deposit_state, false),
            AccountMeta::new_readonly(self.solvent_authority, false),
            AccountMeta::new_readonly(self.nft_mint, false),
            AccountMeta::new(self.solvent_nft_token_account, false),
            AccountMeta::new_readonly(self.solvent_treasury, false),
            AccountMeta::new(self.solvent_treasury_droplet_token_account, false),
            AccountMeta::new(self.signer_droplet_token_account, false),
        ];
        metas.extend(token_program_accounts());
        metas
    }
}

/// Build `liquidate_locker`.
pub fn liquidate_locker(program_id: &Pubkey, accounts: &LiquidateLockerAccounts) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: SolventInstruction::LiquidateLocker.discriminator().to_vec(),
    }
}

// ============================================================================
// Admin Instructions
// ============================================================================

/// Accounts shared by the bucket admin instructions.
#[derive(Clone, Copy, Debug)]
pub struct BucketAdminAccounts {
    /// Protocol admin (signer)
    pub signer: Pubkey,
    /// Bucket state PDA (writable)
    pub bucket_state: Pubkey,
    /// Droplet mint
    pub droplet_mint: Pubkey,
}

impl BucketAdminAccounts {
    /// Account metas in program order.
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.signer, true),
            AccountMeta::new(self.bucket_state, false),
            AccountMeta::new_readonly(self.droplet_mint, false),
        ]
    }
}

/// Build `set_locking_enabled`.
pub fn set_locking_enabled(
    program_id: &Pubkey,
    accounts: &BucketAdminAccounts,
    enable: bool,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: build_instruction_data(SolventInstruction::SetLockingEnabled, &enable),
    }
}

/// Build `update_locking_params`.
pub fn update_locking_params(
    program_id: &Pubkey,
    accounts: &BucketAdminAccounts,
    args: &UpdateLockingParamsArgs,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: build_instruction_data(SolventInstruction::UpdateLockingParams, args),
    }
}

/// Build `set_staking_enabled`.
pub fn set_staking_enabled(
    program_id: &Pubkey,
    accounts: &BucketAdminAccounts,
    enable: bool,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: build_instruction_data(SolventInstruction::SetStakingEnabled, &enable),
    }
}

/// Build `update_staking_params`.
///
/// The farm references are passed as accounts, there are no args.
pub fn update_staking_params(
    program_id: &Pubkey,
    accounts: &BucketAdminAccounts,
    staking: &crate::StakingParams,
) -> Instruction {
    let mut metas = accounts.to_account_metas();
    metas.extend([
        AccountMeta::new_readonly(staking.gembank_program, false),
        AccountMeta::new_readonly(staking.gemfarm_program, false),
        AccountMeta::new_readonly(staking.gemworks_farm, false),
        AccountMeta::new_readonly(staking.gemworks_fee_account, false),
    ]);
    Instruction {
        program_id: *program_id,
        accounts: metas,
        data: SolventInstruction::UpdateStakingParams.discriminator().to_vec(),
    }
}

/// Accounts of `claim_balance`.
#[derive(Clone, Copy, Debug)]
pub struct ClaimBalanceAccounts {
    /// Caller (signer, writable)
    pub signer: Pubkey,
    /// Pool authority PDA holding the balance (writable)
    pub solvent_authority: Pubkey,
    /// Core treasury (writable)
    pub solvent_treasury: Pubkey,
}

/// Build `claim_balance`.
pub fn claim_balance(program_id: &Pubkey, accounts: &ClaimBalanceAccounts) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(accounts.signer, true),
            AccountMeta::new(accounts.solvent_authority, false),
            AccountMeta::new(accounts.solvent_treasury, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: SolventInstruction::ClaimBalance.discriminator().to_vec(),
    }
}

// ============================================================================
// Staking Instructions
// ============================================================================

/// Farm accounts shared by `stake_nft` and `unstake_nft`.
#[derive(Clone, Copy, Debug)]
pub struct FarmAccountMetas {
    /// Gem bank program
    pub gembank_program: Pubkey,
    /// Gem farm program
    pub gemfarm_program: Pubkey,
    /// Farm's bank (writable)
    pub gemworks_bank: Pubkey,
    /// Farm (writable)
    pub gemworks_farm: Pubkey,
    /// Farm fee account (writable)
    pub gemworks_fee_account: Pubkey,
}

impl FarmAccountMetas {
    fn to_account_metas(self) -> [AccountMeta; 5] {
        [
            AccountMeta::new_readonly(self.gembank_program, false),
            AccountMeta::new_readonly(self.gemfarm_program, false),
            AccountMeta::new(self.gemworks_bank, false),
            AccountMeta::new(self.gemworks_farm, false),
            AccountMeta::new(self.gemworks_fee_account, false),
        ]
    }
}

/// Accounts of `stake_nft`.
#[derive(Clone, Copy, Debug)]
pub struct StakeNftAccounts {
    /// Caller (signer, writable)
    pub signer: Pubkey,
    /// Droplet mint
    pub droplet_mint: Pubkey,
    /// Bucket state PDA
    pub bucket_state: Pubkey,
    /// Pool authority PDA
    pub solvent_authority: Pubkey,
    /// Farmer authority PDA of the item (writable)
    pub farmer_authority: Pubkey,
    /// Item mint
    pub nft_mint: Pubkey,
    /// Custody account of the item (writable)
    pub solvent_nft_token_account: Pubkey,
    /// Farmer authority's item account (writable)
    pub farmer_nft_token_account: Pubkey,
    /// Farm accounts
    pub farm: FarmAccountMetas,
}

/// Build `stake_nft`.
pub fn stake_nft(program_id: &Pubkey, accounts: &StakeNftAccounts) -> Instruction {
    let mut metas = vec![
        AccountMeta::new(accounts.signer, true),
        AccountMeta::new_readonly(accounts.droplet_mint, false),
        AccountMeta::new_readonly(accounts.bucket_state, false),
        AccountMeta::new_readonly(accounts.solvent_authority, false),
        AccountMeta::new(accounts.farmer_authority, false),
        AccountMeta::new_readonly(accounts.nft_mint, false),
        AccountMeta::new(accounts.solvent_nft_token_account, false),
        AccountMeta::new(accounts.farmer_nft_token_account, false),
    ];
    metas.extend(accounts.farm.to_account_metas());
    metas.extend(token_program_accounts());
    Instruction {
        program_id: *program_id,
        accounts: metas,
        data: SolventInstruction::StakeNft.discriminator().to_vec(),
    }
}

/// Accounts of `unstake_nft`.
#[derive(Clone, Copy, Debug)]
pub struct UnstakeNftAccounts {
    /// Caller (signer, writable)
    pub signer: Pubkey,
    /// Droplet mint
    pub droplet_mint: Pubkey,
    /// Bucket state PDA
    pub bucket_state: Pubkey,
    /// Pool authority PDA
    pub solvent_authority: Pubkey,
    /// Farmer authority PDA of the item (writable)
    pub farmer_authority: Pubkey,
    /// Item mint
    pub nft_mint: Pubkey,
    /// Custody account of the item (writable)
    pub solvent_nft_token_account: Pubkey,
    /// Farm accounts
    pub farm: FarmAccountMetas,
    /// Farm reward A mint
    pub reward_a_mint: Pubkey,
    /// Farm reward B mint
    pub reward_b_mint: Pubkey,
    /// Farmer authority's reward A account (writable)
    pub farmer_reward_a_token_account: Pubkey,
    /// Farmer authority's reward B account (writable)
    pub farmer_reward_b_token_account: Pubkey,
}

/// Build `unstake_nft`.
pub fn unstake_nft(program_id: &Pubkey, accounts: &UnstakeNftAccounts) -> Instruction {
    let mut metas = vec![
        AccountMeta::new(accounts.signer, true),
        AccountMeta::new_readonly(accounts.droplet_mint, false),
        AccountMeta::new_readonly(accounts.bucket_state, false),
        AccountMeta::new_readonly(accounts.solvent_authority, false),
        AccountMeta::new(accounts.farmer_authority, false),
        AccountMeta::new_readonly(accounts.nft_mint, false),
        AccountMeta::new(accounts.solvent_nft_token_account, false),
    ];
    metas.extend(accounts.farm.to_account_metas());
    metas.extend([
        AccountMeta::new_readonly(accounts.reward_a_mint, false),
        AccountMeta::new_readonly(accounts.reward_b_mint, false),
        AccountMeta::new(accounts.farmer_reward_a_token_account, false),
        AccountMeta::new(accounts.farmer_reward_b_token_account, false),
    ]);
    metas.extend(token_program_accounts());
    Instruction {
        program_id: *program_id,
        accounts: metas,
        data: SolventInstruction::UnstakeNft.discriminator().to_vec(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[test]
    fn test_instruction_names_are_snake_case() {
        assert_eq!(SolventInstruction::DepositNft.name(), "deposit_nft");
        assert_eq!(SolventInstruction::LiquidateLocker.name(), "liquidate_locker");
        assert_eq!(SolventInstruction::UpdateLockingParams.name(), "update_locking_params");
    }

    #[test]
    fn test_discriminators_are_unique() {
        let all: Vec<_> = SolventInstruction::iter().map(|ix| ix.discriminator()).collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_deposit_instruction_data_layout() {
        let args = DepositNftArgs {
            swap: true,
            whitelist_proof: Some(vec![[1u8; 32], [2u8; 32]]),
        };
        let data = build_instruction_data(SolventInstruction::DepositNft, &args);

        // discriminator(8) + swap(1) + option tag(1) + vec len(4) + 2 * 32
        assert_eq!(data.len(), 8 + 1 + 1 + 4 + 64);
        assert_eq!(SolventInstruction::from_data(&data), Some(SolventInstruction::DepositNft));
        assert_eq!(data[8], 1);

        let parsed = DepositNftArgs::try_from_slice(&data[8..]).unwrap();
        assert_eq!(parsed, args);
    }

    #[test]
    fn test_from_data_rejects_short_or_unknown() {
        assert_eq!(SolventInstruction::from_data(&[1, 2, 3]), None);
        assert_eq!(SolventInstruction::from_data(&[0u8; 8]), None);
    }

    #[test]
    fn test_redeem_accounts_signer_and_writability() {
        let accounts = RedeemNftAccounts {
            signer: key(1),
            droplet_mint: key(2),
            bucket_state: key(3),
            deposit_state: key(4),
            swap_state: key(5),
            solvent_authority: key(6),
            nft_mint: key(7),
            solvent_nft_token_account: key(8),
            destination_nft_token_account: key(9),
            signer_droplet_token_account: key(10),
            solvent_treasury: key(11),
            solvent_treasury_droplet_token_account: key(12),
        };
        let ix = redeem_nft(&key(99), &accounts, &RedeemNftArgs { swap: false });
        assert_eq!(ix.program_id, key(99));
        assert_eq!(ix.accounts.len(), 12 + 4);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts.iter().filter(|m| m.is_signer).count(), 1);
        assert!(!ix.accounts[5].is_writable);
        assert_eq!(ix.accounts[12].pubkey, SPL_TOKEN_PROGRAM_ID);
        assert_eq!(ix.data[8], 0);
    }

    #[test]
    fn test_update_locking_params_encodes_options() {
        let accounts = BucketAdminAccounts {
            signer: key(1),
            bucket_state: key(2),
            droplet_mint: key(3),
        };
        let ix = update_locking_params(
            &key(9),
            &accounts,
            &UpdateLockingParamsArgs {
                max_locker_duration: Some(10_000),
                interest_scaler: None,
            },
        );
        assert_eq!(&ix.data[8..], &[1, 16, 39, 0, 0, 0, 0, 0, 0, 0]);
    }
}
