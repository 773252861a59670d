//! Lockers: loan terms, lock, unlock and liquidation composition.

mod common;

use borsh::BorshDeserialize;
use common::*;
use solana_pubkey::Pubkey;
use solvent_client::interface::instructions::{LockNftArgs, SolventInstruction};
use solvent_client::interface::state::{BucketState, LockerState};
use solvent_client::{ClientConfig, ErrorKind, ItemOptions, LoanTerms, LockOptions};
use test_case::test_case;

const UNIT: u64 = 1_000_000_000;

fn locking_bucket(
    droplet_mint: &Pubkey,
    in_bucket: u16,
    in_lockers: u16,
    max_duration: u64,
    scaler: u8,
) -> BucketState {
    BucketState {
        num_nfts_in_bucket: in_bucket,
        num_nfts_in_lockers: in_lockers,
        is_locking_enabled: true,
        max_locker_duration: max_duration,
        interest_scaler: scaler,
        ..bucket_state(droplet_mint, verified_collection())
    }
}

fn locker(droplet_mint: &Pubkey, nft_mint: &Pubkey, created: i64, duration: u64) -> LockerState {
    LockerState {
        bump: 255,
        droplet_mint: *droplet_mint,
        nft_mint: *nft_mint,
        creation_timestamp: created,
        duration,
        principal_amount: 95 * UNIT,
        max_interest_payable: 2 * UNIT,
    }
}

fn unit_env() -> TestEnv {
    TestEnv::with_config(ClientConfig {
        droplet_unit: UNIT,
        ..ClientConfig::default()
    })
}

#[test_case(100, 99_950_000_000, 5_000_000 ; "reference bucket")]
#[test_case(0, 100 * UNIT, 0 ; "zero duration")]
#[test_case(100_000, 50 * UNIT, 5 * UNIT ; "full duration")]
#[tokio::test]
async fn test_calculate_loan_reads_bucket(duration: u64, principal: u64, max_interest: u64) {
    let env = unit_env();
    let droplet_mint = env.add_bucket(|mint| locking_bucket(mint, 3, 2, 100_000, 10));

    let terms = env.client.calculate_loan(&droplet_mint, duration).await.unwrap();

    assert_eq!(
        terms,
        LoanTerms {
            principal,
            max_interest
        }
    );
}

#[tokio::test]
async fn test_calculate_loan_on_disabled_bucket_is_zero() {
    let env = unit_env();
    let droplet_mint = env.add_plain_bucket();

    let terms = env.client.calculate_loan(&droplet_mint, 100).await.unwrap();
    assert_eq!(terms, LoanTerms::ZERO);
}

#[tokio::test]
async fn test_calculate_repayment_after_expiry_owes_everything() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.seed_locker(&droplet_mint, |nft| locker(&droplet_mint, nft, 1_000, 60));

    let owed = env.client.calculate_repayment(&droplet_mint, &nft_mint).await.unwrap();
    assert_eq!(owed, 97 * UNIT);
}

#[tokio::test]
async fn test_lock_on_disabled_bucket_is_feature_disabled() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.give_item(&env.payer());

    let err = env
        .client
        .lock_nft(&droplet_mint, &nft_mint, 100, &LockOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FeatureDisabled);
    assert!(env.ledger.submitted().is_empty());
}

#[tokio::test]
async fn test_lock_longer_than_max_is_out_of_bounds() {
    let env = TestEnv::new();
    let droplet_mint = env.add_bucket(|mint| locking_bucket(mint, 3, 0, 1_000, 50));
    let nft_mint = env.give_item(&env.payer());

    let err = env
        .client
        .lock_nft(&droplet_mint, &nft_mint, 1_001, &LockOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LockDurationOutOfBounds);
    assert!(env.ledger.submitted().is_empty());
}

#[tokio::test]
async fn test_lock_without_item_is_missing_collateral() {
    let env = TestEnv::new();
    let droplet_mint = env.add_bucket(|mint| locking_bucket(mint, 3, 0, 1_000, 50));

    let err = env
        .client
        .lock_nft(&droplet_mint, &Pubkey::new_unique(), 10, &LockOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingCollateral);
}

#[tokio::test]
async fn test_lock_composition() {
    let env = TestEnv::new();
    let droplet_mint = env.add_bucket(|mint| locking_bucket(mint, 3, 0, 1_000, 50));
    let nft_mint = env.give_item(&env.payer());

    let ixs = env
        .client
        .build_lock_nft(&droplet_mint, &nft_mint, 500, &LockOptions::default())
        .await
        .unwrap();

    // the signer's droplet account, then the lock
    assert_eq!(ixs.len(), 2);
    assert_eq!(ixs[0].accounts[1].pubkey, wallet_address(&env.payer(), &droplet_mint));
    let lock = last_solvent_instruction(&ixs);
    assert_eq!(SolventInstruction::from_data(&lock.data), Some(SolventInstruction::LockNft));
    assert_eq!(lock.accounts[3].pubkey, locker_address(&droplet_mint, &nft_mint));
    assert_eq!(lock.accounts[8].pubkey, custody_address(&nft_mint));
    assert_eq!(
        LockNftArgs::try_from_slice(&lock.data[8..]).unwrap(),
        LockNftArgs {
            duration: 500,
            whitelist_proof: None,
        }
    );

    env.client
        .lock_nft(&droplet_mint, &nft_mint, 500, &LockOptions::default())
        .await
        .unwrap();
    let submitted = env.ledger.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(solvent_calls(&submitted[0]), vec![SolventInstruction::LockNft]);
}

#[tokio::test]
async fn test_unlock_composition() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.seed_locker(&droplet_mint, |nft| locker(&droplet_mint, nft, i64::MAX / 2, 60));
    env.give_droplets(&env.payer(), &droplet_mint, 100 * UNIT);

    let ixs = env
        .client
        .build_unlock_nft(&droplet_mint, &nft_mint, &ItemOptions::default())
        .await
        .unwrap();

    // destination item account only
    assert_eq!(ixs.len(), 2);
    assert_eq!(ixs[0].accounts[1].pubkey, wallet_address(&env.payer(), &nft_mint));
    let unlock = last_solvent_instruction(&ixs);
    assert_eq!(unlock.data, SolventInstruction::UnlockNft.discriminator().to_vec());
    assert_eq!(unlock.accounts[6].pubkey, wallet_address(&env.payer(), &droplet_mint));
    assert_eq!(unlock.accounts[7].pubkey, custody_address(&nft_mint));
    assert_eq!(unlock.accounts[8].pubkey, wallet_address(&env.payer(), &nft_mint));
    assert_eq!(unlock.accounts[9].pubkey, env.client.config().lockers_treasury);
    assert_eq!(
        unlock.accounts[10].pubkey,
        wallet_address(&env.client.config().lockers_treasury, &droplet_mint)
    );
}

#[tokio::test]
async fn test_unlock_with_low_balance_still_composes() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.seed_locker(&droplet_mint, |nft| locker(&droplet_mint, nft, i64::MAX / 2, 60));

    let signature = env
        .client
        .unlock_nft(&droplet_mint, &nft_mint, &ItemOptions::default())
        .await;
    assert!(signature.is_ok());
}

#[tokio::test]
async fn test_unlock_of_unlocked_item_is_account_state() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.seed_deposit(&droplet_mint);

    let err = env
        .client
        .unlock_nft(&droplet_mint, &nft_mint, &ItemOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AccountState);
}

#[tokio::test]
async fn test_liquidation_composition() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.seed_locker(&droplet_mint, |nft| locker(&droplet_mint, nft, 0, 60));

    let ixs = env
        .client
        .build_liquidate_locker(&droplet_mint, &nft_mint, &ItemOptions::default())
        .await
        .unwrap();

    // the liquidator's droplet account only
    assert_eq!(ixs.len(), 2);
    assert_eq!(ixs[0].accounts[1].pubkey, wallet_address(&env.payer(), &droplet_mint));
    let liquidate = last_solvent_instruction(&ixs);
    assert_eq!(
        SolventInstruction::from_data(&liquidate.data),
        Some(SolventInstruction::LiquidateLocker)
    );
    assert_eq!(liquidate.accounts[3].pubkey, locker_address(&droplet_mint, &nft_mint));
    assert_eq!(liquidate.accounts[4].pubkey, deposit_address(&droplet_mint, &nft_mint));
    assert_eq!(liquidate.accounts[10].pubkey, wallet_address(&env.payer(), &droplet_mint));

    env.client
        .liquidate_locker(&droplet_mint, &nft_mint, &ItemOptions::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_liquidation_needs_item_in_custody() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.seed_locker(&droplet_mint, |nft| locker(&droplet_mint, nft, 0, 60));
    env.ledger.remove_account(&custody_address(&nft_mint));

    let err = env
        .client
        .liquidate_locker(&droplet_mint, &nft_mint, &ItemOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingCollateral);
}

#[tokio::test]
async fn test_unlock_after_expiry_is_rejected() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.seed_locker(&droplet_mint, |nft| locker(&droplet_mint, nft, 1_000, 60));
    env.give_droplets(&env.payer(), &droplet_mint, 100 * UNIT);

    let err = env
        .client
        .unlock_nft(&droplet_mint, &nft_mint, &ItemOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LockerExpired);
    assert!(env.ledger.submitted().is_empty());
}

#[tokio::test]
async fn test_liquidation_before_expiry_is_rejected() {
    let env = TestEnv::new();
    let droplet_mint = env.add_plain_bucket();
    let nft_mint = env.seed_locker(&droplet_mint, |nft| locker(&droplet_mint, nft, i64::MAX / 2, 60));

    let err = env
        .client
        .liquidate_locker(&droplet_mint, &nft_mint, &ItemOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LockerNotExpired);
    assert!(env.ledger.submitted().is_empty());
}

#[tokio::test]
async fn test_all_lockers_by_bucket() {
    let env = TestEnv::new();
    let first = env.add_plain_bucket();
    let second = env.add_plain_bucket();
    env.seed_locker(&first, |nft| locker(&first, nft, 0, 60));
    env.seed_locker(&first, |nft| locker(&first, nft, 0, 60));
    env.seed_locker(&second, |nft| locker(&second, nft, 0, 60));

    assert_eq!(env.client.get_all_lockers(None).await.unwrap().len(), 3);
    let lockers = env.client.get_all_lockers(Some(&first)).await.unwrap();
    assert_eq!(lockers.len(), 2);
    assert!(lockers.iter().all(|(_, state)| state.droplet_mint == first));
}
