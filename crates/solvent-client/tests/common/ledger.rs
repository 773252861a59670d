//! In-memory ledger with a minimal model of the Solvent program.
//!
//! Submitted transactions are applied atomically: idempotent ATA creation,
//! `deposit_nft` and `redeem_nft` move items and droplets and maintain the
//! deposit / swap / bucket states the way the program does. Every other
//! Solvent instruction is accepted without side effects. Any submission can be
//! scripted to be rejected or to fail at the transport.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use borsh::BorshDeserialize;
use solana_account::Account;
use solana_hash::Hash;
use solana_message::compiled_instruction::CompiledInstruction;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::Transaction;
use solvent_client::interface::instructions::{DepositNftArgs, RedeemNftArgs, SolventInstruction};
use solvent_client::interface::state::{AccountSchema, BucketState, DepositState, SwapState};
use solvent_client::interface::{
    ASSOCIATED_TOKEN_PROGRAM_ID, DEFAULT_DROPLET_UNIT, DROPLETS_PER_NFT, SOLVENT_PROGRAM_ID,
};
use solvent_client::token::token_account_amount;
use solvent_client::{AccountFilter, Ledger, LedgerError};

use super::mock_accounts::{program_account, set_amount, token_account};

/// Scripted outcome of one submission
#[derive(Clone, Debug)]
pub enum Outcome {
    /// Execute normally
    Execute,
    /// Reject with a reason, leaving state untouched
    Reject(String),
    /// Fail at the transport, leaving state untouched
    Transport(String),
}

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Account>,
    submitted: Vec<Transaction>,
    script: VecDeque<Outcome>,
    blockhash_counter: u8,
}

/// Cheaply cloneable handle, clones share the same ledger
#[derive(Clone, Default)]
pub struct MockLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap()
    }

    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.lock().accounts.insert(address, account);
    }

    pub fn remove_account(&self, address: &Pubkey) {
        self.lock().accounts.remove(address);
    }

    pub fn account(&self, address: &Pubkey) -> Option<Account> {
        self.lock().accounts.get(address).cloned()
    }

    pub fn set_state<T: AccountSchema>(&self, address: Pubkey, state: &T) {
        self.set_account(address, program_account(state));
    }

    pub fn state<T: AccountSchema>(&self, address: &Pubkey) -> Option<T> {
        self.account(address)
            .map(|account| T::try_from_account_data(&account.data).unwrap())
    }

    /// Token amount, zero when the account is missing
    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.account(address)
            .and_then(|account| token_account_amount(&account.data))
            .unwrap_or(0)
    }

    /// Every submission, including rejected ones, in order
    pub fn submitted(&self) -> Vec<Transaction> {
        self.lock().submitted.clone()
    }

    /// Script the outcome of the next unscripted submission
    pub fn push_outcome(&self, outcome: Outcome) {
        self.lock().script.push_back(outcome);
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, LedgerError> {
        Ok(self.account(address))
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, LedgerError> {
        let state = self.lock();
        let mut found: Vec<_> = state
            .accounts
            .iter()
            .filter(|(_, account)| &account.owner == program_id)
            .filter(|(_, account)| filters.iter().all(|f| f.matches(&account.data)))
            .map(|(address, account)| (*address, account.clone()))
            .collect();
        found.sort_by_key(|(address, _)| *address);
        Ok(found)
    }

    async fn latest_blockhash(&self) -> Result<Hash, LedgerError> {
        let mut state = self.lock();
        state.blockhash_counter = state.blockhash_counter.wrapping_add(1);
        Ok(Hash::new_from_array([state.blockhash_counter; 32]))
    }

    async fn send_and_confirm_transaction(&self, tx: &Transaction) -> Result<Signature, LedgerError> {
        let mut state = self.lock();
        state.submitted.push(tx.clone());

        match state.script.pop_front().unwrap_or(Outcome::Execute) {
            Outcome::Execute => {}
            Outcome::Reject(reason) => return Err(LedgerError::Rejected { reason }),
            Outcome::Transport(message) => return Err(LedgerError::Transport { message }),
        }

        let required = usize::from(tx.message.header.num_required_signatures);
        if tx.signatures.len() != required
            || tx.signatures.iter().any(|s| *s == Signature::default())
        {
            return Err(LedgerError::Rejected {
                reason: "missing required signature".to_string(),
            });
        }

        // Apply atomically on a scratch copy
        let mut accounts = state.accounts.clone();
        for ix in &tx.message.instructions {
            execute(&mut accounts, &tx.message.account_keys, ix)
                .map_err(|reason| LedgerError::Rejected { reason })?;
        }
        state.accounts = accounts;
        Ok(tx.signatures[0])
    }

    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> Result<Signature, LedgerError> {
        let mut state = self.lock();
        let account = state.accounts.entry(*to).or_insert_with(|| Account {
            lamports: 0,
            data: Vec::new(),
            owner: Pubkey::default(),
            executable: false,
            rent_epoch: 0,
        });
        account.lamports += lamports;
        Ok(Signature::default())
    }
}

// ============================================================================
// Program model
// ============================================================================

type Accounts = HashMap<Pubkey, Account>;

fn execute(accounts: &mut Accounts, keys: &[Pubkey], ix: &CompiledInstruction) -> Result<(), String> {
    let program = keys[usize::from(ix.program_id_index)];
    let acc = |i: usize| keys[usize::from(ix.accounts[i])];

    if program == ASSOCIATED_TOKEN_PROGRAM_ID {
        let (address, owner, mint) = (acc(1), acc(2), acc(3));
        accounts
            .entry(address)
            .or_insert_with(|| token_account(&mint, &owner, 0));
        return Ok(());
    }
    if program != SOLVENT_PROGRAM_ID {
        return Ok(());
    }

    match SolventInstruction::from_data(&ix.data) {
        Some(SolventInstruction::DepositNft) => {
            let args = DepositNftArgs::try_from_slice(&ix.data[8..]).map_err(|e| e.to_string())?;
            let (signer, droplet_mint, bucket, deposit, swap) = (acc(0), acc(1), acc(2), acc(3), acc(4));
            let (authority, nft_mint, source, custody, destination) =
                (acc(5), acc(6), acc(8), acc(9), acc(10));

            // the program initializes its custody account on first deposit
            accounts
                .entry(custody)
                .or_insert_with(|| token_account(&nft_mint, &authority, 0));
            transfer(accounts, &source, &custody, 1)?;
            if args.swap {
                let mut session = read::<SwapState>(accounts, &swap).unwrap_or(SwapState {
                    bump: 255,
                    signer,
                    droplet_mint,
                    flag: false,
                });
                if session.flag {
                    return Err("swap already in progress".to_string());
                }
                session.flag = true;
                write(accounts, swap, &session);
            } else {
                adjust(accounts, &destination, i128::from(DROPLETS_PER_NFT * DEFAULT_DROPLET_UNIT))?;
            }
            write(
                accounts,
                deposit,
                &DepositState {
                    bump: 255,
                    droplet_mint,
                    nft_mint,
                },
            );
            update_bucket(accounts, &bucket, 1)
        }
        Some(SolventInstruction::RedeemNft) => {
            let args = RedeemNftArgs::try_from_slice(&ix.data[8..]).map_err(|e| e.to_string())?;
            let (bucket, deposit, swap) = (acc(2), acc(3), acc(4));
            let (custody, destination, signer_droplets) = (acc(7), acc(8), acc(9));

            if args.swap {
                let mut session = read::<SwapState>(accounts, &swap)
                    .filter(|s| s.flag)
                    .ok_or("no swap in progress")?;
                session.flag = false;
                write(accounts, swap, &session);
            } else {
                adjust(accounts, &signer_droplets, -i128::from(DROPLETS_PER_NFT * DEFAULT_DROPLET_UNIT))?;
            }
            accounts.remove(&deposit).ok_or("item not deposited")?;
            transfer(accounts, &custody, &destination, 1)?;
            update_bucket(accounts, &bucket, -1)
        }
        Some(_) => Ok(()),
        None => Err("unknown instruction".to_string()),
    }
}

fn read<T: AccountSchema>(accounts: &Accounts, address: &Pubkey) -> Option<T> {
    accounts
        .get(address)
        .and_then(|account| T::try_from_account_data(&account.data).ok())
}

fn write<T: AccountSchema>(accounts: &mut Accounts, address: Pubkey, state: &T) {
    accounts.insert(address, program_account(state));
}

fn adjust(accounts: &mut Accounts, address: &Pubkey, delta: i128) -> Result<(), String> {
    let account = accounts
        .get_mut(address)
        .ok_or_else(|| format!("token account {address} missing"))?;
    let amount = i128::from(token_account_amount(&account.data).unwrap_or(0)) + delta;
    let amount = u64::try_from(amount).map_err(|_| "insufficient funds".to_string())?;
    set_amount(&mut account.data, amount);
    Ok(())
}

fn transfer(accounts: &mut Accounts, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), String> {
    if !accounts.contains_key(to) {
        return Err(format!("token account {to} missing"));
    }
    adjust(accounts, from, -i128::from(amount))?;
    adjust(accounts, to, i128::from(amount))
}

fn update_bucket(accounts: &mut Accounts, address: &Pubkey, delta: i32) -> Result<(), String> {
    let mut bucket = read::<BucketState>(accounts, address).ok_or("bucket missing")?;
    let count = i32::from(bucket.num_nfts_in_bucket) + delta;
    bucket.num_nfts_in_bucket = u16::try_from(count).map_err(|_| "bucket count underflow")?;
    write(accounts, *address, &bucket);
    Ok(())
}
