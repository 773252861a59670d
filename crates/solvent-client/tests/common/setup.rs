//! Test environment: a mock ledger, a funded payer and bucket fixtures.

use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_transaction::Transaction;
use solvent_client::interface::SOLVENT_PROGRAM_ID;
use solvent_client::interface::instructions::SolventInstruction;
use solvent_client::interface::state::{BucketState, DepositState, LockerState};
use solvent_client::interface::{CollectionInfo, StakingParams};
use solvent_client::{ClientConfig, SolventClient};

use super::ledger::MockLedger;
use super::mock_accounts::{mint_account, token_account};
use super::pda::{bucket_address, custody_address, deposit_address, locker_address, wallet_address};

/// Client type every test drives
pub type TestClient = SolventClient<MockLedger, Keypair>;

/// Droplet mint decimals
pub const DROPLET_DECIMALS: u8 = 8;

/// Bucket with every feature off and an empty pool
pub fn bucket_state(droplet_mint: &Pubkey, collection_info: CollectionInfo) -> BucketState {
    BucketState {
        bump: 255,
        droplet_mint: *droplet_mint,
        collection_info,
        num_nfts_in_bucket: 0,
        num_nfts_in_lockers: 0,
        is_locking_enabled: false,
        max_locker_duration: 0,
        interest_scaler: 0,
        is_staking_enabled: false,
        staking_params: None,
    }
}

/// Verified-collection rule
pub fn verified_collection() -> CollectionInfo {
    CollectionInfo::V2 {
        collection_mint: Pubkey::new_unique(),
    }
}

/// Farm references with fresh addresses
pub fn staking_params() -> StakingParams {
    StakingParams {
        gembank_program: Pubkey::new_unique(),
        gemfarm_program: Pubkey::new_unique(),
        gemworks_farm: Pubkey::new_unique(),
        gemworks_fee_account: Pubkey::new_unique(),
    }
}

pub struct TestEnv {
    pub ledger: MockLedger,
    pub client: TestClient,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let ledger = MockLedger::new();
        let client = SolventClient::with_config(ledger.clone(), Keypair::new(), config);
        Self { ledger, client }
    }

    pub fn payer(&self) -> Pubkey {
        self.client.payer_pubkey()
    }

    /// Another party on the same ledger
    pub fn other_client(&self) -> TestClient {
        SolventClient::with_config(self.ledger.clone(), Keypair::new(), self.client.config().clone())
    }

    /// Store a bucket around a fresh droplet mint
    pub fn add_bucket(&self, state: impl FnOnce(&Pubkey) -> BucketState) -> Pubkey {
        let droplet_mint = Pubkey::new_unique();
        self.ledger
            .set_account(droplet_mint, mint_account(DROPLET_DECIMALS));
        self.ledger
            .set_state(bucket_address(&droplet_mint), &state(&droplet_mint));
        droplet_mint
    }

    /// Bucket accepting a verified collection, locking and staking off
    pub fn add_plain_bucket(&self) -> Pubkey {
        self.add_bucket(|mint| bucket_state(mint, verified_collection()))
    }

    pub fn bucket(&self, droplet_mint: &Pubkey) -> BucketState {
        self.ledger.state(&bucket_address(droplet_mint)).unwrap()
    }

    /// Mint a fresh item into `owner`'s wallet
    pub fn give_item(&self, owner: &Pubkey) -> Pubkey {
        let nft_mint = Pubkey::new_unique();
        self.ledger.set_account(nft_mint, mint_account(0));
        self.ledger
            .set_account(wallet_address(owner, &nft_mint), token_account(&nft_mint, owner, 1));
        nft_mint
    }

    /// Droplets in `owner`'s wallet account
    pub fn give_droplets(&self, owner: &Pubkey, droplet_mint: &Pubkey, amount: u64) {
        self.ledger.set_account(
            wallet_address(owner, droplet_mint),
            token_account(droplet_mint, owner, amount),
        );
    }

    /// Place a fresh item in the pool as if someone had deposited it
    pub fn seed_deposit(&self, droplet_mint: &Pubkey) -> Pubkey {
        let nft_mint = Pubkey::new_unique();
        self.ledger.set_account(nft_mint, mint_account(0));
        self.ledger.set_account(
            custody_address(&nft_mint),
            token_account(&nft_mint, &super::pda::authority_address(), 1),
        );
        self.ledger.set_state(
            deposit_address(droplet_mint, &nft_mint),
            &DepositState {
                bump: 255,
                droplet_mint: *droplet_mint,
                nft_mint,
            },
        );
        let mut bucket = self.bucket(droplet_mint);
        bucket.num_nfts_in_bucket += 1;
        self.ledger.set_state(bucket_address(droplet_mint), &bucket);
        nft_mint
    }

    /// Place a fresh item in custody under a locker
    pub fn seed_locker(&self, droplet_mint: &Pubkey, locker: impl FnOnce(&Pubkey) -> LockerState) -> Pubkey {
        let nft_mint = Pubkey::new_unique();
        self.ledger.set_account(nft_mint, mint_account(0));
        self.ledger.set_account(
            custody_address(&nft_mint),
            token_account(&nft_mint, &super::pda::authority_address(), 1),
        );
        self.ledger
            .set_state(locker_address(droplet_mint, &nft_mint), &locker(&nft_mint));
        nft_mint
    }

    /// Item balance of `owner`'s wallet
    pub fn wallet_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64 {
        self.ledger.balance(&wallet_address(owner, mint))
    }

    /// Item balance of the pool custody account
    pub fn custody_balance(&self, nft_mint: &Pubkey) -> u64 {
        self.ledger.balance(&custody_address(nft_mint))
    }
}

/// Install a test subscriber once, honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}


/// Solvent instructions of a submitted transaction, in order
pub fn solvent_calls(tx: &Transaction) -> Vec<SolventInstruction> {
    let keys = &tx.message.account_keys;
    tx.message
        .instructions
        .iter()
        .filter(|ix| keys[usize::from(ix.program_id_index)] == SOLVENT_PROGRAM_ID)
        .filter_map(|ix| SolventInstruction::from_data(&ix.data))
        .collect()
}

/// The Solvent instruction closing a composed instruction list
pub fn last_solvent_instruction(instructions: &[Instruction]) -> &Instruction {
    let last = instructions.last().unwrap();
    assert_eq!(last.program_id, SOLVENT_PROGRAM_ID);
    last
}
