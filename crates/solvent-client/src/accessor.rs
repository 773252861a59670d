//! Read-only typed fetches of Solvent accounts.
//!
//! Every call reads the ledger fresh. Nothing is cached between calls.

use solana_pubkey::Pubkey;
use solvent_interface::state::{
    AccountSchema, BucketState, DepositState, FIRST_KEY_OFFSET, LockerState,
    SWAP_DROPLET_MINT_OFFSET, SwapState,
};

use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::ledger::{AccountFilter, Ledger};
use crate::pda::{find_bucket, find_deposit, find_locker, find_swap};

/// Fetch and decode one account, `None` when it does not exist.
///
/// # Errors
/// Returns [`ClientError::AccountDecode`] for data of another schema and
/// transport errors from the ledger.
pub async fn fetch_optional<T: AccountSchema, L: Ledger + ?Sized>(
    ledger: &L,
    address: &Pubkey,
) -> ClientResult<Option<T>> {
    let Some(account) = ledger.get_account(address).await? else {
        return Ok(None);
    };
    T::try_from_account_data(&account.data)
        .map(Some)
        .map_err(|source| ClientError::AccountDecode {
            address: *address,
            source,
        })
}

/// Fetch and decode one account that must exist.
///
/// # Errors
/// Returns [`ClientError::AccountNotFound`] when missing, otherwise as
/// [`fetch_optional`].
pub async fn fetch<T: AccountSchema, L: Ledger + ?Sized>(ledger: &L, address: &Pubkey) -> ClientResult<T> {
    fetch_optional(ledger, address)
        .await?
        .ok_or(ClientError::AccountNotFound { address: *address })
}

/// Scan program accounts of one schema, with extra filters.
///
/// Accounts whose data does not decode are skipped with a warning.
///
/// # Errors
/// Returns transport errors from the ledger.
pub async fn fetch_all<T: AccountSchema, L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    mut filters: Vec<AccountFilter>,
) -> ClientResult<Vec<(Pubkey, T)>> {
    filters.insert(
        0,
        AccountFilter::Memcmp {
            offset: 0,
            bytes: T::discriminator().to_vec(),
        },
    );
    let accounts = ledger.get_program_accounts(&config.program_id, &filters).await?;
    Ok(accounts
        .into_iter()
        .filter_map(|(address, account)| match T::try_from_account_data(&account.data) {
            Ok(state) => Some((address, state)),
            Err(error) => {
                warn!(%address, schema = T::NAME, %error, "skipping undecodable account");
                None
            }
        })
        .collect())
}

fn droplet_filter(droplet_mint: Option<&Pubkey>, offset: usize) -> Option<AccountFilter> {
    droplet_mint.map(|mint| AccountFilter::memcmp_key(offset, mint))
}

// ============================================================================
// Buckets
// ============================================================================

/// Bucket state of `droplet_mint`.
///
/// # Errors
/// Returns [`ClientError::AccountNotFound`] when the bucket does not exist.
pub async fn get_bucket<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    droplet_mint: &Pubkey,
) -> ClientResult<BucketState> {
    let (address, _) = find_bucket(droplet_mint, config)?;
    fetch(ledger, &address).await
}

/// Every bucket.
///
/// # Errors
/// Returns transport errors from the ledger.
pub async fn get_all_buckets<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
) -> ClientResult<Vec<(Pubkey, BucketState)>> {
    fetch_all(ledger, config, Vec::new()).await
}

// ============================================================================
// Deposits
// ============================================================================

/// Deposit state of an item.
///
/// # Errors
/// Returns [`ClientError::AccountNotFound`] when the item is not deposited.
pub async fn get_deposit<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    droplet_mint: &Pubkey,
    nft_mint: &Pubkey,
) -> ClientResult<DepositState> {
    let (address, _) = find_deposit(droplet_mint, nft_mint, config)?;
    fetch(ledger, &address).await
}

/// Every deposit, optionally of one bucket.
///
/// # Errors
/// Returns transport errors from the ledger.
pub async fn get_all_deposits<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    droplet_mint: Option<&Pubkey>,
) -> ClientResult<Vec<(Pubkey, DepositState)>> {
    let filters = droplet_filter(droplet_mint, FIRST_KEY_OFFSET).into_iter().collect();
    fetch_all(ledger, config, filters).await
}

// ============================================================================
// Lockers
// ============================================================================

/// Locker state of an item.
///
/// # Errors
/// Returns [`ClientError::AccountNotFound`] when the item is not locked.
pub async fn get_locker<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    droplet_mint: &Pubkey,
    nft_mint: &Pubkey,
) -> ClientResult<LockerState> {
    let (address, _) = find_locker(droplet_mint, nft_mint, config)?;
    fetch(ledger, &address).await
}

/// Every locker, optionally of one bucket.
///
/// # Errors
/// Returns transport errors from the ledger.
pub async fn get_all_lockers<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    droplet_mint: Option<&Pubkey>,
) -> ClientResult<Vec<(Pubkey, LockerState)>> {
    let filters = droplet_filter(droplet_mint, FIRST_KEY_OFFSET).into_iter().collect();
    fetch_all(ledger, config, filters).await
}

// ============================================================================
// Swaps
// ============================================================================

/// Swap session of a party on a bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapSession {
    /// No deposit leg outstanding
    Idle,
    /// Deposit leg done, exactly one redemption owed
    DepositedAwaitingRedeem,
}

impl SwapSession {
    /// Session implied by a swap state (or its absence).
    pub fn from_state(state: Option<&SwapState>) -> Self {
        match state {
            Some(swap) if swap.flag => Self::DepositedAwaitingRedeem,
            _ => Self::Idle,
        }
    }
}

/// Swap state of a party, `None` if the party never swapped on the bucket.
///
/// # Errors
/// Returns [`ClientError::AccountDecode`] for corrupt data.
pub async fn get_swap<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    droplet_mint: &Pubkey,
    signer: &Pubkey,
) -> ClientResult<Option<SwapState>> {
    let (address, _) = find_swap(droplet_mint, signer, config)?;
    fetch_optional(ledger, &address).await
}

/// Every swap state, optionally of one bucket and/or one party.
///
/// # Errors
/// Returns transport errors from the ledger.
pub async fn get_all_swaps<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    droplet_mint: Option<&Pubkey>,
    signer: Option<&Pubkey>,
) -> ClientResult<Vec<(Pubkey, SwapState)>> {
    let filters = droplet_filter(droplet_mint, SWAP_DROPLET_MINT_OFFSET)
        .into_iter()
        .chain(signer.map(|signer| AccountFilter::memcmp_key(FIRST_KEY_OFFSET, signer)))
        .collect();
    fetch_all(ledger, config, filters).await
}

/// Current swap session of a party, read fresh.
///
/// # Errors
/// As [`get_swap`].
pub async fn get_swap_session<L: Ledger + ?Sized>(
    ledger: &L,
    config: &ClientConfig,
    droplet_mint: &Pubkey,
    signer: &Pubkey,
) -> ClientResult<SwapSession> {
    let swap = get_swap(ledger, config, droplet_mint, signer).await?;
    Ok(SwapSession::from_state(swap.as_ref()))
}
