//! Holding account resolution.
//!
//! Holding accounts are associated token accounts. Creation uses the
//! idempotent ATA instruction, so a creation instruction emitted for an
//! account that appeared in the meantime is a no-op inside the same
//! transaction. Creation must always be bundled with the operation that needs
//! the account.

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;
use solvent_interface::{ASSOCIATED_TOKEN_PROGRAM_ID, SPL_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::ledger::Ledger;

/// Packed length of an SPL token account.
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// Offset of `amount` in an SPL token account (`mint(32) + owner(32)`).
pub const TOKEN_ACCOUNT_AMOUNT_OFFSET: usize = 64;

/// `CreateIdempotent` tag of the associated token account program.
const CREATE_IDEMPOTENT: u8 = 1;

/// Decode the amount of an SPL token account.
pub fn token_account_amount(data: &[u8]) -> Option<u64> {
    let bytes = data.get(TOKEN_ACCOUNT_AMOUNT_OFFSET..TOKEN_ACCOUNT_AMOUNT_OFFSET + 8)?;
    bytes.try_into().ok().map(u64::from_le_bytes)
}

/// Associated token account of `owner` for `mint`.
///
/// # Errors
/// Returns [`ClientError::InvalidSeed`] when `owner` is off curve (a PDA) and
/// `allow_off_curve` is false.
pub fn associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
    allow_off_curve: bool,
) -> ClientResult<Pubkey> {
    if !allow_off_curve && !owner.is_on_curve() {
        return Err(ClientError::InvalidSeed {
            reason: format!("owner {owner} is off curve"),
        });
    }
    let (address, _) = Pubkey::find_program_address(
        &[owner.as_ref(), SPL_TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    );
    Ok(address)
}

/// Idempotent associated token account creation.
pub fn create_associated_token_account_idempotent(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    address: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*address, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(SPL_TOKEN_PROGRAM_ID, false),
        ],
        data: vec![CREATE_IDEMPOTENT],
    }
}

/// A resolved holding account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoldingAccount {
    /// Deterministic address
    pub address: Pubkey,
    /// Creation instruction when the account did not exist at read time
    pub create: Option<Instruction>,
}

impl HoldingAccount {
    /// Account known to exist (caller supplied).
    pub fn existing(address: Pubkey) -> Self {
        Self {
            address,
            create: None,
        }
    }
}

/// Resolve `owner`'s holding account for `mint`.
///
/// # Errors
/// Returns [`ClientError::InvalidSeed`] for a disallowed off-curve owner and
/// [`ClientError::AccountResolutionFailure`] when the existence check fails.
pub async fn resolve_holding_account<L: Ledger + ?Sized>(
    ledger: &L,
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    allow_off_curve: bool,
) -> ClientResult<HoldingAccount> {
    let address = associated_token_address(owner, mint, allow_off_curve)?;
    let exists = ledger
        .get_account(&address)
        .await
        .map_err(|e| ClientError::resolution(address, e))?
        .is_some();

    let create = (!exists).then(|| {
        debug!(%address, %owner, %mint, "holding account missing, scheduling creation");
        create_associated_token_account_idempotent(payer, owner, mint, &address)
    });
    Ok(HoldingAccount { address, create })
}

/// Collect the creation instructions of several holding accounts, in order.
pub fn creation_instructions<'a, I>(accounts: I) -> Vec<Instruction>
where
    I: IntoIterator<Item = &'a HoldingAccount>,
{
    accounts
        .into_iter()
        .filter_map(|account| account.create.clone())
        .collect()
}
