//! Packing instruction groups into the fewest transactions.

use solana_instruction::Instruction;
use solana_message::Message;
use solana_pubkey::Pubkey;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

const SIGNATURE_LEN: usize = 64;
const PUBKEY_LEN: usize = 32;
const BLOCKHASH_LEN: usize = 32;
const MESSAGE_HEADER_LEN: usize = 3;

/// Encoded length of a compact-u16.
fn compact_len(value: usize) -> usize {
    match value {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        _ => 3,
    }
}

/// Serialized size of a signed legacy transaction carrying `instructions`.
pub fn transaction_size(instructions: &[Instruction], payer: &Pubkey) -> usize {
    let message = Message::new(instructions, Some(payer));
    let signatures = usize::from(message.header.num_required_signatures);
    let keys = message.account_keys.len();

    let compiled: usize = message
        .instructions
        .iter()
        .map(|ix| {
            1 + compact_len(ix.accounts.len())
                + ix.accounts.len()
                + compact_len(ix.data.len())
                + ix.data.len()
        })
        .sum();

    compact_len(signatures)
        + signatures * SIGNATURE_LEN
        + MESSAGE_HEADER_LEN
        + compact_len(keys)
        + keys * PUBKEY_LEN
        + BLOCKHASH_LEN
        + compact_len(message.instructions.len())
        + compiled
}

/// Merge consecutive groups into as few transactions as fit under `limit`.
///
/// Groups are never split or reordered. Empty groups are dropped.
///
/// # Errors
/// Returns [`ClientError::TransactionTooLarge`] when a single group does not
/// fit on its own.
pub fn pack_ordered(
    groups: Vec<Vec<Instruction>>,
    payer: &Pubkey,
    limit: usize,
) -> ClientResult<Vec<Vec<Instruction>>> {
    let mut packed: Vec<Vec<Instruction>> = Vec::new();
    for group in groups.into_iter().filter(|group| !group.is_empty()) {
        let size = transaction_size(&group, payer);
        if size > limit {
            return Err(ClientError::TransactionTooLarge { size, limit });
        }

        if let Some(current) = packed.last_mut() {
            let mut merged = current.clone();
            merged.extend(group.iter().cloned());
            let merged_size = transaction_size(&merged, payer);
            if merged_size <= limit {
                *current = merged;
                continue;
            }
            debug!(merged_size, limit, "group does not fit, starting a new transaction");
        }
        packed.push(group);
    }
    Ok(packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_instruction::AccountMeta;

    fn ix(program: u8, accounts: &[u8], data_len: usize) -> Instruction {
        Instruction {
            program_id: Pubkey::new_from_array([program; 32]),
            accounts: accounts
                .iter()
                .map(|b| AccountMeta::new(Pubkey::new_from_array([*b; 32]), false))
                .collect(),
            data: vec![0u8; data_len],
        }
    }

    #[test]
    fn test_compact_len_boundaries() {
        assert_eq!(compact_len(0x7f), 1);
        assert_eq!(compact_len(0x80), 2);
        assert_eq!(compact_len(0x3fff), 2);
        assert_eq!(compact_len(0x4000), 3);
    }

    #[test]
    fn test_size_of_single_instruction() {
        let payer = Pubkey::new_from_array([200; 32]);
        // keys: payer, account 1, program 100
        let size = transaction_size(&[ix(100, &[1], 10)], &payer);
        let expected = 1 + 64 + 3 + 1 + 3 * 32 + 32 + 1 + (1 + 1 + 1 + 1 + 10);
        assert_eq!(size, expected);
    }

    #[test]
    fn test_small_groups_share_a_transaction() {
        let payer = Pubkey::new_from_array([200; 32]);
        let groups = vec![vec![ix(100, &[1], 10)], vec![ix(100, &[2], 10)]];
        let packed = pack_ordered(groups, &payer, 1232).unwrap();
        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0].len(), 2);
    }

    #[test]
    fn test_groups_split_in_order_when_over_limit() {
        let payer = Pubkey::new_from_array([200; 32]);
        let first = vec![ix(100, &[1, 2, 3], 600)];
        let second = vec![ix(101, &[4, 5, 6], 600)];
        let packed = pack_ordered(vec![first.clone(), second.clone()], &payer, 1232).unwrap();
        assert_eq!(packed, vec![first, second]);
    }

    #[test]
    fn test_oversized_group_is_rejected() {
        let payer = Pubkey::new_from_array([200; 32]);
        let err = pack_ordered(vec![vec![ix(100, &[1], 1300)]], &payer, 1232).unwrap_err();
        assert!(matches!(err, ClientError::TransactionTooLarge { limit: 1232, .. }));
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let payer = Pubkey::new_from_array([200; 32]);
        let packed = pack_ordered(vec![vec![], vec![ix(100, &[1], 1)]], &payer, 1232).unwrap();
        assert_eq!(packed.len(), 1);
    }
}
