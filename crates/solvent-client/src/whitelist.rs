//! Whitelist tree over permitted item mints.
//!
//! Leaves are `keccak256(mint)`, deduplicated and sorted. Each level hashes
//! sibling pairs with the smaller hash first, and an unpaired last node is
//! carried up unchanged. A single leaf is its own root. Because both the leaf
//! set and every pair are order-normalized, the root depends only on the set of
//! mints, never on the order they were supplied in.

use sha3::{Digest, Keccak256};
use solana_pubkey::Pubkey;

use crate::error::{ClientError, ClientResult};

/// 32-byte tree node.
pub type Node = [u8; 32];

/// Leaf hash of an item mint.
pub fn leaf_hash(item: &Pubkey) -> Node {
    Keccak256::digest(item.as_ref()).into()
}

/// Hash of two siblings, order-normalized.
pub fn hash_pair(a: &Node, b: &Node) -> Node {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(lo);
    hasher.update(hi);
    hasher.finalize().into()
}

/// Whitelist tree built in memory, never persisted.
#[derive(Clone, Debug)]
pub struct WhitelistTree {
    /// `levels[0]` holds the sorted leaves, the last level holds the root.
    levels: Vec<Vec<Node>>,
}

impl WhitelistTree {
    /// Build the tree over `items`.
    ///
    /// # Errors
    /// Returns [`ClientError::EmptyWhitelist`] when `items` is empty.
    pub fn build<'a, I>(items: I) -> ClientResult<Self>
    where
        I: IntoIterator<Item = &'a Pubkey>,
    {
        let mut leaves: Vec<Node> = items.into_iter().map(leaf_hash).collect();
        leaves.sort_unstable();
        leaves.dedup();
        if leaves.is_empty() {
            return Err(ClientError::EmptyWhitelist);
        }

        let mut levels = vec![leaves];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let next = level
                .chunks(2)
                // odd node out is promoted unchanged
                .map(|pair| pair.get(1).map_or(pair[0], |b| hash_pair(&pair[0], b)))
                .collect();
            levels.push(next);
        }
        Ok(Self { levels })
    }

    /// Tree root.
    pub fn root(&self) -> Node {
        // build() never produces an empty tree
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_default()
    }

    /// Number of distinct leaves.
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Always false for a built tree.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership proof for `item`, leaf to root.
    ///
    /// # Errors
    /// Returns [`ClientError::NotAMember`] when `item` is not a leaf.
    pub fn prove(&self, item: &Pubkey) -> ClientResult<Vec<Node>> {
        let leaf = leaf_hash(item);
        let mut index = self
            .levels
            .first()
            .and_then(|leaves| leaves.binary_search(&leaf).ok())
            .ok_or(ClientError::NotAMember { item: *item })?;

        let mut proof = Vec::with_capacity(self.levels.len().saturating_sub(1));
        for level in &self.levels[..self.levels.len() - 1] {
            if let Some(sibling) = level.get(index ^ 1) {
                proof.push(*sibling);
            }
            index /= 2;
        }
        Ok(proof)
    }

    /// Compare the root with the one committed in a bucket.
    ///
    /// # Errors
    /// Returns [`ClientError::WhitelistRootMismatch`] when they differ.
    pub fn check_root(&self, committed: &Node) -> ClientResult<()> {
        let computed = self.root();
        if &computed != committed {
            return Err(ClientError::WhitelistRootMismatch {
                committed: *committed,
                computed,
            });
        }
        Ok(())
    }
}

/// Build a tree and return it with its root.
///
/// # Errors
/// See [`WhitelistTree::build`].
pub fn build_tree(items: &[Pubkey]) -> ClientResult<(Node, WhitelistTree)> {
    let tree = WhitelistTree::build(items)?;
    Ok((tree.root(), tree))
}

/// Membership proof of `target` within `items`.
///
/// # Errors
/// Returns [`ClientError::NotAMember`] when `target` is not in `items`, or
/// [`ClientError::EmptyWhitelist`] when `items` is empty.
pub fn prove(items: &[Pubkey], target: &Pubkey) -> ClientResult<Vec<Node>> {
    WhitelistTree::build(items)?.prove(target)
}

/// Re-hash a proof from leaf to root.
///
/// Only used for diagnostics: the program performs the authoritative check.
pub fn verify_proof(root: &Node, item: &Pubkey, proof: &[Node]) -> bool {
    let computed = proof
        .iter()
        .fold(leaf_hash(item), |node, sibling| hash_pair(&node, sibling));
    &computed == root
}
