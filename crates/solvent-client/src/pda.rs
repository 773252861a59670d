//! Address derivation for every Solvent sub-account.
//!
//! Seed layouts live in [`solvent_interface::seeds`]. Derivation is pure: the
//! same inputs always map to the same address, and no ledger reads happen here.

use core::str::FromStr;

use solana_pubkey::Pubkey;
use solvent_interface::seeds::{
    AUTHORITY_SEED, BUCKET_SEED, DEPOSIT_SEED, FARMER_AUTHORITY_SEED, LOCKER_SEED, METADATA_SEED,
    SWAP_SEED,
};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Kind of derived address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PdaKind {
    /// Pool authority owning every custody account
    Authority,
    /// Bucket state
    Bucket,
    /// Deposit state
    Deposit,
    /// Locker state
    Locker,
    /// Swap state
    Swap,
    /// Farmer authority used when staking an item
    FarmerAuthority,
    /// Item metadata (token metadata program)
    Metadata,
}

impl PdaKind {
    /// Number of 32-byte key parts the kind takes.
    pub const fn key_count(self) -> usize {
        match self {
            Self::Authority => 0,
            Self::Bucket | Self::FarmerAuthority | Self::Metadata => 1,
            Self::Deposit | Self::Locker | Self::Swap => 2,
        }
    }
}

/// A Solvent program derived address with its inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolventPda {
    /// `["authority-seed"]`
    Authority,
    /// `[droplet_mint, "bucket-seed-v3"]`
    Bucket {
        /// Droplet mint
        droplet_mint: Pubkey,
    },
    /// `[droplet_mint, nft_mint, "deposit-seed"]`
    Deposit {
        /// Droplet mint
        droplet_mint: Pubkey,
        /// Item mint
        nft_mint: Pubkey,
    },
    /// `[droplet_mint, nft_mint, "locker-seed"]`
    Locker {
        /// Droplet mint
        droplet_mint: Pubkey,
        /// Item mint
        nft_mint: Pubkey,
    },
    /// `[droplet_mint, signer, "swap-seed"]`
    Swap {
        /// Droplet mint
        droplet_mint: Pubkey,
        /// Swapping party
        signer: Pubkey,
    },
    /// `["farmer-authority-seed", nft_mint]`
    FarmerAuthority {
        /// Item mint
        nft_mint: Pubkey,
    },
    /// `["metadata", metadata_program, nft_mint]`
    Metadata {
        /// Item mint
        nft_mint: Pubkey,
    },
}

impl SolventPda {
    /// Kind of this address.
    pub fn kind(&self) -> PdaKind {
        match self {
            Self::Authority => PdaKind::Authority,
            Self::Bucket { .. } => PdaKind::Bucket,
            Self::Deposit { .. } => PdaKind::Deposit,
            Self::Locker { .. } => PdaKind::Locker,
            Self::Swap { .. } => PdaKind::Swap,
            Self::FarmerAuthority { .. } => PdaKind::FarmerAuthority,
            Self::Metadata { .. } => PdaKind::Metadata,
        }
    }

    /// Program the address is derived under.
    pub fn program_id(&self, config: &ClientConfig) -> Pubkey {
        match self {
            Self::Metadata { .. } => config.token_metadata_program_id,
            _ => config.program_id,
        }
    }

    /// Derive the address and bump.
    ///
    /// # Errors
    /// Returns [`ClientError::AddressDerivation`] if no bump yields an
    /// off-curve address.
    pub fn find(&self, config: &ClientConfig) -> ClientResult<(Pubkey, u8)> {
        let program_id = self.program_id(config);
        let found = match self {
            Self::Authority => Pubkey::try_find_program_address(&[AUTHORITY_SEED], &program_id),
            Self::Bucket { droplet_mint } => {
                Pubkey::try_find_program_address(&[droplet_mint.as_ref(), BUCKET_SEED], &program_id)
            }
            Self::Deposit {
                droplet_mint,
                nft_mint,
            } => Pubkey::try_find_program_address(
                &[droplet_mint.as_ref(), nft_mint.as_ref(), DEPOSIT_SEED],
                &program_id,
            ),
            Self::Locker {
                droplet_mint,
                nft_mint,
            } => Pubkey::try_find_program_address(
                &[droplet_mint.as_ref(), nft_mint.as_ref(), LOCKER_SEED],
                &program_id,
            ),
            Self::Swap {
                droplet_mint,
                signer,
            } => Pubkey::try_find_program_address(
                &[droplet_mint.as_ref(), signer.as_ref(), SWAP_SEED],
                &program_id,
            ),
            Self::FarmerAuthority { nft_mint } => Pubkey::try_find_program_address(
                &[FARMER_AUTHORITY_SEED, nft_mint.as_ref()],
                &program_id,
            ),
            Self::Metadata { nft_mint } => Pubkey::try_find_program_address(
                &[METADATA_SEED, program_id.as_ref(), nft_mint.as_ref()],
                &program_id,
            ),
        };

        let (address, bump) = found.ok_or(ClientError::AddressDerivation {
            kind: self.kind(),
            program_id,
        })?;
        debug!(kind = ?self.kind(), %address, bump, "derived address");
        Ok((address, bump))
    }

    /// Derive the address only.
    ///
    /// # Errors
    /// See [`SolventPda::find`].
    pub fn address(&self, config: &ClientConfig) -> ClientResult<Pubkey> {
        self.find(config).map(|(address, _)| address)
    }
}

/// Derive an address from raw key parts.
///
/// `keys` are the 32-byte inputs of the kind in seed order (the fixed tags are
/// added here).
///
/// # Errors
/// Returns [`ClientError::InvalidSeed`] when the number of parts is wrong for
/// the kind or a part is not 32 bytes long.
pub fn derive(kind: PdaKind, keys: &[&[u8]], config: &ClientConfig) -> ClientResult<Pubkey> {
    if keys.len() != kind.key_count() {
        return Err(ClientError::InvalidSeed {
            reason: format!(
                "{kind:?} takes {} key parts, got {}",
                kind.key_count(),
                keys.len()
            ),
        });
    }
    let mut parsed = [Pubkey::default(); 2];
    for (slot, part) in parsed.iter_mut().zip(keys) {
        let bytes: [u8; 32] = (*part).try_into().map_err(|_| ClientError::InvalidSeed {
            reason: format!("{kind:?} key part must be 32 bytes, got {}", part.len()),
        })?;
        *slot = Pubkey::new_from_array(bytes);
    }
    let [a, b] = parsed;

    let pda = match kind {
        PdaKind::Authority => SolventPda::Authority,
        PdaKind::Bucket => SolventPda::Bucket { droplet_mint: a },
        PdaKind::Deposit => SolventPda::Deposit {
            droplet_mint: a,
            nft_mint: b,
        },
        PdaKind::Locker => SolventPda::Locker {
            droplet_mint: a,
            nft_mint: b,
        },
        PdaKind::Swap => SolventPda::Swap {
            droplet_mint: a,
            signer: b,
        },
        PdaKind::FarmerAuthority => SolventPda::FarmerAuthority { nft_mint: a },
        PdaKind::Metadata => SolventPda::Metadata { nft_mint: a },
    };
    pda.address(config)
}

/// Parse a base58 address.
///
/// # Errors
/// Returns [`ClientError::InvalidSeed`] on malformed base58 or wrong length.
pub fn parse_address(s: &str) -> ClientResult<Pubkey> {
    Pubkey::from_str(s).map_err(|e| ClientError::InvalidSeed {
        reason: format!("invalid address {s:?}: {e}"),
    })
}

// ============================================================================
// Shorthands
// ============================================================================

/// Derive the pool authority PDA.
///
/// # Errors
/// See [`SolventPda::find`].
pub fn find_authority(config: &ClientConfig) -> ClientResult<(Pubkey, u8)> {
    SolventPda::Authority.find(config)
}

/// Derive a bucket state PDA.
///
/// # Errors
/// See [`SolventPda::find`].
pub fn find_bucket(droplet_mint: &Pubkey, config: &ClientConfig) -> ClientResult<(Pubkey, u8)> {
    SolventPda::Bucket {
        droplet_mint: *droplet_mint,
    }
    .find(config)
}

/// Derive a deposit state PDA.
///
/// # Errors
/// See [`SolventPda::find`].
pub fn find_deposit(
    droplet_mint: &Pubkey,
    nft_mint: &Pubkey,
    config: &ClientConfig,
) -> ClientResult<(Pubkey, u8)> {
    SolventPda::Deposit {
        droplet_mint: *droplet_mint,
        nft_mint: *nft_mint,
    }
    .find(config)
}

/// Derive a locker state PDA.
///
/// # Errors
/// See [`SolventPda::find`].
pub fn find_locker(
    droplet_mint: &Pubkey,
    nft_mint: &Pubkey,
    config: &ClientConfig,
) -> ClientResult<(Pubkey, u8)> {
    SolventPda::Locker {
        droplet_mint: *droplet_mint,
        nft_mint: *nft_mint,
    }
    .find(config)
}

/// Derive a swap state PDA.
///
/// # Errors
/// See [`SolventPda::find`].
pub fn find_swap(
    droplet_mint: &Pubkey,
    signer: &Pubkey,
    config: &ClientConfig,
) -> ClientResult<(Pubkey, u8)> {
    SolventPda::Swap {
        droplet_mint: *droplet_mint,
        signer: *signer,
    }
    .find(config)
}

/// Derive a farmer authority PDA.
///
/// # Errors
/// See [`SolventPda::find`].
pub fn find_farmer_authority(nft_mint: &Pubkey, config: &ClientConfig) -> ClientResult<(Pubkey, u8)> {
    SolventPda::FarmerAuthority {
        nft_mint: *nft_mint,
    }
    .find(config)
}

/// Derive an item metadata PDA.
///
/// # Errors
/// See [`SolventPda::find`].
pub fn find_metadata(nft_mint: &Pubkey, config: &ClientConfig) -> ClientResult<(Pubkey, u8)> {
    SolventPda::Metadata {
        nft_mint: *nft_mint,
    }
    .find(config)
}
