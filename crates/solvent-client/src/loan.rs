//! Locker loan economics.
//!
//! With `x` items in the bucket, `y` items in lockers counting the new one,
//! requested duration `D`, bucket max duration `M` and droplet unit `unit`:
//!
//! ```text
//! raw       = y * D * 100 * unit / (M * (x + y))
//! interest  = raw * scaler / 100
//! principal = 100 * unit - raw
//! ```
//!
//! All products are computed in `u128` with checked arithmetic and a single
//! floor division per line.

use solvent_interface::state::{BucketState, LockerState};
use solvent_interface::{DROPLETS_PER_NFT, LOCKERS_MAX_INTEREST_SCALER};

use crate::error::{ClientError, ClientResult};

/// Principal and maximum interest of a lock, in droplet smallest units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoanTerms {
    /// Droplets issued at lock time
    pub principal: u64,
    /// Interest owed at full duration
    pub max_interest: u64,
}

impl LoanTerms {
    /// Terms on a bucket with locking disabled.
    pub const ZERO: Self = Self {
        principal: 0,
        max_interest: 0,
    };
}

fn overflow(operation: &'static str) -> ClientError {
    ClientError::ArithmeticOverflow { operation }
}

fn mul(a: u128, b: u128, operation: &'static str) -> ClientResult<u128> {
    a.checked_mul(b).ok_or_else(|| overflow(operation))
}

/// Loan terms for locking one more item in `bucket` for `duration` seconds.
///
/// # Errors
/// Returns [`ClientError::LockDurationOutOfBounds`] when `duration` exceeds
/// the bucket maximum or the maximum is zero, and
/// [`ClientError::ArithmeticOverflow`] when a result does not fit in `u64`.
pub fn calculate_loan(bucket: &BucketState, duration: u64, unit: u64) -> ClientResult<LoanTerms> {
    if !bucket.is_locking_enabled {
        return Ok(LoanTerms::ZERO);
    }
    let max_duration = bucket.max_locker_duration;
    if max_duration == 0 || duration > max_duration {
        return Err(ClientError::LockDurationOutOfBounds {
            duration,
            max_duration,
        });
    }

    let x = u128::from(bucket.num_nfts_in_bucket);
    let y = u128::from(bucket.num_nfts_in_lockers) + 1;
    let per_nft = mul(u128::from(DROPLETS_PER_NFT), u128::from(unit), "droplets per item")?;

    let numerator = mul(mul(y, u128::from(duration), "raw interest")?, per_nft, "raw interest")?;
    let denominator = mul(u128::from(max_duration), x + y, "raw interest")?;
    let raw_interest = numerator / denominator;

    let scaled_interest = mul(raw_interest, u128::from(bucket.interest_scaler), "scaled interest")?
        / u128::from(LOCKERS_MAX_INTEREST_SCALER);
    // D <= M and y <= x + y bound raw_interest by per_nft
    let principal = per_nft - raw_interest;

    Ok(LoanTerms {
        principal: u64::try_from(principal).map_err(|_| overflow("principal"))?,
        max_interest: u64::try_from(scaled_interest).map_err(|_| overflow("scaled interest"))?,
    })
}

/// Estimated amount owed to unlock `locker` at `now` (unix seconds).
///
/// Interest accrues linearly over the lock duration, and elapsed time is
/// clamped to `[0, duration]`. This is an estimate for display: the program
/// computes the settlement amount itself.
pub fn estimate_repayment(locker: &LockerState, now: i64) -> u64 {
    let duration = u128::from(locker.duration);
    let elapsed = u128::try_from(now.saturating_sub(locker.creation_timestamp))
        .unwrap_or(0)
        .min(duration);

    let accrued = if duration == 0 {
        u128::from(locker.max_interest_payable)
    } else {
        u128::from(locker.max_interest_payable) * elapsed / duration
    };
    // accrued <= max_interest_payable, so the sum fits in u128 and saturates to u64
    u64::try_from(u128::from(locker.principal_amount) + accrued).unwrap_or(u64::MAX)
}
