//! Solvent client
//!
//! Composes, packs and submits transactions for the Solvent collateral pools:
//! deposit items into a bucket for droplets, redeem them back, swap one for
//! another, or lock one for a time-bounded droplet loan.
//!
//! ```text
//!   caller ──▶ SolventClient::<op>
//!                 │  pda        derive every account address
//!                 │  accessor   fresh typed state reads
//!                 │  token      holding accounts, created idempotently
//!                 │  whitelist  membership proofs for whitelisted buckets
//!                 │  loan       principal / interest
//!                 ▼
//!              instructions ──▶ packing ──▶ Ledger::send_and_confirm_transaction
//! ```
//!
//! The ledger is a caller-supplied [`Ledger`] implementation. The library
//! logs through `tracing` and never installs a subscriber.

pub mod accessor;
pub mod actions;
pub mod config;
pub mod ledger;
pub mod loan;
pub mod packing;
pub mod pda;
pub mod token;
pub mod whitelist;

mod client;
mod error;

pub use accessor::SwapSession;
pub use actions::{
    DepositOptions, FarmAccounts, HoldingAccounts, ItemOptions, LockOptions, ProofSource,
    RedeemOptions, SwapOptions, SwapPlan,
};
pub use client::SolventClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind, Feature};
pub use ledger::{AccountFilter, Ledger, LedgerError};
pub use loan::LoanTerms;
pub use pda::{PdaKind, SolventPda};

pub use solvent_interface as interface;
