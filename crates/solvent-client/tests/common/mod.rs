//! Shared test helpers for solvent-client tests.
//!
//! - `ledger`: In-memory ledger modelling deposits and redemptions
//! - `setup`: Test environment and bucket fixtures
//! - `pda`: Address helpers
//! - `mock_accounts`: Mock SPL token/mint and program accounts

#![allow(dead_code)]

pub mod ledger;
pub mod mock_accounts;
pub mod pda;
pub mod setup;

pub use ledger::*;
pub use mock_accounts::*;
pub use pda::*;
pub use setup::*;
