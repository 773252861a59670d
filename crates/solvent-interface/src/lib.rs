//! Solvent Program Interface
//!
//! Shared types describing how off-chain code talks to the deployed Solvent
//! program. Nothing in this crate performs I/O.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      solvent-client                          │
//! │  • Address derivation, whitelist proofs                      │
//! │  • Holding account resolution                                │
//! │  • Loan economics, transaction packing                       │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     solvent-interface                        │
//! │  • Seeds and program IDs                                     │
//! │  • Account schemas (bucket, deposit, locker, swap)           │
//! │  • Instruction discriminators and account layouts            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`seeds`]: PDA seed constants
//! - [`state`]: Account schemas decoded from fetched account data
//! - [`instructions`]: Instruction builders for every Solvent instruction
//! - [`error`]: Account decoding errors
//! - [`program_ids`]: Program and treasury address constants

pub mod instructions;
pub mod seeds;
pub mod state;

mod error;
mod program_ids;
mod types;

pub use error::*;
pub use program_ids::*;
pub use types::*;
