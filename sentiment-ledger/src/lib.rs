#![deny(missing_docs)]
//! Allocation ledger for sentiment budgets.
//!
//! A being spreads an integer weight budget across subjects under a named
//! sentiment type. [`AllocationLedger`] persists those allocations in any
//! [`RecordStore`](sentiment_types::RecordStore), enforces the optional
//! per-write ceiling on the (being, type) total, and computes each
//! allocation's share at read time. [`SentimentProvider`] exposes the
//! ledger as a [`FractionSource`](sentiment_types::FractionSource) so peers
//! can learn shares without ever seeing raw weights.
//!
//! The record store offers no transactions, so the read-check-write
//! sequence of an upsert is serialized in-process per (being, type). Two
//! ledgers over one store do not see each other's locks.

mod config;
mod ledger;
mod locks;
mod model;
mod provider;

pub use config::LedgerConfig;
pub use ledger::{ALLOCATION_TABLE, AllocationLedger, BEING_TABLE};
pub use model::{Being, SentimentAllocation};
pub use provider::SentimentProvider;
