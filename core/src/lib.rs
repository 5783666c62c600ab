//! silverdesk-core — pricing desk for silver jewelry resale.
//!
//! The core is three layers over four caller-owned input records:
//!   1. Pricing engine (`pricing`) — pure arithmetic, no state:
//!      product-amount derivation, back-solved standard sale price,
//!      per-scenario profit decomposition.
//!   2. Scenario evaluator (`evaluator`) — canonical ordering plus
//!      one result per scenario.
//!   3. Scenario list policy (`policy`) — add/remove/rename rules and
//!      automatic repricing of system-priced scenarios.
//!
//! `session` ties the layers to the mutable state and `store`
//! persists it. Everything else a front end needs — rendering, input
//! masking, locale formatting, remote rate lookups — lives outside
//! this crate.

pub mod command;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod inputs;
pub mod policy;
pub mod pricing;
pub mod scenario;
pub mod session;
pub mod store;
pub mod types;
