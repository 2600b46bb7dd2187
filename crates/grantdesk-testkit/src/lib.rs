//! # Grantdesk Testkit
//!
//! Testing utilities for grantdesk.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A catalog covering every standard module, a shared RSA
//!   test key, and [`MemoryBackend`], an in-memory backend with call counters
//! - **Generators**: Proptest strategies for grant sets and identifier sets
//! - **Scenarios**: Canonical reconciliation cases with expected deltas
//!
//! ## Scenarios
//!
//! ```rust
//! use grantdesk_core::ModuleCatalog;
//! use grantdesk_perms::{merge_role_change, resolve_working_ids};
//! use grantdesk_testkit::all_scenarios;
//!
//! for scenario in all_scenarios() {
//!     let working = resolve_working_ids(&scenario.working, ModuleCatalog::standard(), &scenario.catalog).unwrap();
//!     let delta = merge_role_change(&scenario.original, scenario.role_changed, &working);
//!     assert_eq!(delta.added, scenario.expected_added, "{}", scenario.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use grantdesk_testkit::generators::{grant_set, id_set};
//!
//! proptest! {
//!     #[test]
//!     fn delta_is_idempotent(working in grant_set(20)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod scenarios;

pub use fixtures::{
    ids, standard_catalog, standard_catalog_entries, KeyReply, MemoryBackend, TestKey,
};
pub use scenarios::{all_scenarios, Scenario};
