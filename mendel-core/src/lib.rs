//! # mendel-core
//!
//! Data model shared by the mendel crates.
//!
//! A trait moves through three shapes on its way from an editing surface to the backend:
//!
//! - **`TraitDraft`**: the mutable, row-oriented form a user types into. Rows may be blank,
//!   duplicated or malformed while editing is in progress.
//! - **`TraitPayload`** / **`TraitUpdatePayload`**: what gets sent to the API on create/update.
//! - **`Trait`**: the backend-owned record, read back through [`models::TraitListResponse`]
//!   and normalized once at the boundary.
//!
//! Validation outcomes are data ([`GenotypeError`] collected in a [`ValidationReport`]),
//! never panics or `Err` returns.
//!
//! ## Example
//!
//! ```rust
//! use mendel_core::models::PhenotypeMap;
//!
//! let mut map = PhenotypeMap::new();
//! map.insert("BB", "Brown");
//! map.insert("bb", "Blue");
//!
//! assert_eq!(map.get("bb"), Some("Blue"));
//! assert_eq!(map.keys().collect::<Vec<_>>(), vec!["BB", "bb"]);
//! ```
//!
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::*;
