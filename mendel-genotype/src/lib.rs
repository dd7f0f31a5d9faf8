//! # mendel-genotype
//!
//! Validation and normalization for Mendelian genotype data entered by hand.
//!
//! ## Flow
//!
//! An editing surface collects raw strings and runs them through:
//!
//! - **`codec`**: sanitizes keystrokes and canonicalizes allele pairs
//! - **`pairs`**: enumerates every genotype an allele set implies
//! - **`validator`**: compares expected genotypes against the rows the user typed
//! - **`form`**: assembles the create/update payload once validation passes
//!
//! Everything here is synchronous and pure apart from logging; validators report
//! problems as data and never panic on user input.
//!
//! ## Example
//!
//! ```rust
//! use mendel_core::models::{TraitMetadata, TraitRow};
//! use mendel_genotype::{PhenotypeMapValidator, TraitFormCodec};
//!
//! let rows = vec![
//!     TraitRow::new("BB", "Brown"),
//!     TraitRow::new("Bb", "Brown"),
//!     TraitRow::new("bb", "Blue"),
//! ];
//!
//! let report = PhenotypeMapValidator::default().validate(&rows);
//! assert!(report.passed());
//!
//! let metadata = TraitMetadata { name: "Eye Color".to_string(), ..Default::default() };
//! let payload = TraitFormCodec::default().to_payload(&rows, &metadata, None);
//! assert_eq!(payload.key, "eye_color");
//! assert_eq!(payload.alleles, vec!["B", "b"]);
//! ```
//!
pub mod alphabet;
pub mod codec;
pub mod config;
pub mod error;
pub mod form;
pub mod pairs;
pub mod payload_check;
pub mod placeholder;
pub mod validator;

// re-export things
pub use alphabet::AlleleAlphabet;
pub use codec::{
    SanitizeOutcome, SanitizeStatus, candidate_keys, canonicalize, canonicalize_genotype,
    lookup_phenotype, sanitize, sanitize_with_outcome, split_pair,
};
pub use config::{ConfigError, EditorConfig, KeyPolicy, PlaceholderConfig};
pub use error::{DraftError, DraftResult};
pub use form::{TraitFormCodec, derive_alleles};
pub use pairs::{expected_pair_count, generate_genotypes, ordered_genotypes};
pub use payload_check::validate_payload;
pub use placeholder::PlaceholderGenerator;
pub use validator::{PhenotypeMapValidator, surviving_rows};
