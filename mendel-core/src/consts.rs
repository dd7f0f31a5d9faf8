/// Separators a user might have typed between the two alleles of a genotype.
/// The empty separator is the canonical one.
pub const GENOTYPE_SEPARATORS: [&str; 4] = ["", "/", "-", " "];

/// Only valid between two distinct alleles (phased notation).
pub const PHASED_SEPARATOR: &str = "|";

/// Number of characters kept by the legacy single-character sanitizer.
pub const LEGACY_GENOTYPE_LEN: usize = 2;
