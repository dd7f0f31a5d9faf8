use std::collections::BTreeSet;

use crate::alphabet::AlleleAlphabet;
use crate::codec::canonicalize;

///
/// The closed set of canonical genotypes for an allele set: every unordered pair with
/// repetition, so `n` distinct alleles give `n * (n + 1) / 2` genotypes.
///
/// The result only depends on *which* alleles are given, not their order. An empty
/// allele list yields an empty set.
///
pub fn generate_genotypes(alleles: &AlleleAlphabet) -> BTreeSet<String> {
    alleles
        .iter()
        .flat_map(|a| alleles.iter().map(move |b| canonicalize(a, b)))
        .collect()
}

///
/// Same genotypes as [`generate_genotypes`], listed in allele declaration order
/// (`AA, AB, AC, BB, BC, CC` for `[A, B, C]`). This is the order new rows are
/// suggested in.
///
pub fn ordered_genotypes(alleles: &AlleleAlphabet) -> Vec<String> {
    let tokens = alleles.tokens();
    let mut genotypes = Vec::with_capacity(tokens.len() * (tokens.len() + 1) / 2);
    for (i, a) in tokens.iter().enumerate() {
        for b in &tokens[i..] {
            genotypes.push(canonicalize(a, b));
        }
    }
    genotypes
}

/// Expected number of genotypes for `n` distinct alleles.
pub fn expected_pair_count(n: usize) -> usize {
    n * (n + 1) / 2
}
