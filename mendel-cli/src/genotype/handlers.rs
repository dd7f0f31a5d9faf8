use anyhow::Result;
use clap::ArgMatches;
use serde::Serialize;

use mendel_core::utils::parse_list;
use mendel_genotype::{AlleleAlphabet, expected_pair_count, ordered_genotypes, sanitize_with_outcome};

use crate::io::write_json;

#[derive(Serialize)]
struct SanitizeOutput {
    genotype: String,
    fell_back: bool,
}

#[derive(Serialize)]
struct PairsOutput {
    alleles: Vec<String>,
    count: usize,
    genotypes: Vec<String>,
}

fn alphabet_arg(matches: &ArgMatches) -> Option<AlleleAlphabet> {
    matches
        .get_one::<String>("alleles")
        .map(|alleles| AlleleAlphabet::new(parse_list(alleles)))
}

pub fn run_sanitize(matches: &ArgMatches) -> Result<()> {
    let raw = matches
        .get_one::<String>("raw")
        .expect("A genotype to sanitize is required.");

    let alphabet = alphabet_arg(matches);
    let outcome = sanitize_with_outcome(raw, alphabet.as_ref());

    write_json(
        &SanitizeOutput {
            fell_back: outcome.fell_back(),
            genotype: outcome.into_string(),
        },
        matches,
    )
}

pub fn run_pairs(matches: &ArgMatches) -> Result<()> {
    let alphabet = alphabet_arg(matches).unwrap_or_default();
    let genotypes = ordered_genotypes(&alphabet);

    write_json(
        &PairsOutput {
            alleles: alphabet.tokens().to_vec(),
            count: expected_pair_count(alphabet.len()),
            genotypes,
        },
        matches,
    )
}
