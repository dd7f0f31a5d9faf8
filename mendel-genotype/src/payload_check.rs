use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use mendel_core::models::TraitPayload;
use mendel_core::{GenotypeError, ValidationReport};

use crate::alphabet::AlleleAlphabet;
use crate::codec::{canonicalize, split_pair};
use crate::pairs::generate_genotypes;

// release segments with optional pre, post and dev parts, plus semver pre-release tags
static VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[vV]?\d+(\.\d+)*((a|b|rc)\d+)?(\.post\d+)?(\.dev\d+)?(-[0-9A-Za-z]+(\.[0-9A-Za-z]+)*)?$",
    )
    .expect("static regex")
});

///
/// Check a finished payload against its own declared allele list.
///
/// Unlike the row validator this understands multi-character alleles: each map key is
/// split into two declared alleles and compared in canonical form, so `"Rh-Rh+"` and
/// `"Rh+Rh-"` are the same genotype here.
///
pub fn validate_payload(payload: &TraitPayload) -> ValidationReport {
    let mut report = ValidationReport::new();

    if payload.key.trim().is_empty() {
        report.push(GenotypeError::EmptyKey);
    }
    if payload.name.trim().is_empty() {
        report.push(GenotypeError::EmptyName);
    }

    let alleles = AlleleAlphabet::new(&payload.alleles);
    if alleles.is_empty() {
        report.push(GenotypeError::NoAlleles);
    } else if payload.phenotype_map.is_empty() {
        report.push(GenotypeError::EmptyMapping);
    } else {
        report.extend(check_coverage(&alleles, payload));
    }

    if let Some(version) = &payload.version {
        if !VERSION.is_match(version.trim()) {
            report.push(GenotypeError::InvalidVersion {
                version: version.clone(),
            });
        }
    }

    report
}

fn check_coverage(alleles: &AlleleAlphabet, payload: &TraitPayload) -> Vec<GenotypeError> {
    let expected = generate_genotypes(alleles);

    let mut provided = BTreeSet::new();
    let mut unexpected = BTreeSet::new();
    for key in payload.phenotype_map.keys() {
        match split_pair(key.trim(), alleles) {
            Some((a, b)) => {
                provided.insert(canonicalize(&a, &b));
            }
            None => {
                unexpected.insert(key.to_string());
            }
        }
    }

    let mut errors = Vec::new();
    let missing: Vec<String> = expected.difference(&provided).cloned().collect();
    if !missing.is_empty() {
        errors.push(GenotypeError::MissingGenotype { missing });
    }
    if !unexpected.is_empty() {
        errors.push(GenotypeError::UnexpectedGenotype {
            unexpected: unexpected.into_iter().collect(),
        });
    }
    errors
}
