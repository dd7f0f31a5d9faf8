//! Turning keystrokes into genotype strings, and genotype strings into map keys.
//!
//! Nothing here fails: malformed input always produces *some* string, and rejection is
//! left to [`crate::validator`].
use log::warn;

use mendel_core::GenotypeError;
use mendel_core::consts::{GENOTYPE_SEPARATORS, LEGACY_GENOTYPE_LEN, PHASED_SEPARATOR};
use mendel_core::models::PhenotypeMap;

use crate::alphabet::AlleleAlphabet;

/// Whether [`sanitize_with_outcome`] found a clean result or fell back to its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeStatus {
    Clean,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOutcome {
    pub genotype: String,
    pub status: SanitizeStatus,
}

impl SanitizeOutcome {
    pub fn fell_back(&self) -> bool {
        self.status == SanitizeStatus::Fallback
    }

    /// The soft `SanitizeFallback` signal, if the sanitizer had to give up.
    pub fn issue(&self) -> Option<GenotypeError> {
        self.fell_back().then(|| GenotypeError::SanitizeFallback {
            input: self.genotype.clone(),
        })
    }

    pub fn into_string(self) -> String {
        self.genotype
    }
}

///
/// Sanitize freeform genotype input.
///
/// Without an alphabet (single-character alleles) every non ASCII letter is dropped
/// and the result is cut to two characters. With an alphabet, whitespace is dropped
/// and the remainder must split into two known alleles; if it does not, the
/// whitespace-stripped input is returned unchanged.
///
/// # Arguments
/// * `raw` - the text as typed
/// * `alphabet` - allele tokens of the trait, when alleles may be multi-character
///
pub fn sanitize(raw: &str, alphabet: Option<&AlleleAlphabet>) -> String {
    sanitize_with_outcome(raw, alphabet).into_string()
}

///
/// Same as [`sanitize`], but also reports whether the alphabet split failed.
///
pub fn sanitize_with_outcome(raw: &str, alphabet: Option<&AlleleAlphabet>) -> SanitizeOutcome {
    let Some(alphabet) = alphabet else {
        let genotype = raw
            .chars()
            .filter(char::is_ascii_alphabetic)
            .take(LEGACY_GENOTYPE_LEN)
            .collect();
        return SanitizeOutcome {
            genotype,
            status: SanitizeStatus::Clean,
        };
    };

    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    match split_pair(&stripped, alphabet) {
        Some((first, second)) => SanitizeOutcome {
            genotype: format!("{}{}", first, second),
            status: SanitizeStatus::Clean,
        },
        None => {
            if !stripped.is_empty() {
                warn!("No allele split found for '{}', keeping input as typed", stripped);
            }
            SanitizeOutcome {
                genotype: stripped,
                status: SanitizeStatus::Fallback,
            }
        }
    }
}

///
/// Split `genotype` into two consecutive alleles from `alphabet`.
///
/// Split points are tried left to right and the first one where both halves are known
/// alleles wins.
///
pub fn split_pair(genotype: &str, alphabet: &AlleleAlphabet) -> Option<(String, String)> {
    genotype
        .char_indices()
        .skip(1)
        .map(|(idx, _)| genotype.split_at(idx))
        .find(|(left, right)| alphabet.contains(left) && alphabet.contains(right))
        .map(|(left, right)| (left.to_string(), right.to_string()))
}

///
/// Order-independent serialization of an allele pair: the two tokens sorted by code
/// point and joined without a separator.
///
pub fn canonicalize(allele_a: &str, allele_b: &str) -> String {
    if allele_a <= allele_b {
        format!("{}{}", allele_a, allele_b)
    } else {
        format!("{}{}", allele_b, allele_a)
    }
}

///
/// Canonical form of a whole single-character genotype string (`"bB"` -> `"Bb"`).
///
pub fn canonicalize_genotype(genotype: &str) -> String {
    let mut chars: Vec<char> = genotype.chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

///
/// Every spelling a person might have used for the unordered pair `(a, b)`.
///
/// The canonical key comes first. Only meant for *looking up* loosely formatted keys in
/// older maps; new keys are always written canonically.
///
pub fn candidate_keys(allele_a: &str, allele_b: &str) -> Vec<String> {
    let (first, second) = if allele_a <= allele_b {
        (allele_a, allele_b)
    } else {
        (allele_b, allele_a)
    };
    let orderings = [(first, second), (second, first)];

    let mut keys: Vec<String> = Vec::with_capacity(10);
    let mut push = |key: String| {
        if !keys.contains(&key) {
            keys.push(key);
        }
    };

    for separator in GENOTYPE_SEPARATORS {
        for (x, y) in orderings {
            push(format!("{}{}{}", x, separator, y));
        }
    }
    if first != second {
        for (x, y) in orderings {
            push(format!("{}{}{}", x, PHASED_SEPARATOR, y));
        }
    }

    keys
}

///
/// Find the phenotype for an unordered allele pair in a map that may use any of the
/// [`candidate_keys`] spellings.
///
pub fn lookup_phenotype<'a>(map: &'a PhenotypeMap, allele_a: &str, allele_b: &str) -> Option<&'a str> {
    candidate_keys(allele_a, allele_b)
        .iter()
        .find_map(|key| map.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rh() -> AlleleAlphabet {
        AlleleAlphabet::new(["Rh+", "Rh-"])
    }

    #[rstest]
    #[case("B b!", "Bb")]
    #[case("bb", "bb")]
    #[case("A1a2x", "Aa")]
    #[case("", "")]
    #[case("   ", "")]
    #[case("12!?", "")]
    fn test_sanitize_without_alphabet(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize(raw, None), expected);
    }

    #[rstest]
    fn test_sanitize_with_alphabet_finds_split(rh: AlleleAlphabet) {
        let outcome = sanitize_with_outcome("Rh+Rh-", Some(&rh));
        assert_eq!(outcome.genotype, "Rh+Rh-");
        assert_eq!(outcome.fell_back(), false);

        assert_eq!(sanitize(" Rh- Rh- ", Some(&rh)), "Rh-Rh-");
    }

    #[rstest]
    #[case("Rh+Rh", "Rh+Rh")]
    #[case("R h +", "Rh+")]
    #[case("", "")]
    #[case("!!", "!!")]
    fn test_sanitize_with_alphabet_fails_open(rh: AlleleAlphabet, #[case] raw: &str, #[case] expected: &str) {
        let outcome = sanitize_with_outcome(raw, Some(&rh));
        assert_eq!(outcome.genotype, expected);
        assert_eq!(outcome.fell_back(), true);
        assert_eq!(
            outcome.issue(),
            Some(GenotypeError::SanitizeFallback {
                input: expected.to_string()
            })
        );
    }

    #[rstest]
    fn test_split_pair_takes_first_valid_split() {
        // "A" + "AB" and "AA" + "B" are both valid; the leftmost split wins
        let alphabet = AlleleAlphabet::new(["A", "AA", "AB", "B"]);
        assert_eq!(
            split_pair("AAB", &alphabet),
            Some(("A".to_string(), "AB".to_string()))
        );
        assert_eq!(split_pair("A", &alphabet), None);
    }

    #[rstest]
    #[case("B", "b", "Bb")]
    #[case("b", "B", "Bb")]
    #[case("Rh-", "Rh+", "Rh+Rh-")]
    #[case("O", "O", "OO")]
    fn test_canonicalize(#[case] a: &str, #[case] b: &str, #[case] expected: &str) {
        assert_eq!(canonicalize(a, b), expected);
        assert_eq!(canonicalize(b, a), expected);
    }

    #[rstest]
    fn test_canonicalize_genotype() {
        assert_eq!(canonicalize_genotype("bB"), "Bb");
        assert_eq!(canonicalize_genotype("Bb"), "Bb");
    }

    #[rstest]
    fn test_candidate_keys_for_heterozygote() {
        let keys = candidate_keys("b", "B");
        assert_eq!(keys[0], "Bb");
        for expected in ["bB", "B/b", "b/B", "B-b", "b-B", "B b", "b B", "B|b", "b|B"] {
            assert_eq!(keys.contains(&expected.to_string()), true, "missing {}", expected);
        }
        assert_eq!(keys.len(), 10);
    }

    #[rstest]
    fn test_candidate_keys_for_homozygote_has_no_duplicates_or_phased_form() {
        let keys = candidate_keys("A", "A");
        assert_eq!(keys, vec!["AA", "A/A", "A-A", "A A"]);
    }

    #[rstest]
    fn test_lookup_phenotype_finds_loose_keys() {
        let map: PhenotypeMap = [("B/b", "Brown"), ("bb", "Blue")].into_iter().collect();
        assert_eq!(lookup_phenotype(&map, "b", "B"), Some("Brown"));
        assert_eq!(lookup_phenotype(&map, "b", "b"), Some("Blue"));
        assert_eq!(lookup_phenotype(&map, "B", "B"), None);
    }
}
