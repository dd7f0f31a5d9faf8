//! Deciding whether a set of genotype rows can be submitted.
//!
//! The checks run in a fixed order:
//!
//! 1. rows with a blank genotype or phenotype are skipped (still being typed)
//! 2. each remaining genotype must be letters only
//! 3. the allele set is every character of the well-formed genotypes
//! 4. no genotype may appear twice
//! 5. every genotype the allele set implies must be present, and nothing else
//!
//! Every problem is collected; nothing short-circuits the report.
use std::collections::BTreeSet;

use fxhash::FxHashMap as HashMap;
use log::debug;

use mendel_core::models::TraitRow;
use mendel_core::utils::is_letters_only;
use mendel_core::{GenotypeError, ValidationReport};

use crate::alphabet::AlleleAlphabet;
use crate::codec::canonicalize_genotype;
use crate::config::{EditorConfig, KeyPolicy};
use crate::pairs::{generate_genotypes, ordered_genotypes};

#[derive(Debug, Clone, Copy, Default)]
pub struct PhenotypeMapValidator {
    key_policy: KeyPolicy,
}

impl From<&EditorConfig> for PhenotypeMapValidator {
    fn from(config: &EditorConfig) -> Self {
        PhenotypeMapValidator::new(config.key_policy)
    }
}

impl PhenotypeMapValidator {
    pub fn new(key_policy: KeyPolicy) -> Self {
        PhenotypeMapValidator { key_policy }
    }

    pub fn key_policy(&self) -> KeyPolicy {
        self.key_policy
    }

    // the form a genotype takes when compared against others
    fn comparable(&self, genotype: &str) -> String {
        match self.key_policy {
            KeyPolicy::AsTyped => genotype.to_string(),
            KeyPolicy::Canonical => canonicalize_genotype(genotype),
        }
    }

    ///
    /// Validate editor rows, returning every problem found.
    ///
    /// # Arguments
    /// * `rows` - the rows as they currently are in the editor
    ///
    pub fn validate(&self, rows: &[TraitRow]) -> ValidationReport {
        let mut report = ValidationReport::new();

        let genotypes: Vec<&str> = surviving_rows(rows).map(|r| r.genotype.trim()).collect();
        if genotypes.is_empty() {
            report.push(GenotypeError::EmptyMapping);
            return report;
        }

        // malformed genotypes are reported once each and kept out of allele extraction
        let mut well_formed: Vec<&str> = Vec::with_capacity(genotypes.len());
        let mut reported: BTreeSet<&str> = BTreeSet::new();
        for &genotype in &genotypes {
            if is_letters_only(genotype) {
                well_formed.push(genotype);
            } else if reported.insert(genotype) {
                report.push(GenotypeError::MalformedGenotype {
                    genotype: genotype.to_string(),
                });
            }
        }

        let alleles = AlleleAlphabet::from_genotypes(&well_formed);
        debug!(
            "Validating {} rows against {} implied alleles",
            genotypes.len(),
            alleles.len()
        );

        report.extend(self.find_duplicates(&genotypes));

        let expected = generate_genotypes(&alleles);
        let present: BTreeSet<String> = well_formed.iter().map(|g| self.comparable(g)).collect();

        let missing: Vec<String> = expected
            .iter()
            .filter(|g| !present.contains(*g))
            .cloned()
            .collect();
        if !missing.is_empty() {
            report.push(GenotypeError::MissingGenotype { missing });
        }

        // spelling variants of expected genotypes are reported as missing above, not here
        let unexpected: Vec<String> = well_formed
            .iter()
            .filter(|g| !expected.contains(&canonicalize_genotype(g)))
            .map(|g| g.to_string())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        if !unexpected.is_empty() {
            report.push(GenotypeError::UnexpectedGenotype { unexpected });
        }

        report
    }

    // one error per repeated genotype, in order of first appearance
    fn find_duplicates(&self, genotypes: &[&str]) -> Vec<GenotypeError> {
        let mut counts: HashMap<String, usize> = HashMap::default();
        let mut order: Vec<(String, &str)> = Vec::new();
        for &genotype in genotypes {
            let key = self.comparable(genotype);
            let count = counts.entry(key.clone()).or_insert(0);
            if *count == 0 {
                order.push((key, genotype));
            }
            *count += 1;
        }

        order
            .into_iter()
            .filter(|(key, _)| counts.get(key).copied().unwrap_or(0) > 1)
            .map(|(_, genotype)| GenotypeError::DuplicateGenotype {
                genotype: genotype.to_string(),
            })
            .collect()
    }

    ///
    /// New blank-phenotype rows for every genotype the current rows imply but do not
    /// have yet. Existing rows are never touched; append the result to them.
    ///
    /// A row counts as present as soon as its genotype is typed, even if its phenotype
    /// is still blank.
    ///
    pub fn suggest_missing(&self, rows: &[TraitRow]) -> Vec<TraitRow> {
        let typed: Vec<&str> = rows
            .iter()
            .map(|r| r.genotype.trim())
            .filter(|g| is_letters_only(g))
            .collect();
        let alleles = AlleleAlphabet::from_genotypes(&typed);
        self.suggest_for_alleles(rows, &alleles)
    }

    ///
    /// Like [`Self::suggest_missing`], but for an explicitly declared allele set.
    ///
    pub fn suggest_for_alleles(&self, rows: &[TraitRow], alleles: &AlleleAlphabet) -> Vec<TraitRow> {
        let present: BTreeSet<String> = rows
            .iter()
            .map(|r| r.genotype.trim())
            .filter(|g| !g.is_empty())
            .map(|g| self.comparable(g))
            .collect();

        ordered_genotypes(alleles)
            .into_iter()
            .filter(|g| !present.contains(&self.comparable(g)))
            .map(|g| TraitRow::new(g, ""))
            .collect()
    }

    ///
    /// Append [`Self::suggest_missing`] rows in place, returning how many were added.
    ///
    pub fn append_missing(&self, rows: &mut Vec<TraitRow>) -> usize {
        let missing = self.suggest_missing(rows);
        let added = missing.len();
        rows.extend(missing);
        added
    }
}

/// Rows with both a genotype and a phenotype filled in.
pub fn surviving_rows(rows: &[TraitRow]) -> impl Iterator<Item = &TraitRow> {
    rows.iter().filter(|r| !r.is_in_progress())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn rows(pairs: &[(&str, &str)]) -> Vec<TraitRow> {
        pairs.iter().map(|(g, p)| TraitRow::new(*g, *p)).collect()
    }

    #[fixture]
    fn validator() -> PhenotypeMapValidator {
        PhenotypeMapValidator::default()
    }

    #[rstest]
    fn test_complete_map_passes(validator: PhenotypeMapValidator) {
        let report = validator.validate(&rows(&[("BB", "Brown"), ("Bb", "Brown"), ("bb", "Blue")]));
        assert_eq!(report.errors, Vec::<GenotypeError>::new());
        assert_eq!(report.passed(), true);
    }

    #[rstest]
    fn test_missing_heterozygote_is_reported(validator: PhenotypeMapValidator) {
        let report = validator.validate(&rows(&[("BB", "Brown"), ("bb", "Blue")]));
        assert_eq!(
            report.errors,
            vec![GenotypeError::MissingGenotype {
                missing: vec!["Bb".to_string()]
            }]
        );
    }

    #[rstest]
    fn test_duplicate_as_typed_genotype(validator: PhenotypeMapValidator) {
        let report = validator.validate(&rows(&[("AA", "x"), ("AA", "y")]));
        assert_eq!(
            report.errors,
            vec![GenotypeError::DuplicateGenotype {
                genotype: "AA".to_string()
            }]
        );
    }

    #[rstest]
    fn test_duplicates_compare_trimmed_genotypes(validator: PhenotypeMapValidator) {
        let report = validator.validate(&rows(&[(" AA", "x"), ("AA ", "y")]));
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors[0].genotype(), Some("AA"));
    }

    #[rstest]
    fn test_blank_rows_are_ignored(validator: PhenotypeMapValidator) {
        let report = validator.validate(&rows(&[
            ("AA", "x"),
            ("", "orphan phenotype"),
            ("Aa", "  "),
            ("Aa", "x"),
            ("aa", "y"),
        ]));
        assert_eq!(report.passed(), true);
    }

    #[rstest]
    #[case(&[])]
    #[case(&[("", "")])]
    #[case(&[("AA", ""), ("", "x")])]
    fn test_no_surviving_rows_is_empty_mapping(validator: PhenotypeMapValidator, #[case] pairs: &[(&str, &str)]) {
        let report = validator.validate(&rows(pairs));
        assert_eq!(report.errors, vec![GenotypeError::EmptyMapping]);
    }

    #[rstest]
    fn test_malformed_genotypes_are_reported_and_excluded(validator: PhenotypeMapValidator) {
        let report = validator.validate(&rows(&[
            ("AA", "x"),
            ("A1", "y"),
            ("A-a", "z"),
            ("A1", "again"),
        ]));

        assert_eq!(
            report.errors,
            vec![
                GenotypeError::MalformedGenotype {
                    genotype: "A1".to_string()
                },
                GenotypeError::MalformedGenotype {
                    genotype: "A-a".to_string()
                },
                GenotypeError::DuplicateGenotype {
                    genotype: "A1".to_string()
                },
            ]
        );
    }

    #[rstest]
    fn test_as_typed_spelling_variant_counts_as_missing(validator: PhenotypeMapValidator) {
        let report = validator.validate(&rows(&[("BB", "Brown"), ("bB", "Brown"), ("bb", "Blue")]));
        assert_eq!(
            report.errors,
            vec![GenotypeError::MissingGenotype {
                missing: vec!["Bb".to_string()]
            }]
        );
    }

    #[rstest]
    fn test_canonical_policy_accepts_spelling_variant() {
        let validator = PhenotypeMapValidator::new(KeyPolicy::Canonical);
        let report = validator.validate(&rows(&[("BB", "Brown"), ("bB", "Brown"), ("bb", "Blue")]));
        assert_eq!(report.passed(), true);

        let report = validator.validate(&rows(&[("Bb", "x"), ("bB", "y"), ("BB", "z"), ("bb", "w")]));
        assert_eq!(
            report.errors,
            vec![GenotypeError::DuplicateGenotype {
                genotype: "Bb".to_string()
            }]
        );
    }

    #[rstest]
    fn test_genotypes_outside_pair_set_are_unexpected(validator: PhenotypeMapValidator) {
        let report = validator.validate(&rows(&[("A", "x"), ("AA", "y")]));
        assert_eq!(
            report.errors,
            vec![GenotypeError::UnexpectedGenotype {
                unexpected: vec!["A".to_string()]
            }]
        );
    }

    #[rstest]
    fn test_suggest_missing_appends_without_reordering(validator: PhenotypeMapValidator) {
        let mut current = rows(&[("bb", "Blue"), ("BB", "")]);
        let suggested = validator.suggest_missing(&current);
        assert_eq!(suggested, vec![TraitRow::new("Bb", "")]);

        let added = validator.append_missing(&mut current);
        assert_eq!(added, 1);
        assert_eq!(
            current.iter().map(|r| r.genotype.as_str()).collect::<Vec<_>>(),
            vec!["bb", "BB", "Bb"]
        );
        assert_eq!(validator.suggest_missing(&current), Vec::<TraitRow>::new());
    }

    #[rstest]
    fn test_suggest_for_declared_alleles(validator: PhenotypeMapValidator) {
        let alleles = AlleleAlphabet::new(["A", "B", "O"]);
        let suggested = validator.suggest_for_alleles(&rows(&[("AO", "A")]), &alleles);
        let genotypes: Vec<&str> = suggested.iter().map(|r| r.genotype.as_str()).collect();
        assert_eq!(genotypes, vec!["AA", "AB", "BB", "BO", "OO"]);
    }
}
