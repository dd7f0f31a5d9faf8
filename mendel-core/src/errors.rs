use serde::Serialize;
use thiserror::Error;

///
/// A single problem found while validating genotype rows or a trait payload.
///
/// These are reported, not raised: validators collect every one they find into a
/// [`ValidationReport`] so an editing surface can render all of them at once.
///
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenotypeError {
    #[error("Genotype '{genotype}' must contain letters only")]
    MalformedGenotype { genotype: String },

    #[error("Genotype '{genotype}' appears more than once")]
    DuplicateGenotype { genotype: String },

    #[error("Missing genotype phenotypes: {}", .missing.join(", "))]
    MissingGenotype { missing: Vec<String> },

    #[error("Unexpected genotypes in phenotype map: {}", .unexpected.join(", "))]
    UnexpectedGenotype { unexpected: Vec<String> },

    #[error("At least one genotype with a phenotype is required")]
    EmptyMapping,

    /// Soft signal from the sanitizer. Not shown to users directly; treat it like
    /// `MalformedGenotype` at validation time.
    #[error("Could not split '{input}' into two known alleles")]
    SanitizeFallback { input: String },

    #[error("Trait key cannot be empty")]
    EmptyKey,

    #[error("Trait name cannot be empty")]
    EmptyName,

    #[error("At least one allele must be provided")]
    NoAlleles,

    #[error("Invalid version '{version}' (expected e.g. 1.0 or 1.2.0)")]
    InvalidVersion { version: String },
}

impl GenotypeError {
    /// Map-wide problems are rendered as a summary banner rather than next to a row.
    pub fn is_map_wide(&self) -> bool {
        matches!(
            self,
            GenotypeError::MissingGenotype { .. }
                | GenotypeError::UnexpectedGenotype { .. }
                | GenotypeError::EmptyMapping
        )
    }

    /// The row-level genotype this error points at, if any.
    pub fn genotype(&self) -> Option<&str> {
        match self {
            GenotypeError::MalformedGenotype { genotype }
            | GenotypeError::DuplicateGenotype { genotype } => Some(genotype),
            GenotypeError::SanitizeFallback { input } => Some(input),
            _ => None,
        }
    }
}

///
/// Batched outcome of a validation pass.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<GenotypeError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: GenotypeError) {
        self.errors.push(error);
    }

    pub fn extend<I: IntoIterator<Item = GenotypeError>>(&mut self, errors: I) {
        self.errors.extend(errors);
    }

    /// Submission is allowed only when nothing was reported.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GenotypeError> {
        self.errors.iter()
    }

    /// Errors that belong next to the row holding `genotype`.
    pub fn for_genotype<'a>(&'a self, genotype: &'a str) -> impl Iterator<Item = &'a GenotypeError> {
        self.errors
            .iter()
            .filter(move |e| e.genotype() == Some(genotype))
    }

    /// Errors that belong in the summary banner.
    pub fn map_wide(&self) -> impl Iterator<Item = &GenotypeError> {
        self.errors.iter().filter(|e| e.is_map_wide())
    }

    /// Human readable messages, one per error.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a GenotypeError;
    type IntoIter = std::slice::Iter<'a, GenotypeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
