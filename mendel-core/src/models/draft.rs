use serde::{Deserialize, Serialize};

use super::trait_record::{GeneInfo, Trait, Visibility};
use crate::utils::is_blank;

///
/// One editable genotype/phenotype line. Either side may be blank or malformed while
/// the user is still typing.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitRow {
    #[serde(default)]
    pub genotype: String,
    #[serde(default)]
    pub phenotype: String,
}

impl TraitRow {
    pub fn new(genotype: impl Into<String>, phenotype: impl Into<String>) -> Self {
        TraitRow {
            genotype: genotype.into(),
            phenotype: phenotype.into(),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    /// A row still being typed: either field empty or whitespace only.
    pub fn is_in_progress(&self) -> bool {
        is_blank(&self.genotype) || is_blank(&self.phenotype)
    }
}

///
/// Scalar fields of a trait being authored.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritance_pattern: Option<String>,
    #[serde(default)]
    pub gene_info: GeneInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Trait> for TraitMetadata {
    fn from(value: &Trait) -> Self {
        TraitMetadata {
            name: value.name.clone(),
            category: value.category.clone(),
            inheritance_pattern: value.inheritance_pattern.clone(),
            gene_info: value.gene_info.clone(),
            verification_status: value.verification_status.clone(),
            visibility: value.visibility,
            tags: value.tags.clone(),
            references: value.references.clone(),
            description: value.description.clone(),
        }
    }
}

///
/// The UI-facing, mutable representation of a trait.
///
/// `existing_key` is set when the draft edits a trait the backend already has; such a
/// draft keeps that key no matter how the name changes. Dropping the draft is the
/// "cancel" path.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDraft {
    #[serde(default)]
    pub rows: Vec<TraitRow>,
    #[serde(default)]
    pub metadata: TraitMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_key: Option<String>,
}

impl Default for TraitDraft {
    fn default() -> Self {
        Self::empty()
    }
}

impl TraitDraft {
    /// A fresh draft with a single blank row to type into.
    pub fn empty() -> Self {
        TraitDraft {
            rows: vec![TraitRow::blank()],
            metadata: TraitMetadata::default(),
            existing_key: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.existing_key.is_none()
    }

    pub fn push_row(&mut self, row: TraitRow) {
        self.rows.push(row);
    }

    /// Replace the row at `index`. Out-of-range indices append instead.
    pub fn set_row(&mut self, index: usize, row: TraitRow) {
        match self.rows.get_mut(index) {
            Some(slot) => *slot = row,
            None => self.rows.push(row),
        }
    }

    ///
    /// Remove the row at `index`. The last remaining row is blanked rather than removed
    /// so the editor never ends up with zero rows.
    ///
    pub fn remove_row(&mut self, index: usize) -> Option<TraitRow> {
        if index >= self.rows.len() {
            return None;
        }
        if self.rows.len() == 1 {
            return Some(std::mem::take(&mut self.rows[0]));
        }
        Some(self.rows.remove(index))
    }

    /// Rows with both fields filled in.
    pub fn complete_rows(&self) -> impl Iterator<Item = &TraitRow> {
        self.rows.iter().filter(|r| !r.is_in_progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_empty_draft_has_one_blank_row() {
        let draft = TraitDraft::empty();
        assert_eq!(draft.rows, vec![TraitRow::blank()]);
        assert_eq!(draft.is_new(), true);
    }

    #[rstest]
    #[case("", "Brown", true)]
    #[case("BB", "   ", true)]
    #[case("BB", "Brown", false)]
    fn test_in_progress_rows(#[case] genotype: &str, #[case] phenotype: &str, #[case] expected: bool) {
        assert_eq!(TraitRow::new(genotype, phenotype).is_in_progress(), expected);
    }

    #[rstest]
    fn test_remove_last_row_blanks_it() {
        let mut draft = TraitDraft::empty();
        draft.set_row(0, TraitRow::new("AA", "x"));

        let removed = draft.remove_row(0);
        assert_eq!(removed, Some(TraitRow::new("AA", "x")));
        assert_eq!(draft.rows.len(), 1);
        assert_eq!(draft.rows[0], TraitRow::blank());
        assert_eq!(draft.remove_row(5), None);
    }

    #[rstest]
    fn test_set_row_out_of_range_appends() {
        let mut draft = TraitDraft::empty();
        draft.set_row(3, TraitRow::new("Aa", "y"));
        assert_eq!(draft.rows.len(), 2);
        assert_eq!(draft.complete_rows().count(), 1);
    }
}
