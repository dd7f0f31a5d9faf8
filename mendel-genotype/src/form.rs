//! Converting between editor rows and the payloads the trait API expects.
//!
//! These conversions never fail. Run [`crate::validator::PhenotypeMapValidator`] first
//! and block submission when it reports anything.
use std::collections::BTreeSet;

use mendel_core::models::{
    PhenotypeMap, Submission, Trait, TraitDraft, TraitMetadata, TraitPayload, TraitRow,
    TraitUpdatePayload,
};
use mendel_core::utils::slugify;

use crate::codec::canonicalize_genotype;
use crate::config::{EditorConfig, KeyPolicy};
use crate::validator::surviving_rows;

#[derive(Debug, Clone, Copy, Default)]
pub struct TraitFormCodec {
    key_policy: KeyPolicy,
}

impl From<&EditorConfig> for TraitFormCodec {
    fn from(config: &EditorConfig) -> Self {
        TraitFormCodec::new(config.key_policy)
    }
}

impl TraitFormCodec {
    pub fn new(key_policy: KeyPolicy) -> Self {
        TraitFormCodec { key_policy }
    }

    ///
    /// One row per map entry, in map order. An empty map gives a single blank row so
    /// the editor always has something to type into.
    ///
    pub fn to_rows(&self, phenotype_map: &PhenotypeMap) -> Vec<TraitRow> {
        if phenotype_map.is_empty() {
            return vec![TraitRow::blank()];
        }
        phenotype_map
            .iter()
            .map(|(genotype, phenotype)| TraitRow::new(genotype, phenotype))
            .collect()
    }

    ///
    /// Build the phenotype map from the rows that are filled in.
    ///
    /// Genotypes are used as typed (trimmed) unless the codec is configured for
    /// canonical keys. Later rows overwrite earlier rows with the same key.
    ///
    pub fn to_phenotype_map(&self, rows: &[TraitRow]) -> PhenotypeMap {
        surviving_rows(rows)
            .map(|row| {
                let genotype = row.genotype.trim();
                let key = match self.key_policy {
                    KeyPolicy::AsTyped => genotype.to_string(),
                    KeyPolicy::Canonical => canonicalize_genotype(genotype),
                };
                (key, row.phenotype.trim().to_string())
            })
            .collect()
    }

    ///
    /// Build a create payload.
    ///
    /// # Arguments
    /// * `rows` - editor rows; in-progress rows are dropped
    /// * `metadata` - scalar fields from the form
    /// * `existing_key` - key of the trait being edited, if any. It is kept as is;
    ///   otherwise a key is derived from the name.
    ///
    pub fn to_payload(
        &self,
        rows: &[TraitRow],
        metadata: &TraitMetadata,
        existing_key: Option<&str>,
    ) -> TraitPayload {
        let phenotype_map = self.to_phenotype_map(rows);
        let alleles = derive_alleles(&phenotype_map);
        let key = match existing_key {
            Some(key) => key.to_string(),
            None => slugify(&metadata.name),
        };

        TraitPayload {
            key,
            name: metadata.name.trim().to_string(),
            alleles,
            phenotype_map,
            category: metadata.category.clone(),
            inheritance_pattern: metadata.inheritance_pattern.clone(),
            gene_info: metadata.gene_info.clone(),
            verification_status: metadata.verification_status.clone(),
            visibility: metadata.visibility,
            tags: metadata.tags.clone(),
            references: metadata.references.clone(),
            description: metadata.description.clone(),
            version: None,
        }
    }

    /// [`Self::to_payload`] for a whole draft.
    pub fn draft_to_payload(&self, draft: &TraitDraft) -> TraitPayload {
        self.to_payload(&draft.rows, &draft.metadata, draft.existing_key.as_deref())
    }

    ///
    /// Build an update payload carrying only the fields that differ from `original`.
    /// A field cleared in the form is sent as an explicit `null`.
    ///
    pub fn to_update_payload(&self, draft: &TraitDraft, original: &Trait) -> TraitUpdatePayload {
        let next = self.to_payload(&draft.rows, &draft.metadata, Some(&original.key));

        fn changed<T: PartialEq>(next: T, current: &T) -> Option<T> {
            (next != *current).then_some(next)
        }

        // allele order carries no meaning
        let same_alleles = next.alleles.iter().collect::<BTreeSet<_>>()
            == original.alleles.iter().collect::<BTreeSet<_>>();

        TraitUpdatePayload {
            name: changed(next.name, &original.name),
            alleles: (!same_alleles).then_some(next.alleles),
            phenotype_map: changed(next.phenotype_map, &original.phenotype_map),
            category: changed(next.category, &original.category),
            inheritance_pattern: changed(next.inheritance_pattern, &original.inheritance_pattern),
            gene_info: changed(next.gene_info, &original.gene_info),
            verification_status: changed(next.verification_status, &original.verification_status),
            visibility: changed(next.visibility, &original.visibility),
            tags: changed(next.tags, &original.tags),
            references: changed(next.references, &original.references),
            description: changed(next.description, &original.description),
        }
    }

    ///
    /// Start editing an existing trait.
    ///
    pub fn draft_from_trait(&self, record: &Trait) -> TraitDraft {
        TraitDraft {
            rows: self.to_rows(&record.phenotype_map),
            metadata: TraitMetadata::from(record),
            existing_key: Some(record.key.clone()),
        }
    }

    ///
    /// What to send for this draft: a `POST` for new traits, a `PUT` against the
    /// original otherwise.
    ///
    pub fn submission(&self, draft: &TraitDraft, original: Option<&Trait>) -> Submission {
        match original {
            Some(original) => Submission::Put {
                key: original.key.clone(),
                payload: self.to_update_payload(draft, original),
            },
            None => Submission::Post(self.draft_to_payload(draft)),
        }
    }
}

///
/// Sorted, de-duplicated set of single characters used across all genotype keys.
///
pub fn derive_alleles(phenotype_map: &PhenotypeMap) -> Vec<String> {
    phenotype_map
        .keys()
        .flat_map(str::chars)
        .collect::<BTreeSet<char>>()
        .into_iter()
        .map(String::from)
        .collect()
}
