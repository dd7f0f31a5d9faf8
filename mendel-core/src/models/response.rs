//! Trait shapes as they arrive from the API.
//!
//! Older records carry gene information under legacy names (`gene_info.gene`, a bare
//! `gene_info` string, top-level `gene`/`chromosome`, or a flat `metadata` map). Those
//! variants are resolved exactly once, in [`RawTrait::normalize`]; everything downstream
//! works with [`Trait`] and [`GeneInfo`] only.
use std::collections::BTreeMap;
use std::fmt::{self, Display};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::phenotype_map::PhenotypeMap;
use super::trait_record::{GeneInfo, Trait, TraitStatus, Visibility};
use crate::utils::parse_list;

/// Chromosomes are sometimes sent as numbers (`7`) and sometimes as strings (`"X"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChromosomeValue {
    Number(i64),
    Text(String),
}

impl Display for ChromosomeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromosomeValue::Number(n) => write!(f, "{}", n),
            ChromosomeValue::Text(s) => write!(f, "{}", s),
        }
    }
}

///
/// `gene_info` as sent by the API, in any of the shapes it has had over time.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawGeneInfo {
    Current {
        genes: Vec<String>,
        #[serde(default)]
        chromosomes: Vec<ChromosomeValue>,
        #[serde(default)]
        locus: Option<String>,
    },
    Legacy {
        gene: Option<String>,
        chromosome: Option<ChromosomeValue>,
        locus: Option<String>,
    },
    Bare(String),
}

/// Which family of field names a record used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Current,
    Legacy,
}

///
/// A trait record exactly as decoded from JSON, before normalization.
///
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTrait {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(alias = "trait")]
    pub name: String,
    #[serde(default)]
    pub alleles: Vec<String>,
    #[serde(default, alias = "phenotypes")]
    pub phenotype_map: PhenotypeMap,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "inheritance")]
    pub inheritance_pattern: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
    #[serde(default)]
    pub gene_info: Option<RawGeneInfo>,
    #[serde(default)]
    pub genes: Vec<String>,
    #[serde(default)]
    pub chromosomes: Vec<ChromosomeValue>,
    #[serde(default)]
    pub gene: Option<String>,
    #[serde(default)]
    pub chromosome: Option<ChromosomeValue>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub status: Option<TraitStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl RawTrait {
    ///
    /// Which naming family this record uses for gene information.
    ///
    pub fn shape(&self) -> ResponseShape {
        match &self.gene_info {
            Some(RawGeneInfo::Current { .. }) => ResponseShape::Current,
            Some(_) => ResponseShape::Legacy,
            None if self.gene.is_some()
                || self.chromosome.is_some()
                || self.metadata.contains_key("gene")
                || self.metadata.contains_key("genes") =>
            {
                ResponseShape::Legacy
            }
            None => ResponseShape::Current,
        }
    }

    fn resolve_gene_info(&self) -> GeneInfo {
        match &self.gene_info {
            Some(RawGeneInfo::Current {
                genes,
                chromosomes,
                locus,
            }) => GeneInfo {
                genes: genes.clone(),
                chromosomes: chromosomes.iter().map(|c| c.to_string()).collect(),
                locus: locus.clone(),
            },
            Some(RawGeneInfo::Legacy {
                gene,
                chromosome,
                locus,
            }) => GeneInfo {
                genes: gene.iter().filter(|g| !g.is_empty()).cloned().collect(),
                chromosomes: chromosome
                    .iter()
                    .chain(self.chromosome.iter())
                    .take(1)
                    .map(|c| c.to_string())
                    .collect(),
                locus: locus.clone(),
            },
            Some(RawGeneInfo::Bare(gene)) => GeneInfo {
                genes: vec![gene.clone()],
                chromosomes: self.chromosome.iter().map(|c| c.to_string()).collect(),
                locus: None,
            },
            None => self.resolve_flat_gene_info(),
        }
    }

    // top-level fields first, then the flat metadata map
    fn resolve_flat_gene_info(&self) -> GeneInfo {
        let genes = if !self.genes.is_empty() {
            self.genes.clone()
        } else if let Some(gene) = &self.gene {
            vec![gene.clone()]
        } else if let Some(genes) = self.metadata.get("genes") {
            parse_list(genes)
        } else {
            self.metadata.get("gene").cloned().into_iter().collect()
        };

        let chromosomes = if !self.chromosomes.is_empty() {
            self.chromosomes.iter().map(|c| c.to_string()).collect()
        } else if let Some(chromosome) = &self.chromosome {
            vec![chromosome.to_string()]
        } else if let Some(chromosomes) = self.metadata.get("chromosomes") {
            parse_list(chromosomes)
        } else {
            self.metadata.get("chromosome").cloned().into_iter().collect()
        };

        GeneInfo {
            genes,
            chromosomes,
            locus: self.metadata.get("locus").cloned(),
        }
    }

    fn metadata_field(&self, own: &Option<String>, name: &str) -> Option<String> {
        own.clone().or_else(|| self.metadata.get(name).cloned())
    }

    ///
    /// Resolve every legacy alternative into the canonical [`Trait`].
    ///
    /// Missing keys are derived from the name the way the dataset loader does
    /// (`"Eye Color"` -> `eye_color`), and an empty allele list is derived from the
    /// phenotype map.
    ///
    pub fn normalize(self) -> Trait {
        if self.shape() == ResponseShape::Legacy {
            warn!("Normalizing legacy gene info for trait '{}'", self.name);
        }

        let gene_info = self.resolve_gene_info();
        let category = self.metadata_field(&self.category, "category");
        let inheritance_pattern =
            self.metadata_field(&self.inheritance_pattern, "inheritance_pattern");
        let verification_status =
            self.metadata_field(&self.verification_status, "verification_status");

        let key = match self.key {
            Some(key) if !key.trim().is_empty() => key,
            _ => self.name.to_lowercase().replace([' ', '-'], "_"),
        };

        let mut record = Trait {
            key,
            name: self.name,
            alleles: self.alleles,
            phenotype_map: self.phenotype_map,
            category,
            inheritance_pattern,
            gene_info,
            verification_status,
            visibility: self.visibility.unwrap_or(Visibility::Public),
            status: self.status.unwrap_or(TraitStatus::Active),
            tags: self.tags,
            references: self.references,
            description: self.description,
            version: self.version,
        };

        if record.alleles.is_empty() {
            debug!("Deriving alleles for '{}' from its phenotype map", record.key);
            record.alleles = record.symbols_in_map();
        }

        record
    }
}

///
/// `{traits: [...]}` as returned by the trait listing endpoint.
///
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraitListResponse {
    #[serde(default)]
    pub traits: Vec<RawTrait>,
}

impl TraitListResponse {
    pub fn normalize(self) -> Vec<Trait> {
        self.traits.into_iter().map(RawTrait::normalize).collect()
    }
}
