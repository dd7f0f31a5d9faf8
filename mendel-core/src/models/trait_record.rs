use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::phenotype_map::PhenotypeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Team,
    Public,
}

impl Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Team => write!(f, "team"),
            Visibility::Public => write!(f, "public"),
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "team" => Ok(Visibility::Team),
            "public" => Ok(Visibility::Public),
            other => Err(format!("Unknown visibility: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitStatus {
    #[default]
    Draft,
    Active,
    Deprecated,
}

///
/// Where a trait's gene(s) live. Always the current shape; legacy
/// `gene`/`chromosome` fields are folded in by [`super::response::RawTrait::normalize`].
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneInfo {
    #[serde(default)]
    pub genes: Vec<String>,
    #[serde(default)]
    pub chromosomes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locus: Option<String>,
}

impl GeneInfo {
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty() && self.chromosomes.is_empty() && self.locus.is_none()
    }

    /// First listed gene, the one older clients displayed on its own.
    pub fn primary_gene(&self) -> Option<&str> {
        self.genes.first().map(String::as_str)
    }
}

///
/// Canonical, backend-owned trait. The client holds it read-only until the next fetch.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub alleles: Vec<String>,
    #[serde(default)]
    pub phenotype_map: PhenotypeMap,
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
    pub status: TraitStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Trait {
    ///
    /// Sorted set of single-character allele symbols appearing in the phenotype map keys.
    ///
    pub fn symbols_in_map(&self) -> Vec<String> {
        self.phenotype_map
            .keys()
            .flat_map(str::chars)
            .collect::<BTreeSet<char>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    ///
    /// Whether `alleles` is exactly the set of symbols used by the phenotype map keys.
    /// Order of `alleles` does not matter.
    ///
    pub fn alleles_match_map(&self) -> bool {
        let declared: BTreeSet<&str> = self.alleles.iter().map(String::as_str).collect();
        let used = self.symbols_in_map();
        let used: BTreeSet<&str> = used.iter().map(String::as_str).collect();
        declared.len() == self.alleles.len() && declared == used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn eye_color() -> Trait {
        Trait {
            key: "eye_color".to_string(),
            name: "Eye Color".to_string(),
            alleles: vec!["b".to_string(), "B".to_string()],
            phenotype_map: [("BB", "Brown"), ("Bb", "Brown"), ("bb", "Blue")]
                .into_iter()
                .collect(),
            ..Default::default()
        }
    }

    #[rstest]
    fn test_symbols_in_map_are_sorted(eye_color: Trait) {
        assert_eq!(eye_color.symbols_in_map(), vec!["B", "b"]);
        assert_eq!(eye_color.alleles_match_map(), true);
    }

    #[rstest]
    fn test_alleles_mismatch_detected(mut eye_color: Trait) {
        eye_color.alleles.push("R".to_string());
        assert_eq!(eye_color.alleles_match_map(), false);
    }

    #[rstest]
    fn test_visibility_round_trips_through_str() {
        assert_eq!("Team".parse::<Visibility>(), Ok(Visibility::Team));
        assert_eq!(Visibility::Public.to_string(), "public");
        assert_eq!("secret".parse::<Visibility>().is_err(), true);
    }
}
