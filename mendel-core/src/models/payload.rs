use serde::{Deserialize, Deserializer, Serialize};

use super::phenotype_map::PhenotypeMap;
use super::trait_record::{GeneInfo, Visibility};

///
/// Body of a `POST` creating a trait.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitPayload {
    pub key: String,
    pub name: String,
    pub alleles: Vec<String>,
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
    pub tags: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

///
/// Body of a `PUT` updating a trait. There is no `key`: keys never change after creation.
/// Fields left as `None` are not touched by the backend. The clearable fields use
/// `Some(None)` to send an explicit `null`, which removes the stored value.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitUpdatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alleles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phenotype_map: Option<PhenotypeMap>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub inheritance_pattern: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_info: Option<GeneInfo>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub verification_status: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

// a present field, `null` included, is `Some`; an absent one falls back to `default`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TraitUpdatePayload {
    /// `true` when the update would not change anything.
    pub fn is_noop(&self) -> bool {
        self == &TraitUpdatePayload::default()
    }
}

///
/// What the editing surface hands to the HTTP client on submit.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "body", rename_all = "UPPERCASE")]
pub enum Submission {
    Post(TraitPayload),
    Put {
        key: String,
        payload: TraitUpdatePayload,
    },
}
