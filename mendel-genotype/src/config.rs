use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mendel_core::utils::is_letters_only;

///
/// How genotype keys are compared and stored.
///
/// `AsTyped` keeps existing stored data working: `"Bb"` and `"bB"` are different keys.
/// `Canonical` treats equivalent spellings as one key and writes canonical keys.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    #[default]
    AsTyped,
    Canonical,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PlaceholderConfig {
    #[serde(default = "default_placeholder_alleles")]
    pub alleles: Vec<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        PlaceholderConfig {
            alleles: default_placeholder_alleles(),
            seed: None,
        }
    }
}

fn default_placeholder_alleles() -> Vec<String> {
    vec!["A".to_string(), "a".to_string()]
}

///
/// Settings injected into the trait editor at startup.
///
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct EditorConfig {
    /// Enables placeholder data generation.
    #[serde(default)]
    pub development_mode: bool,
    #[serde(default)]
    pub key_policy: KeyPolicy,
    #[serde(default)]
    pub placeholder: PlaceholderConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Placeholder alleles must be single letters, got: {0}")]
    InvalidPlaceholderAllele(String),
    #[error("At least one placeholder allele is required")]
    NoPlaceholderAlleles,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl EditorConfig {
    /// Development-mode config, mostly for tests and local tooling.
    pub fn development() -> Self {
        EditorConfig {
            development_mode: true,
            ..Default::default()
        }
    }

    pub fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    ///
    /// Check values serde cannot: placeholder alleles must be usable as genotype
    /// characters, since placeholder rows have to pass validation.
    ///
    pub fn validate(&self) -> ConfigResult<()> {
        if self.placeholder.alleles.is_empty() {
            return Err(ConfigError::NoPlaceholderAlleles);
        }
        for allele in &self.placeholder.alleles {
            if allele.chars().count() != 1 || !is_letters_only(allele) {
                return Err(ConfigError::InvalidPlaceholderAllele(allele.clone()));
            }
        }
        Ok(())
    }
}

impl TryFrom<&str> for EditorConfig {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let config: EditorConfig = toml::from_str(value)?;
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<&Path> for EditorConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        EditorConfig::try_from(toml_str.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use std::path::PathBuf;

    #[rstest]
    fn test_defaults_are_production_safe() {
        let config = EditorConfig::default();
        assert_eq!(config.development_mode, false);
        assert_eq!(config.key_policy, KeyPolicy::AsTyped);
        assert_eq!(config.placeholder.alleles, vec!["A", "a"]);
    }

    #[rstest]
    fn test_empty_toml_gives_defaults() {
        let config = EditorConfig::try_from("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[rstest]
    fn test_try_from_toml_file() {
        let path = PathBuf::from("../tests/data/config/editor.toml");
        let config = EditorConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.development_mode, true);
        assert_eq!(config.key_policy, KeyPolicy::Canonical);
        assert_eq!(config.placeholder.alleles, vec!["B", "b", "R"]);
        assert_eq!(config.placeholder.seed, Some(42));
    }

    #[rstest]
    #[case("[placeholder]\nalleles = []")]
    #[case("[placeholder]\nalleles = [\"Rh+\"]")]
    #[case("[placeholder]\nalleles = [\"1\"]")]
    fn test_rejects_unusable_placeholder_alleles(#[case] toml_str: &str) {
        assert_eq!(EditorConfig::try_from(toml_str).is_err(), true);
    }

    #[rstest]
    fn test_rejects_unknown_key_policy() {
        let result = EditorConfig::try_from("key_policy = \"sorted\"");
        assert_eq!(matches!(result, Err(ConfigError::Toml(_))), true);
    }

    #[rstest]
    fn test_missing_file_is_io_error() {
        let path = PathBuf::from("does/not/exist.toml");
        let result = EditorConfig::try_from(path.as_path());
        assert_eq!(matches!(result, Err(ConfigError::Io(_))), true);
    }
}
