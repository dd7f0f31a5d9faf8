use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use mendel_core::models::{TraitDraft, TraitMetadata, TraitRow};

use crate::alphabet::AlleleAlphabet;
use crate::config::EditorConfig;
use crate::error::{DraftError, DraftResult};
use crate::pairs::ordered_genotypes;

const NAME_PREFIXES: [&str; 6] = ["Petal", "Wing", "Coat", "Seed", "Shell", "Leaf"];
const NAME_SUFFIXES: [&str; 5] = ["Color", "Shape", "Pattern", "Texture", "Length"];
const PHENOTYPES: [&str; 8] = [
    "Dark", "Light", "Spotted", "Striped", "Round", "Wrinkled", "Long", "Short",
];
const INHERITANCE_PATTERNS: [&str; 3] = ["complete_dominance", "incomplete_dominance", "codominance"];

///
/// Generates fake traits for exercising the editor during development.
///
/// Only constructible when the injected [`EditorConfig`] has development mode on.
/// Every generated draft has one row per genotype of the configured alleles, each
/// with a non-empty phenotype, so it passes validation as generated.
///
pub struct PlaceholderGenerator {
    rng: StdRng,
    alleles: AlleleAlphabet,
}

impl PlaceholderGenerator {
    pub fn new(config: &EditorConfig) -> DraftResult<Self> {
        if !config.development_mode {
            return Err(DraftError::DevelopmentModeDisabled);
        }
        config.validate()?;

        let rng = match config.placeholder.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(PlaceholderGenerator {
            rng,
            alleles: AlleleAlphabet::new(&config.placeholder.alleles),
        })
    }

    fn pick(&mut self, choices: &[&'static str]) -> &'static str {
        choices.choose(&mut self.rng).copied().unwrap_or_default()
    }

    pub fn generate(&mut self) -> TraitDraft {
        let name = format!("{} {}", self.pick(&NAME_PREFIXES), self.pick(&NAME_SUFFIXES));

        let rows: Vec<TraitRow> = ordered_genotypes(&self.alleles)
            .into_iter()
            .map(|genotype| {
                let phenotype = self.pick(&PHENOTYPES);
                TraitRow::new(genotype, phenotype)
            })
            .collect();

        info!("Generated placeholder trait '{}' with {} rows", name, rows.len());

        TraitDraft {
            rows,
            metadata: TraitMetadata {
                name,
                category: Some("placeholder".to_string()),
                inheritance_pattern: Some(self.pick(&INHERITANCE_PATTERNS).to_string()),
                description: Some("Generated placeholder data".to_string()),
                ..Default::default()
            },
            existing_key: None,
        }
    }
}
