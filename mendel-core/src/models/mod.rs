pub mod draft;
pub mod payload;
pub mod phenotype_map;
pub mod response;
pub mod trait_record;

// re-export for cleaner imports
pub use self::draft::{TraitDraft, TraitMetadata, TraitRow};
pub use self::payload::{Submission, TraitPayload, TraitUpdatePayload};
pub use self::phenotype_map::PhenotypeMap;
pub use self::response::{ChromosomeValue, RawGeneInfo, RawTrait, ResponseShape, TraitListResponse};
pub use self::trait_record::{GeneInfo, Trait, TraitStatus, Visibility};
