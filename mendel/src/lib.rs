#[cfg(feature = "core")]
#[doc(inline)]
pub use mendel_core as core;

#[cfg(feature = "genotype")]
#[doc(inline)]
pub use mendel_genotype as genotype;

#[cfg(feature = "progress")]
#[doc(inline)]
pub use mendel_progress as progress;
