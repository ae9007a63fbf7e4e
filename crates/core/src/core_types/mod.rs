//! Core value types shared across the diagnostic components

pub mod indices;
pub mod missing;
pub mod profile;

pub use indices::{ParcelStats, SevereIndices, WindComponents};
pub use missing::{qc, qc_neg, MISSING};
pub use profile::{LevelData, ProfileError, ProfileSnapshot};
