//! Sounding Diagnostics Core Library
//!
//! Diagnoses precipitation type and severe-weather hazard potential from a
//! single vertical atmospheric sounding. The crate is pure computation over
//! an immutable profile snapshot: no I/O, no shared state, no mutation.
//! Sounding acquisition, archive bookkeeping and rendering live elsewhere
//! and talk to this core only through [`ProfileSnapshot`] and the result
//! types re-exported below.
//!
//! ## Pipeline
//!
//! - Locate the precipitation source layer and its initial phase
//! - Integrate warm/cold layer energies (temperature and wet-bulb profiles)
//! - Classify the surface precipitation type
//! - Evaluate the hazard rule cascades into an ordered headline list
//!
//! Missing observations carry a reserved sentinel ([`MISSING`]) that
//! propagates through every computation instead of raising; a fully
//! degraded profile degrades to "Unknown"/"None" outputs and a hazard list
//! holding only the baseline entry.

// Core value types
pub mod core_types;

// Shared thermodynamic and interpolation routines
pub mod interp;
pub mod params;
pub mod thermo;

// Diagnostic components
pub mod diagnostics;
pub mod hazard;
pub mod precip;

// Re-export core types
pub use core_types::{qc, LevelData, ProfileError, ProfileSnapshot, SevereIndices, MISSING};

// Re-export component results
pub use diagnostics::{diagnose_all, SoundingDiagnostics};
pub use hazard::{possible_hazards, wind_chill, HazardEntry, HazardType};
pub use precip::{
    best_guess, locate, posneg_temperature, posneg_wetbulb, InitPhase, LayerEnergy, PrecipSource,
    PrecipType,
};
