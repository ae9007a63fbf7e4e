//! Combined sounding diagnostics
//!
//! Wires the four components together in their downstream order: locate the
//! precipitation source, integrate the temperature and wet-bulb layer
//! energies beneath it, classify the precipitation type, then evaluate the
//! hazard list (which consumes the precipitation type for its blizzard
//! rule). Everything is a pure function of the snapshot, so a batch of
//! independent profiles parallelizes with no coordination.

use crate::core_types::profile::ProfileSnapshot;
use crate::hazard::{self, HazardEntry};
use crate::precip::classify::{self, PrecipType};
use crate::precip::energy::{self, LayerEnergy};
use crate::precip::source::{self, PrecipSource};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Full diagnostic output for one profile snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SoundingDiagnostics {
    /// Where falling precipitation originates and its initial phase
    pub source: PrecipSource,
    /// Warm/cold areas of the raw temperature profile
    pub temperature_energy: LayerEnergy,
    /// Warm/cold areas of the wet-bulb profile
    pub wetbulb_energy: LayerEnergy,
    /// Best-guess precipitation type at the surface
    pub precip_type: PrecipType,
    /// Ordered hazard list, baseline entry last
    pub hazards: Vec<HazardEntry>,
}

impl SoundingDiagnostics {
    /// Evaluate every diagnostic for one snapshot.
    ///
    /// Results are computed fresh on every call; callers that re-evaluate
    /// unchanged snapshots may cache on their side (the output is
    /// referentially transparent).
    pub fn compute(prof: &ProfileSnapshot) -> Self {
        let src = source::locate(prof);
        let start = if crate::core_types::missing::qc(src.level) && src.level > 0.0 {
            Some(src.level)
        } else {
            None
        };
        let temperature_energy = energy::posneg_temperature(prof, start);
        let wetbulb_energy = energy::posneg_wetbulb(prof, start);
        let precip_type = classify::best_guess(prof, &src, &temperature_energy);
        let hazards = hazard::possible_hazards(prof, precip_type);
        debug!(
            precip = precip_type.label(),
            hazard_count = hazards.len(),
            "sounding diagnostics complete"
        );
        SoundingDiagnostics {
            source: src,
            temperature_energy,
            wetbulb_energy,
            precip_type,
            hazards,
        }
    }
}

/// Diagnose a batch of independent profiles in parallel.
pub fn diagnose_all(profiles: &[ProfileSnapshot]) -> Vec<SoundingDiagnostics> {
    profiles
        .par_iter()
        .map(SoundingDiagnostics::compute)
        .collect()
}
