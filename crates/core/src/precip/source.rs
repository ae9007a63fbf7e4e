//! Precipitation-Source Locator
//!
//! Finds the level falling precipitation originates from by searching for
//! the highest saturated 50-mb layer in the lowest 5 km AGL, then assigns an
//! initial phase from the interpolated temperature at the layer midpoint.
//! When the sounding carries a usable vertical-motion field, the candidate
//! set is further restricted to levels with non-positive ω (upward motion).

use crate::core_types::missing::{qc, MISSING};
use crate::core_types::profile::ProfileSnapshot;
use crate::{interp, thermo};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Initial phase of precipitation at its source level.
///
/// The numeric codes are the wire contract with downstream consumers;
/// both freezing rain and a freezing-rain/snow mix share code 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i8)]
pub enum InitPhase {
    /// No precipitation source identified
    Unknown = -1,
    /// Liquid at the source level
    Rain = 0,
    /// Freezing rain or a freezing-rain/snow mix
    FreezingOrMix = 1,
    /// Frozen at the source level
    Snow = 3,
}

impl InitPhase {
    /// Numeric phase code (-1, 0, 1 or 3).
    pub fn code(self) -> i8 {
        self as i8
    }
}

/// Where precipitation originates and what it starts out as.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecipSource {
    /// Source pressure level (mb), `MISSING` when no source was found
    pub level: f32,
    /// Initial phase at the source level
    pub phase: InitPhase,
    /// Temperature at the source level (°C)
    pub temp: f32,
    /// Human-readable phase label
    pub label: &'static str,
}

impl PrecipSource {
    /// The "no source found" result: sentinel level and temperature,
    /// unknown phase. An expected outcome for dry profiles, not a failure.
    pub fn not_found() -> Self {
        PrecipSource {
            level: MISSING,
            phase: InitPhase::Unknown,
            temp: MISSING,
            label: "N/A",
        }
    }
}

/// Minimum count of valid ω observations below 0.1 Pa/s for the
/// vertical-motion field to be considered non-degenerate.
const MIN_OMEGA_LEVELS: usize = 5;

/// Saturation threshold for both faces of the source layer (%).
const SATURATION_RH: f32 = 80.0;

/// Depth of the search ceiling (m AGL).
const SEARCH_CEILING_AGL: f32 = 5000.0;

/// Locate the precipitation source layer and its initial phase.
///
/// Candidate levels lie below 5 km AGL with RH > 80%; a candidate qualifies
/// when the RH interpolated 50 mb above it also exceeds 80%, marking a
/// saturated 50-mb-deep layer. The physically highest qualifying layer wins
/// and the source is placed at its midpoint, 25 mb above the layer base.
pub fn locate(prof: &ProfileSnapshot) -> PrecipSource {
    // Use ω to pick ascent regions only when enough levels report it
    let omega_levels = (0..prof.len())
        .filter(|&i| qc(prof.omeg(i)) && prof.omeg(i) < 0.1)
        .count();
    let use_omega = omega_levels >= MIN_OMEGA_LEVELS;

    let mut base_pres = None;
    for i in 0..prof.len() {
        let agl = interp::to_agl(prof, prof.hght(i));
        if !qc(agl) || !(0.0..SEARCH_CEILING_AGL).contains(&agl) {
            continue;
        }
        if use_omega && !(qc(prof.omeg(i)) && prof.omeg(i) <= 0.0) {
            continue;
        }
        let rh = thermo::relh(prof.pres(i), prof.tmpc(i), prof.dwpc(i));
        if !qc(rh) || rh <= SATURATION_RH {
            continue;
        }
        let p_top = prof.pres(i) - 50.0;
        let rh_top = thermo::relh(
            p_top,
            interp::temp(prof, p_top),
            interp::dwpt(prof, p_top),
        );
        if !qc(rh_top) || rh_top <= SATURATION_RH {
            continue;
        }
        // Levels are ordered by descending pressure, so the last qualifying
        // base is the physically highest layer
        base_pres = Some(prof.pres(i));
    }

    let Some(base) = base_pres else {
        debug!(use_omega, "no saturated source layer found");
        return PrecipSource::not_found();
    };

    let level = base - 25.0;
    let temp = interp::temp(prof, level);
    let (phase, label) = if !qc(temp) {
        (InitPhase::Unknown, "N/A")
    } else if temp > 0.0 {
        (InitPhase::Rain, "Rain")
    } else if temp > -5.0 {
        (InitPhase::FreezingOrMix, "Freezing Rain")
    } else if temp > -9.0 {
        (InitPhase::FreezingOrMix, "ZR/S Mix")
    } else {
        (InitPhase::Snow, "Snow")
    };

    debug!(level, temp, ?phase, "precipitation source located");
    PrecipSource {
        level,
        phase,
        temp,
        label,
    }
}
