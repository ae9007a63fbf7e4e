//! Layer Energy Integrator
//!
//! Trapezoidal integration of the 0 °C temperature deficit over height,
//! walking from the precipitation source level down to the surface. The
//! positive (warm, melting) and negative (cold, refreezing) areas of the
//! profile below the source are the melting-energy proxy the precipitation
//! type classifier keys on.
//!
//! One generic integrator serves both the raw temperature profile and the
//! wet-bulb profile; the two differ only in the temperature function
//! evaluated at each pressure.

use crate::core_types::missing::{qc, MISSING};
use crate::core_types::profile::ProfileSnapshot;
use crate::precip::source;
use crate::{interp, thermo};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Gravitational acceleration (m/s²).
const GRAVITY: f32 = 9.8;

/// Warm/cold area pair for a completed warm-over-cold layer structure.
///
/// Two degenerate states must stay distinguishable: [`LayerEnergy::zero`]
/// means the profile was walked but no warm-over-cold pair exists, while
/// [`LayerEnergy::missing`] means the sounding had no usable temperatures
/// to walk at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerEnergy {
    /// Positive (above 0 °C) area (J/kg)
    pub pos: f32,
    /// Negative (below 0 °C) area (J/kg)
    pub neg: f32,
    /// Pressure where the warm layer was entered (mb)
    pub top: f32,
    /// Pressure where the cold layer beneath it was entered (mb)
    pub bot: f32,
}

impl LayerEnergy {
    /// No warm-over-cold layer pair found.
    pub fn zero() -> Self {
        LayerEnergy {
            pos: 0.0,
            neg: 0.0,
            top: 0.0,
            bot: 0.0,
        }
    }

    /// No usable sounding data.
    pub fn missing() -> Self {
        LayerEnergy {
            pos: MISSING,
            neg: MISSING,
            top: MISSING,
            bot: MISSING,
        }
    }

    /// True for the all-sentinel "no data" result.
    pub fn is_missing(&self) -> bool {
        !qc(self.pos)
    }
}

/// Generic warm/cold area integrator.
///
/// `temp_at` evaluates the profile being integrated (raw or wet-bulb
/// temperature, °C) at an arbitrary pressure. Integration starts at
/// `start` mb when given, else at the locator's source level, else at
/// 500 mb, and runs down to the surface inclusive.
fn integrate<F>(prof: &ProfileSnapshot, start: Option<f32>, temp_at: F) -> LayerEnergy
where
    F: Fn(&ProfileSnapshot, f32) -> f32,
{
    // A sounding with no temperature at either mandatory level has nothing
    // to integrate
    if !qc(interp::temp(prof, 500.0)) && !qc(interp::temp(prof, 850.0)) {
        return LayerEnergy::missing();
    }

    let upper = match start {
        Some(p) => p,
        None => {
            let src = source::locate(prof);
            if qc(src.level) && src.level > 0.0 {
                src.level
            } else {
                500.0
            }
        }
    };

    let sfc = prof.sfc();
    // Highest level whose pressure still exceeds the start pressure
    let uptr = (0..prof.len())
        .filter(|&i| qc(prof.pres(i)) && prof.pres(i) > upper)
        .next_back()
        .unwrap_or(0);

    let mut h1 = interp::hght(prof, upper);
    let mut te1 = temp_at(prof, upper);

    let mut warm = false;
    let mut cold = false;
    let mut totp = 0.0;
    let mut totn = 0.0;
    let mut tote = 0.0;
    let mut ptop = 0.0;
    let mut pbot = 0.0;

    if uptr >= sfc {
        for i in (sfc..=uptr).rev() {
            let pe2 = prof.pres(i);
            let h2 = prof.hght(i);
            let te2 = temp_at(prof, pe2);
            if !qc(pe2) || !qc(h2) || !qc(te2) {
                // Skip degraded levels without advancing the trapezoid
                continue;
            }
            if !qc(te1) || !qc(h1) {
                // No usable upper state yet; seed it from this level
                h1 = h2;
                te1 = te2;
                continue;
            }

            if te2 > 0.0 && !warm {
                warm = true;
                ptop = pe2;
            }
            if te2 < 0.0 && warm && !cold {
                cold = true;
                pbot = pe2;
            }

            let tdef1 = (0.0 - te1) / thermo::ctok(te1);
            let tdef2 = (0.0 - te2) / thermo::ctok(te2);
            let lyre = GRAVITY * (tdef1 + tdef2) / 2.0 * (h2 - h1);
            if warm {
                if lyre > 0.0 {
                    totp += lyre;
                } else {
                    totn += lyre;
                }
                tote += lyre;
            }

            h1 = h2;
            te1 = te2;
        }
    }
    trace!(upper, tote, warm, cold, "layer energy walk complete");

    if warm && cold {
        LayerEnergy {
            pos: totp,
            neg: totn,
            top: ptop,
            bot: pbot,
        }
    } else {
        LayerEnergy::zero()
    }
}

/// Warm/cold areas of the raw temperature profile (J/kg).
pub fn posneg_temperature(prof: &ProfileSnapshot, start: Option<f32>) -> LayerEnergy {
    integrate(prof, start, interp::temp)
}

/// Warm/cold areas of the wet-bulb profile (J/kg).
///
/// Used when the air beneath falling precipitation may saturate and cool
/// toward the wet-bulb temperature as it does so.
pub fn posneg_wetbulb(prof: &ProfileSnapshot, start: Option<f32>) -> LayerEnergy {
    integrate(prof, start, |p, pres| {
        thermo::wetbulb(pres, interp::temp(p, pres), interp::dwpt(p, pres))
    })
}
