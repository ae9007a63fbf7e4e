//! Derived profile parameters
//!
//! Small layer diagnostics computed on demand from the snapshot, as opposed
//! to the opaque composite indices supplied upstream.

use crate::core_types::missing::{qc, MISSING};
use crate::core_types::profile::ProfileSnapshot;
use crate::interp;

/// Lapse rate (°C/km) between two heights above ground.
///
/// Positive values mean temperature falling with height; ~9.8 °C/km is dry
/// adiabatic, >6.5 °C/km is steeper than the standard atmosphere.
///
/// # Arguments
/// * `lower` - Bottom of the layer (m AGL)
/// * `upper` - Top of the layer (m AGL)
pub fn lapse_rate(prof: &ProfileSnapshot, lower: f32, upper: f32) -> f32 {
    let z1 = interp::to_msl(prof, lower);
    let z2 = interp::to_msl(prof, upper);
    let p1 = interp::pres(prof, z1);
    let p2 = interp::pres(prof, z2);
    let t1 = interp::temp(prof, p1);
    let t2 = interp::temp(prof, p2);
    if !qc(z1) || !qc(z2) || !qc(t1) || !qc(t2) || (z2 - z1).abs() < f32::EPSILON {
        return MISSING;
    }
    (t2 - t1) / (z2 - z1) * -1000.0
}
