//! Profile Interpolation
//!
//! Linear interpolation of sounding fields in log-pressure space, the
//! standard vertical coordinate for thermodynamic work (height is close to
//! linear in log p through the troposphere). Levels carrying the missing
//! sentinel are excluded from the interpolation stencil instead of poisoning
//! neighbouring results.
//!
//! Targets outside the valid envelope clamp to the nearest valid level;
//! profiles with no valid level interpolate to `MISSING`.

use crate::core_types::missing::{qc, MISSING};
use crate::core_types::profile::ProfileSnapshot;

/// Interpolate `value_at` over valid levels, linear in log10 pressure.
fn interp_logp<F>(prof: &ProfileSnapshot, p: f32, value_at: F) -> f32
where
    F: Fn(usize) -> f32,
{
    if !qc(p) || p <= 0.0 {
        return MISSING;
    }
    let lp = p.log10();

    // Walk bottom-up over valid levels, tracking the previous one
    let mut prev: Option<(f32, f32)> = None; // (log10 pres, value)
    let mut first: Option<f32> = None;
    for i in 0..prof.len() {
        let pi = prof.pres(i);
        let vi = value_at(i);
        if !qc(pi) || !qc(vi) || pi <= 0.0 {
            continue;
        }
        let lpi = pi.log10();
        if first.is_none() {
            first = Some(vi);
            // Target at or below the lowest valid level clamps to it
            if lp >= lpi {
                return vi;
            }
        }
        if let Some((lp_prev, v_prev)) = prev {
            // Pressure decreases with index, so log p does too
            if lp <= lp_prev && lp >= lpi {
                let frac = (lp - lp_prev) / (lpi - lp_prev);
                return v_prev + frac * (vi - v_prev);
            }
        }
        prev = Some((lpi, vi));
    }

    // Above the highest valid level: clamp to it
    match prev {
        Some((_, v_top)) => v_top,
        None => MISSING,
    }
}

/// Temperature (°C) at pressure `p` (mb).
pub fn temp(prof: &ProfileSnapshot, p: f32) -> f32 {
    interp_logp(prof, p, |i| prof.tmpc(i))
}

/// Dew point (°C) at pressure `p` (mb).
pub fn dwpt(prof: &ProfileSnapshot, p: f32) -> f32 {
    interp_logp(prof, p, |i| prof.dwpc(i))
}

/// Height (m MSL) at pressure `p` (mb).
pub fn hght(prof: &ProfileSnapshot, p: f32) -> f32 {
    interp_logp(prof, p, |i| prof.hght(i))
}

/// Pressure (mb) at height `h` (m MSL); linear in log p against height.
pub fn pres(prof: &ProfileSnapshot, h: f32) -> f32 {
    if !qc(h) {
        return MISSING;
    }
    let mut prev: Option<(f32, f32)> = None; // (height, log10 pres)
    let mut first: Option<f32> = None;
    for i in 0..prof.len() {
        let hi = prof.hght(i);
        let pi = prof.pres(i);
        if !qc(hi) || !qc(pi) || pi <= 0.0 {
            continue;
        }
        let lpi = pi.log10();
        if first.is_none() {
            first = Some(lpi);
            if h <= hi {
                return pi;
            }
        }
        if let Some((h_prev, lp_prev)) = prev {
            if h >= h_prev && h <= hi {
                let frac = (h - h_prev) / (hi - h_prev);
                return 10.0_f32.powf(lp_prev + frac * (lpi - lp_prev));
            }
        }
        prev = Some((hi, lpi));
    }
    match prev {
        Some((_, lp_top)) => 10.0_f32.powf(lp_top),
        None => MISSING,
    }
}

/// Convert a height above sea level to height above ground.
pub fn to_agl(prof: &ProfileSnapshot, h_msl: f32) -> f32 {
    let sfc = prof.sfc_hght();
    if !qc(h_msl) || !qc(sfc) {
        return MISSING;
    }
    h_msl - sfc
}

/// Convert a height above ground to height above sea level.
pub fn to_msl(prof: &ProfileSnapshot, h_agl: f32) -> f32 {
    let sfc = prof.sfc_hght();
    if !qc(h_agl) || !qc(sfc) {
        return MISSING;
    }
    h_agl + sfc
}
