//! Moist Thermodynamics Toolkit
//!
//! Unit conversions, saturation quantities, and the Wobus-polynomial moist
//! adiabat used for wet-bulb temperature. All temperatures are °C unless a
//! function name says otherwise; pressures are millibars.
//!
//! # Scientific References
//! - Wobus, H. (c. 1970s). Saturation polynomial fit, as used in the NSHARP
//!   family of sounding analysis codes.
//! - Bolton, D. (1980). "The computation of equivalent potential temperature."
//!   Monthly Weather Review, 108, 1046-1053.
//! - NWS (2001). Wind chill temperature index.

use crate::core_types::missing::{qc, MISSING};

/// 0 °C expressed in Kelvin.
pub const ZEROCNK: f32 = 273.15;

/// Rd/Cp for dry air, exponent of the Poisson equation.
pub const ROCP: f32 = 0.28571426;

/// Convert Celsius to Kelvin.
#[inline]
pub fn ctok(t: f32) -> f32 {
    if qc(t) {
        t + ZEROCNK
    } else {
        MISSING
    }
}

/// Convert Celsius to Fahrenheit.
#[inline]
pub fn ctof(t: f32) -> f32 {
    if qc(t) {
        t * 1.8 + 32.0
    } else {
        MISSING
    }
}

/// Convert knots to miles per hour.
#[inline]
pub fn kts_to_mph(spd: f32) -> f32 {
    if qc(spd) {
        spd * 1.15077945
    } else {
        MISSING
    }
}

/// Saturation vapor pressure (mb) over liquid water.
///
/// Eighth-order polynomial fit; accurate to a fraction of a percent over
/// the meteorological range (-50 to +50 °C).
pub fn vappres(t: f32) -> f32 {
    if !qc(t) {
        return MISSING;
    }
    let mut pol = t * (1.1112018e-17 + t * -3.0994571e-20);
    pol = t * (2.1874425e-13 + t * (-1.789232e-15 + pol));
    pol = t * (4.3884180e-09 + t * (-2.988388e-11 + pol));
    pol = t * (7.8736169e-05 + t * (-6.111796e-07 + pol));
    pol = t * (-9.0826951e-03 + pol);
    pol = 0.99999683 + pol;
    6.1078 / pol.powi(8)
}

/// Mixing ratio (g/kg) at pressure `p` (mb) and temperature `t` (°C).
///
/// Includes the enhancement factor for moist air over the ideal-gas value.
pub fn mixratio(p: f32, t: f32) -> f32 {
    if !qc(p) || !qc(t) {
        return MISSING;
    }
    let x = 0.02 * (t - 12.5 + 7500.0 / p);
    let wfw = 1.0 + 0.0000045 * p + 0.0014 * x * x;
    let fwesw = wfw * vappres(t);
    621.97 * (fwesw / (p - fwesw))
}

/// Relative humidity (%) from pressure (mb), temperature and dew point (°C).
pub fn relh(p: f32, t: f32, td: f32) -> f32 {
    let num = mixratio(p, td);
    let den = mixratio(p, t);
    if !qc(num) || !qc(den) || den == 0.0 {
        return MISSING;
    }
    100.0 * num / den
}

/// Potential temperature (°C) of air at `p` (mb), `t` (°C), referenced to `p2`.
pub fn theta(p: f32, t: f32, p2: f32) -> f32 {
    if !qc(p) || !qc(t) || !qc(p2) {
        return MISSING;
    }
    (t + ZEROCNK) * (p2 / p).powf(ROCP) - ZEROCNK
}

/// Pressure level (mb) where a parcel of potential temperature `thta` (°C)
/// reaches temperature `t` (°C). Inverse of [`theta`].
pub fn thalvl(thta: f32, t: f32) -> f32 {
    if !qc(thta) || !qc(t) {
        return MISSING;
    }
    let t_k = t + ZEROCNK;
    let theta_k = thta + ZEROCNK;
    1000.0 / (theta_k / t_k).powf(1.0 / ROCP)
}

/// Temperature (°C) at the lifted condensation level of a parcel with
/// temperature `t` and dew point `td` (°C). Bolton (1980) empirical fit.
pub fn lcltemp(t: f32, td: f32) -> f32 {
    if !qc(t) || !qc(td) {
        return MISSING;
    }
    let s = t - td;
    let dlt = s * (1.2185 + 0.001278 * t + s * (-0.00219 + 1.173e-5 * s - 0.0000052 * t));
    t - dlt
}

/// Lift a parcel dry-adiabatically from (`p`, `t`, `td`) to its LCL.
///
/// Returns (LCL pressure mb, LCL temperature °C).
pub fn drylift(p: f32, t: f32, td: f32) -> (f32, f32) {
    let t2 = lcltemp(t, td);
    let p2 = thalvl(theta(p, t, 1000.0), t2);
    (p2, t2)
}

/// Wobus function: correction between dry and moist adiabats at 1000 mb.
///
/// Piecewise polynomial around 20 °C; the moist adiabat through (`1000`, `t`)
/// has wet-bulb potential temperature `t - wobf(t) + wobf(thw)`.
pub fn wobf(t: f32) -> f32 {
    if !qc(t) {
        return MISSING;
    }
    let x = t - 20.0;
    if x <= 0.0 {
        let pol = 1.0
            + x * (-8.8416605e-3
                + x * (1.4714143e-4
                    + x * (-9.671989e-7 + x * (-3.2607217e-8 + x * -3.8598073e-10))));
        15.13 / pol.powi(4)
    } else {
        let mut pol = x * (4.9618922e-07
            + x * (-6.1059365e-09 + x * (3.9401551e-11 + x * (-1.2588129e-13 + x * 1.668828e-16))));
        pol = 1.0 + x * (3.6182989e-03 + x * (-1.3603273e-05 + pol));
        29.93 / pol.powi(4) + 0.96 * x - 14.8
    }
}

/// Temperature (°C) on the moist adiabat of wet-bulb potential temperature
/// `thetam` (°C) at pressure `p` (mb). Iterative Wobus inversion.
pub fn satlift(p: f32, thetam: f32) -> f32 {
    if !qc(p) || !qc(thetam) {
        return MISSING;
    }
    if (p - 1000.0).abs() <= 0.001 {
        return thetam;
    }
    let pwrp = (p / 1000.0).powf(ROCP);
    let mut t1 = (thetam + ZEROCNK) * pwrp - ZEROCNK;
    let mut e1 = wobf(t1) - wobf(thetam);
    let mut rate = 1.0;
    // Secant iteration; converges in 2-3 passes for meteorological input
    for _ in 0..20 {
        let t2 = t1 - e1 * rate;
        let mut e2 = (t2 + ZEROCNK) / pwrp - ZEROCNK;
        e2 += wobf(t2) - wobf(e2) - thetam;
        let eor = e2 * rate;
        if eor.abs() <= 0.1 {
            return t2 - eor;
        }
        if (e2 - e1).abs() > f32::EPSILON {
            rate = (t2 - t1) / (e2 - e1);
        }
        t1 = t2;
        e1 = e2;
    }
    t1
}

/// Lift a saturated parcel from (`p`, `t`) moist-adiabatically to `p2`.
pub fn wetlift(p: f32, t: f32, p2: f32) -> f32 {
    let thta = theta(p, t, 1000.0);
    if !qc(thta) {
        return MISSING;
    }
    let thetam = thta - wobf(thta) + wobf(t);
    satlift(p2, thetam)
}

/// Wet-bulb temperature (°C) at pressure `p` (mb) from temperature and
/// dew point (°C): dry lift to the LCL, then moist descent back to `p`.
pub fn wetbulb(p: f32, t: f32, td: f32) -> f32 {
    if !qc(p) || !qc(t) || !qc(td) {
        return MISSING;
    }
    let (p2, t2) = drylift(p, t, td);
    wetlift(p2, t2, p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vappres_reference_points() {
        // 6.11 mb at 0 °C, ~23.4 mb at 20 °C, ~1.25 mb at -20 °C over
        // liquid water (Smithsonian tables)
        assert_relative_eq!(vappres(0.0), 6.1078, max_relative = 0.005);
        assert_relative_eq!(vappres(20.0), 23.37, max_relative = 0.01);
        assert_relative_eq!(vappres(-20.0), 1.254, max_relative = 0.01);
        // Monotone through the meteorological range
        assert!(vappres(-10.0) < vappres(0.0) && vappres(0.0) < vappres(10.0));
    }

    #[test]
    fn test_relh_saturated_air_is_100_percent() {
        let rh = relh(1000.0, 15.0, 15.0);
        assert_relative_eq!(rh, 100.0, epsilon = 0.1);
    }

    #[test]
    fn test_relh_decreases_with_dewpoint_depression() {
        let rh_moist = relh(1000.0, 20.0, 18.0);
        let rh_dry = relh(1000.0, 20.0, 5.0);
        assert!(rh_moist > 85.0 && rh_moist < 100.0);
        assert!(rh_dry < 45.0, "dry RH was {rh_dry}");
    }

    #[test]
    fn test_theta_thalvl_round_trip() {
        let th = theta(850.0, 12.0, 1000.0);
        let p_back = thalvl(th, 12.0);
        assert_relative_eq!(p_back, 850.0, epsilon = 0.5);
    }

    #[test]
    fn test_wetbulb_between_dewpoint_and_temperature() {
        let tw = wetbulb(950.0, 25.0, 15.0);
        assert!(
            tw > 15.0 && tw < 25.0,
            "wet bulb {tw} outside (Td, T) for unsaturated air"
        );
    }

    #[test]
    fn test_wetbulb_of_saturated_air_equals_temperature() {
        let tw = wetbulb(1000.0, 10.0, 10.0);
        assert_relative_eq!(tw, 10.0, epsilon = 0.2);
    }

    #[test]
    fn test_sentinel_propagates_through_chain() {
        assert_eq!(ctok(MISSING), MISSING);
        assert_eq!(vappres(MISSING), MISSING);
        assert_eq!(relh(1000.0, MISSING, 5.0), MISSING);
        assert_eq!(wetbulb(MISSING, 10.0, 5.0), MISSING);
    }

    #[test]
    fn test_unit_conversions() {
        assert_relative_eq!(ctof(0.0), 32.0);
        assert_relative_eq!(ctof(100.0), 212.0);
        assert_relative_eq!(kts_to_mph(35.0), 40.277, epsilon = 0.01);
    }
}
