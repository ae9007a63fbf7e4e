//! Convective hazard rule tables
//!
//! Tornado and severe-wind/hail decision cascades over the precomputed
//! severe-weather indices. Each group is an ordered (predicate -> category)
//! table; the first matching rule in a group wins and the rest of the group
//! is skipped. Threshold suggestions follow Storm Prediction Center
//! proximity-sounding climatology (Thompson et al. 2003, 2012).
//!
//! Every comparison is sentinel-guarded: a missing index never satisfies a
//! threshold, so degraded profiles fall through to "no hazard".

use crate::core_types::missing::{qc, qc_neg};
use crate::core_types::profile::ProfileSnapshot;
use crate::hazard::HazardType;
use crate::params;
use nalgebra::Vector2;

/// Guarded `>=` against a physical threshold.
#[inline]
fn ge(v: f32, threshold: f32) -> bool {
    qc(v) && v >= threshold
}

/// Guarded `>`.
#[inline]
fn gt(v: f32, threshold: f32) -> bool {
    qc(v) && v > threshold
}

/// Guarded `<`.
#[inline]
fn lt(v: f32, threshold: f32) -> bool {
    qc(v) && v < threshold
}

/// Wind magnitude (kt) from components, sentinel-guarded.
pub(crate) fn wind_mag(v: Vector2<f32>) -> f32 {
    if qc(v.x) && qc(v.y) {
        v.norm()
    } else {
        crate::core_types::missing::MISSING
    }
}

/// Hemisphere-adjusted scalar inputs for the convective rule groups.
///
/// In the Southern Hemisphere supercells rotate the other way: the
/// helicity-derived indices flip sign and the left-moving supercell takes
/// the role the right mover plays north of the equator. The adjustment
/// happens once, here, before any rule is evaluated — rules never re-invert.
#[derive(Debug, Clone, Copy)]
pub struct HazardInputs {
    pub(crate) stp_eff: f32,
    pub(crate) stp_fixed: f32,
    pub(crate) srh_1km: f32,
    pub(crate) esrh: f32,
    pub(crate) scp: f32,
    /// 4-6 km storm-relative wind magnitude (kt)
    pub(crate) srw_4_6km: f32,
    /// Surface to 8 km bulk shear magnitude (kt)
    pub(crate) shear_8km: f32,
    pub(crate) sfc_lcl: f32,
    pub(crate) ml_lcl: f32,
    pub(crate) ml_cin: f32,
    pub(crate) mu_cin: f32,
    /// 0-1 km AGL lapse rate (°C/km)
    pub(crate) lr_0_1km: f32,
    /// Effective inflow base (m AGL)
    pub(crate) inflow_base: f32,
    pub(crate) low_rh: f32,
    pub(crate) mid_rh: f32,
    pub(crate) ship: f32,
    pub(crate) dcape: f32,
    pub(crate) sig_severe: f32,
    pub(crate) mmp: f32,
    pub(crate) wndg: f32,
    pub(crate) pwv_climo_flag: i32,
    /// Cloud-layer upshear wind magnitude (kt)
    pub(crate) upshear: f32,
}

impl HazardInputs {
    /// Gather and hemisphere-adjust the convective inputs for one profile.
    pub fn from_profile(prof: &ProfileSnapshot) -> Self {
        let idx = prof.indices();
        let southern = prof.latitude() < 0.0;
        let (srh_1km, stp_eff, stp_fixed, esrh, scp) = if southern {
            (
                qc_neg(idx.srh_1km),
                qc_neg(idx.stp_eff),
                qc_neg(idx.stp_fixed),
                qc_neg(idx.left_esrh),
                qc_neg(idx.left_scp),
            )
        } else {
            (
                idx.srh_1km,
                idx.stp_eff,
                idx.stp_fixed,
                idx.right_esrh,
                idx.right_scp,
            )
        };

        HazardInputs {
            stp_eff,
            stp_fixed,
            srh_1km,
            esrh,
            scp,
            srw_4_6km: wind_mag(idx.srw_4_6km),
            shear_8km: wind_mag(idx.sfc_8km_shear),
            sfc_lcl: idx.sfc_parcel.lcl_height,
            ml_lcl: idx.ml_parcel.lcl_height,
            ml_cin: idx.ml_parcel.cin,
            mu_cin: idx.mu_parcel.cin,
            lr_0_1km: params::lapse_rate(prof, 0.0, 1000.0),
            inflow_base: idx.eff_inflow_base,
            low_rh: idx.low_rh,
            mid_rh: idx.mid_rh,
            ship: idx.ship,
            dcape: idx.dcape,
            sig_severe: idx.sig_severe,
            mmp: idx.mmp,
            wndg: idx.wndg,
            pwv_climo_flag: idx.pwv_climo_flag,
            upshear: wind_mag(idx.upshear),
        }
    }

    /// Effective inflow rooted at the ground (surface-based storm).
    fn surface_based(&self) -> bool {
        qc(self.inflow_base) && self.inflow_base == 0.0
    }
}

type ConvectiveRule = (fn(&HazardInputs) -> bool, HazardType);

/// All ingredients maxed out: strong effective and fixed STP, large
/// low-level and effective helicity, strong mid-level storm-relative flow
/// and deep shear, low LCLs, steep low-level lapse rate, weak inhibition,
/// surface-based inflow.
fn pds_tornado(i: &HazardInputs) -> bool {
    ge(i.stp_eff, 3.0)
        && ge(i.stp_fixed, 3.0)
        && ge(i.srh_1km, 200.0)
        && ge(i.esrh, 200.0)
        && ge(i.srw_4_6km, 15.0)
        && gt(i.shear_8km, 45.0)
        && lt(i.sfc_lcl, 1000.0)
        && lt(i.ml_lcl, 1200.0)
        && ge(i.lr_0_1km, 5.0)
        && ge(i.ml_cin, -50.0)
        && i.surface_based()
}

/// Very high STP with manageable inhibition.
fn tornado_high_stp(i: &HazardInputs) -> bool {
    (ge(i.stp_eff, 3.0) || ge(i.stp_fixed, 4.0)) && ge(i.ml_cin, -125.0) && i.surface_based()
}

/// Moderate STP backed by strong mid-level flow or deep-layer shear.
fn tornado_kinematic(i: &HazardInputs) -> bool {
    (ge(i.stp_eff, 1.0) || ge(i.stp_fixed, 1.0))
        && (ge(i.srw_4_6km, 15.0) || ge(i.shear_8km, 40.0))
        && ge(i.ml_cin, -50.0)
        && i.surface_based()
}

/// Moderate STP in a moist, steep-lapse-rate low-level environment.
fn tornado_moist_unstable(i: &HazardInputs) -> bool {
    let mean_rh_ok = qc(i.low_rh) && qc(i.mid_rh) && (i.low_rh + i.mid_rh) / 2.0 >= 60.0;
    (ge(i.stp_eff, 1.0) || ge(i.stp_fixed, 1.0))
        && mean_rh_ok
        && ge(i.lr_0_1km, 5.0)
        && ge(i.ml_cin, -50.0)
        && i.surface_based()
}

/// Moderate STP alone, tolerating more inhibition.
fn marginal_tornado_cin(i: &HazardInputs) -> bool {
    (ge(i.stp_eff, 1.0) || ge(i.stp_fixed, 1.0)) && ge(i.ml_cin, -150.0) && i.surface_based()
}

/// Low-end STP with substantial helicity.
///
/// The grouping is asymmetric: the CIN and inflow-base terms bind only to
/// the fixed-layer branch, never to the effective branch. Regrouping
/// changes which marginal soundings flag; see the branch tests before
/// touching it.
fn marginal_tornado_helicity(i: &HazardInputs) -> bool {
    (ge(i.stp_eff, 0.5) && ge(i.esrh, 150.0))
        || (ge(i.stp_fixed, 0.5)
            && ge(i.srh_1km, 150.0)
            && ge(i.ml_cin, -50.0)
            && i.surface_based())
}

/// Tornado group, most significant first.
pub(crate) const TORNADO_RULES: &[ConvectiveRule] = &[
    (pds_tornado, HazardType::EnhancedTornado),
    (tornado_high_stp, HazardType::Tornado),
    (tornado_kinematic, HazardType::Tornado),
    (tornado_moist_unstable, HazardType::Tornado),
    (marginal_tornado_cin, HazardType::MarginalTornado),
    (marginal_tornado_helicity, HazardType::MarginalTornado),
];

/// Any composite supercell signal with weak inhibition.
fn severe_composite(i: &HazardInputs) -> bool {
    (ge(i.stp_fixed, 1.0) || ge(i.scp, 4.0) || ge(i.stp_eff, 1.0)) && ge(i.mu_cin, -50.0)
}

/// Supercell composite with a hail or downburst ingredient.
fn severe_hail_downburst(i: &HazardInputs) -> bool {
    ge(i.scp, 2.0) && (ge(i.ship, 1.0) || ge(i.dcape, 750.0)) && ge(i.mu_cin, -50.0)
}

/// Significant-severe parameter with maintained microburst potential.
fn severe_sig_param(i: &HazardInputs) -> bool {
    ge(i.sig_severe, 30000.0) && ge(i.mmp, 0.6) && ge(i.mu_cin, -50.0)
}

/// Marginal: any low-end wind/hail/supercell signal.
fn marginal_severe(i: &HazardInputs) -> bool {
    ge(i.mu_cin, -75.0) && (ge(i.wndg, 0.5) || ge(i.ship, 0.5) || ge(i.scp, 0.5))
}

/// Severe-wind/hail group, most significant first.
pub(crate) const SEVERE_RULES: &[ConvectiveRule] = &[
    (severe_composite, HazardType::Severe),
    (severe_hail_downburst, HazardType::Severe),
    (severe_sig_param, HazardType::Severe),
    (marginal_severe, HazardType::MarginalSevere),
];

/// First matching rule of a group, if any.
pub(crate) fn evaluate_group(
    rules: &[ConvectiveRule],
    inputs: &HazardInputs,
) -> Option<HazardType> {
    rules
        .iter()
        .find(|(test, _)| test(inputs))
        .map(|&(_, hazard)| hazard)
}

/// Anomalously moist column under slow cloud-layer flow: moisture with
/// nothing to move it along.
pub(crate) fn flash_flood(i: &HazardInputs) -> bool {
    i.pwv_climo_flag >= 2 && lt(i.upshear, 25.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::missing::MISSING;

    fn quiet_inputs() -> HazardInputs {
        HazardInputs {
            stp_eff: MISSING,
            stp_fixed: MISSING,
            srh_1km: MISSING,
            esrh: MISSING,
            scp: MISSING,
            srw_4_6km: MISSING,
            shear_8km: MISSING,
            sfc_lcl: MISSING,
            ml_lcl: MISSING,
            ml_cin: MISSING,
            mu_cin: MISSING,
            lr_0_1km: MISSING,
            inflow_base: MISSING,
            low_rh: MISSING,
            mid_rh: MISSING,
            ship: MISSING,
            dcape: MISSING,
            sig_severe: MISSING,
            mmp: MISSING,
            wndg: MISSING,
            pwv_climo_flag: 0,
            upshear: MISSING,
        }
    }

    #[test]
    fn test_all_missing_inputs_match_nothing() {
        let i = quiet_inputs();
        assert_eq!(evaluate_group(TORNADO_RULES, &i), None);
        assert_eq!(evaluate_group(SEVERE_RULES, &i), None);
        assert!(!flash_flood(&i));
    }

    #[test]
    fn test_pds_tornado_outranks_plain_tornado() {
        let i = HazardInputs {
            stp_eff: 4.0,
            stp_fixed: 4.5,
            srh_1km: 350.0,
            esrh: 300.0,
            srw_4_6km: 22.0,
            shear_8km: 55.0,
            sfc_lcl: 700.0,
            ml_lcl: 900.0,
            lr_0_1km: 6.5,
            ml_cin: -15.0,
            inflow_base: 0.0,
            ..quiet_inputs()
        };
        assert_eq!(
            evaluate_group(TORNADO_RULES, &i),
            Some(HazardType::EnhancedTornado)
        );
    }

    #[test]
    fn test_high_stp_alone_is_tornado() {
        let i = HazardInputs {
            stp_eff: 3.5,
            ml_cin: -60.0,
            inflow_base: 0.0,
            ..quiet_inputs()
        };
        assert_eq!(evaluate_group(TORNADO_RULES, &i), Some(HazardType::Tornado));
    }

    #[test]
    fn test_elevated_inflow_blocks_tornado_rules() {
        let i = HazardInputs {
            stp_eff: 3.5,
            ml_cin: -60.0,
            inflow_base: 750.0,
            ..quiet_inputs()
        };
        assert_eq!(evaluate_group(TORNADO_RULES, &i), None);
    }

    #[test]
    fn test_marginal_tornado_on_cin_tolerance() {
        let i = HazardInputs {
            stp_fixed: 1.2,
            ml_cin: -140.0,
            inflow_base: 0.0,
            ..quiet_inputs()
        };
        assert_eq!(
            evaluate_group(TORNADO_RULES, &i),
            Some(HazardType::MarginalTornado)
        );
    }

    #[test]
    fn test_helicity_rule_effective_branch_ignores_cin_and_inflow() {
        // Asymmetric grouping: the effective-STP branch fires even with
        // huge inhibition and an elevated inflow base
        let i = HazardInputs {
            stp_eff: 0.7,
            esrh: 180.0,
            ml_cin: -400.0,
            inflow_base: 1500.0,
            ..quiet_inputs()
        };
        assert_eq!(
            evaluate_group(TORNADO_RULES, &i),
            Some(HazardType::MarginalTornado)
        );
    }

    #[test]
    fn test_helicity_rule_fixed_branch_requires_cin_and_inflow() {
        let blocked = HazardInputs {
            stp_fixed: 0.7,
            srh_1km: 180.0,
            ml_cin: -400.0,
            inflow_base: 0.0,
            ..quiet_inputs()
        };
        assert_eq!(evaluate_group(TORNADO_RULES, &blocked), None);

        let firing = HazardInputs {
            ml_cin: -30.0,
            ..blocked
        };
        assert_eq!(
            evaluate_group(TORNADO_RULES, &firing),
            Some(HazardType::MarginalTornado)
        );
    }

    #[test]
    fn test_severe_cascade_order() {
        let i = HazardInputs {
            scp: 2.5,
            ship: 1.3,
            mu_cin: -20.0,
            ..quiet_inputs()
        };
        assert_eq!(evaluate_group(SEVERE_RULES, &i), Some(HazardType::Severe));

        let marginal = HazardInputs {
            scp: 0.6,
            ship: MISSING,
            ..i
        };
        assert_eq!(
            evaluate_group(SEVERE_RULES, &marginal),
            Some(HazardType::MarginalSevere)
        );
    }

    #[test]
    fn test_flash_flood_needs_both_ingredients() {
        let moist_slow = HazardInputs {
            pwv_climo_flag: 2,
            upshear: 12.0,
            ..quiet_inputs()
        };
        assert!(flash_flood(&moist_slow));

        let moist_fast = HazardInputs {
            upshear: 30.0,
            ..moist_slow
        };
        assert!(!flash_flood(&moist_fast));

        let dry_slow = HazardInputs {
            pwv_climo_flag: 1,
            ..moist_slow
        };
        assert!(!flash_flood(&dry_slow));
    }

    #[test]
    fn test_missing_wind_components_give_missing_magnitude() {
        assert!(!qc(wind_mag(Vector2::new(MISSING, 10.0))));
        assert!(qc(wind_mag(Vector2::new(3.0, 4.0))));
        assert_eq!(wind_mag(Vector2::new(3.0, 4.0)), 5.0);
    }
}
