//! Precomputed severe-weather indices
//!
//! These scalars are produced upstream from parcel lifts and kinematic
//! integrations over the full sounding and are consumed here as opaque
//! inputs to the hazard rule cascades. Anything the upstream stage could
//! not compute arrives as [`MISSING`](super::missing::MISSING).
//!
//! # Scientific References
//! - Thompson, R.L. et al. (2003). "Close proximity soundings within
//!   supercell environments." Weather and Forecasting, 18, 1243-1261.
//! - Thompson, R.L. et al. (2012). "Convective modes for significant severe
//!   thunderstorms in the contiguous United States."

use crate::core_types::missing::MISSING;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Wind-component pair in knots (u east, v north).
pub type WindComponents = Vector2<f32>;

/// Buoyancy summary for one lifted parcel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParcelStats {
    /// Lifted condensation level height (m AGL)
    pub lcl_height: f32,
    /// Convective inhibition (J/kg, non-positive)
    pub cin: f32,
}

impl Default for ParcelStats {
    fn default() -> Self {
        ParcelStats {
            lcl_height: MISSING,
            cin: MISSING,
        }
    }
}

/// Opaque severe-weather index set attached to a profile snapshot.
///
/// Right/left pairs exist because supercell motion splits into a
/// right-moving and a left-moving member; the hazard classifier picks the
/// hemisphere-appropriate member before evaluating any rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevereIndices {
    /// Surface-based parcel
    pub sfc_parcel: ParcelStats,
    /// 100-mb mixed-layer parcel
    pub ml_parcel: ParcelStats,
    /// Most-unstable parcel
    pub mu_parcel: ParcelStats,

    /// Effective-layer significant tornado parameter (CIN term included)
    pub stp_eff: f32,
    /// Fixed-layer significant tornado parameter
    pub stp_fixed: f32,
    /// 0-1 km storm-relative helicity (m²/s²)
    pub srh_1km: f32,
    /// Effective-layer SRH for the right-moving supercell (m²/s²)
    pub right_esrh: f32,
    /// Effective-layer SRH for the left-moving supercell (m²/s²)
    pub left_esrh: f32,
    /// Supercell composite parameter, right mover
    pub right_scp: f32,
    /// Supercell composite parameter, left mover
    pub left_scp: f32,

    /// 4-6 km AGL storm-relative wind (kt)
    pub srw_4_6km: WindComponents,
    /// Surface to 8 km bulk shear (kt)
    pub sfc_8km_shear: WindComponents,
    /// Cloud-layer upshear wind (kt), used by the flash-flood rule
    pub upshear: WindComponents,

    /// Effective inflow base (m AGL); 0 means surface based
    pub eff_inflow_base: f32,

    /// Low-level mean relative humidity (%)
    pub low_rh: f32,
    /// Mid-level mean relative humidity (%)
    pub mid_rh: f32,
    /// Significant hail parameter
    pub ship: f32,
    /// Downdraft CAPE (J/kg)
    pub dcape: f32,
    /// Significant severe parameter (m³/s³)
    pub sig_severe: f32,
    /// Microburst composite parameter
    pub mmp: f32,
    /// Wind damage parameter
    pub wndg: f32,

    /// Precipitable water (in)
    pub pwat: f32,
    /// Precipitable-water climatology flag (2+ = anomalously moist)
    pub pwv_climo_flag: i32,
    /// Forecast maximum surface temperature (°C)
    pub max_temp: f32,
}

impl Default for SevereIndices {
    fn default() -> Self {
        SevereIndices {
            sfc_parcel: ParcelStats::default(),
            ml_parcel: ParcelStats::default(),
            mu_parcel: ParcelStats::default(),
            stp_eff: MISSING,
            stp_fixed: MISSING,
            srh_1km: MISSING,
            right_esrh: MISSING,
            left_esrh: MISSING,
            right_scp: MISSING,
            left_scp: MISSING,
            srw_4_6km: WindComponents::new(MISSING, MISSING),
            sfc_8km_shear: WindComponents::new(MISSING, MISSING),
            upshear: WindComponents::new(MISSING, MISSING),
            eff_inflow_base: MISSING,
            low_rh: MISSING,
            mid_rh: MISSING,
            ship: MISSING,
            dcape: MISSING,
            sig_severe: MISSING,
            mmp: MISSING,
            wndg: MISSING,
            pwat: MISSING,
            pwv_climo_flag: 0,
            max_temp: MISSING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::missing::qc;

    #[test]
    fn test_default_indices_are_all_missing() {
        let idx = SevereIndices::default();
        assert!(!qc(idx.stp_eff));
        assert!(!qc(idx.ml_parcel.cin));
        assert!(!qc(idx.srw_4_6km.x));
        assert_eq!(idx.pwv_climo_flag, 0);
    }
}
