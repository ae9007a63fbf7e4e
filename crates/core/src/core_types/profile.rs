//! Immutable sounding snapshot
//!
//! A profile snapshot is the single input to every diagnostic in this crate:
//! per-level observation arrays ordered bottom-up (ascending height,
//! descending pressure), a surface index, the station latitude, and the
//! precomputed severe-weather indices. The snapshot is validated once at
//! construction and never mutated afterwards, so repeated evaluation of the
//! same snapshot is referentially transparent.

use crate::core_types::indices::SevereIndices;
use crate::core_types::missing::{qc, MISSING};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Construction-time validation failure for a profile snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The pressure array was empty.
    Empty,
    /// A level array did not match the pressure array length.
    LengthMismatch {
        /// Name of the offending array
        field: &'static str,
        /// Length of the pressure array
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Empty => write!(f, "profile has no levels"),
            ProfileError::LengthMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "level array '{field}' has {actual} entries, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Per-level observation arrays for one sounding, ordered bottom-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelData {
    /// Pressure (mb), strictly descending with index
    pub pres: Vec<f32>,
    /// Height (m MSL)
    pub hght: Vec<f32>,
    /// Temperature (°C)
    pub tmpc: Vec<f32>,
    /// Dew point (°C)
    pub dwpc: Vec<f32>,
    /// Wind direction (deg)
    pub wdir: Vec<f32>,
    /// Wind speed (kt)
    pub wspd: Vec<f32>,
    /// Vertical motion ω (Pa/s); `None` when the data source carries no
    /// vertical-motion field (observed soundings usually don't)
    pub omeg: Option<Vec<f32>>,
}

/// Validated, read-only sounding plus its precomputed indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pres: Vec<f32>,
    hght: Vec<f32>,
    tmpc: Vec<f32>,
    dwpc: Vec<f32>,
    wdir: Vec<f32>,
    wspd: Vec<f32>,
    omeg: Vec<f32>,
    sfc: usize,
    latitude: f32,
    indices: SevereIndices,
}

impl ProfileSnapshot {
    /// Validate level arrays and assemble a snapshot.
    ///
    /// The surface index is the lowest level with a valid temperature,
    /// matching the convention of upstream decoders that pad sub-station
    /// mandatory levels with the missing sentinel.
    ///
    /// # Errors
    /// [`ProfileError::Empty`] for a zero-level profile,
    /// [`ProfileError::LengthMismatch`] when any array disagrees with the
    /// pressure array length.
    pub fn new(
        levels: LevelData,
        latitude: f32,
        indices: SevereIndices,
    ) -> Result<Self, ProfileError> {
        let n = levels.pres.len();
        if n == 0 {
            return Err(ProfileError::Empty);
        }
        let check = |field: &'static str, len: usize| {
            if len == n {
                Ok(())
            } else {
                Err(ProfileError::LengthMismatch {
                    field,
                    expected: n,
                    actual: len,
                })
            }
        };
        check("hght", levels.hght.len())?;
        check("tmpc", levels.tmpc.len())?;
        check("dwpc", levels.dwpc.len())?;
        check("wdir", levels.wdir.len())?;
        check("wspd", levels.wspd.len())?;
        let omeg = match levels.omeg {
            Some(om) => {
                check("omeg", om.len())?;
                om
            }
            None => vec![MISSING; n],
        };

        let sfc = levels
            .tmpc
            .iter()
            .position(|&t| qc(t))
            .unwrap_or_default();

        Ok(ProfileSnapshot {
            pres: levels.pres,
            hght: levels.hght,
            tmpc: levels.tmpc,
            dwpc: levels.dwpc,
            wdir: levels.wdir,
            wspd: levels.wspd,
            omeg,
            sfc,
            latitude,
            indices,
        })
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.pres.len()
    }

    /// True when the profile holds no levels (never true post-construction).
    pub fn is_empty(&self) -> bool {
        self.pres.is_empty()
    }

    /// Index of the lowest valid level.
    pub fn sfc(&self) -> usize {
        self.sfc
    }

    /// Station latitude (deg, negative in the Southern Hemisphere).
    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    /// Precomputed severe-weather indices.
    pub fn indices(&self) -> &SevereIndices {
        &self.indices
    }

    /// Pressure at level `i` (mb).
    pub fn pres(&self, i: usize) -> f32 {
        self.pres[i]
    }

    /// Height at level `i` (m MSL).
    pub fn hght(&self, i: usize) -> f32 {
        self.hght[i]
    }

    /// Temperature at level `i` (°C).
    pub fn tmpc(&self, i: usize) -> f32 {
        self.tmpc[i]
    }

    /// Dew point at level `i` (°C).
    pub fn dwpc(&self, i: usize) -> f32 {
        self.dwpc[i]
    }

    /// Wind direction at level `i` (deg).
    pub fn wdir(&self, i: usize) -> f32 {
        self.wdir[i]
    }

    /// Wind speed at level `i` (kt).
    pub fn wspd(&self, i: usize) -> f32 {
        self.wspd[i]
    }

    /// Vertical motion ω at level `i` (Pa/s, negative upward).
    pub fn omeg(&self, i: usize) -> f32 {
        self.omeg[i]
    }

    /// Surface pressure (mb).
    pub fn sfc_pres(&self) -> f32 {
        self.pres[self.sfc]
    }

    /// Surface height (m MSL); used as the AGL datum.
    pub fn sfc_hght(&self) -> f32 {
        self.hght[self.sfc]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_level_data() -> LevelData {
        LevelData {
            pres: vec![1000.0, 850.0, 700.0],
            hght: vec![110.0, 1457.0, 3012.0],
            tmpc: vec![22.0, 12.0, 2.0],
            dwpc: vec![18.0, 8.0, -5.0],
            wdir: vec![180.0, 210.0, 240.0],
            wspd: vec![10.0, 25.0, 35.0],
            omeg: None,
        }
    }

    #[test]
    fn test_construction_and_accessors() {
        let prof =
            ProfileSnapshot::new(three_level_data(), 35.2, SevereIndices::default()).unwrap();
        assert_eq!(prof.len(), 3);
        assert_eq!(prof.sfc(), 0);
        assert_eq!(prof.sfc_pres(), 1000.0);
        assert_eq!(prof.tmpc(1), 12.0);
        assert_eq!(prof.wdir(2), 240.0);
        // Missing omega is padded with the sentinel
        assert!(!qc(prof.omeg(0)));
    }

    #[test]
    fn test_surface_skips_missing_levels() {
        let mut data = three_level_data();
        data.tmpc[0] = MISSING;
        let prof = ProfileSnapshot::new(data, 35.2, SevereIndices::default()).unwrap();
        assert_eq!(prof.sfc(), 1);
        assert_eq!(prof.sfc_pres(), 850.0);
    }

    #[test]
    fn test_empty_profile_rejected() {
        let err = ProfileSnapshot::new(LevelData::default(), 0.0, SevereIndices::default())
            .unwrap_err();
        assert_eq!(err, ProfileError::Empty);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut data = three_level_data();
        data.wspd.pop();
        let err = ProfileSnapshot::new(data, 0.0, SevereIndices::default()).unwrap_err();
        assert_eq!(
            err,
            ProfileError::LengthMismatch {
                field: "wspd",
                expected: 3,
                actual: 2
            }
        );
    }
}
