//! Precipitation-Type Classifier
//!
//! Combines the source phase with the warm/cold areas of the temperature
//! profile into a single best-guess precipitation type. The decision logic
//! is an ordered rule table evaluated strictly top to bottom; the first rule
//! producing a type wins and nothing after it is consulted, which keeps the
//! priority semantics explicit and testable per rule.

use crate::core_types::missing::qc;
use crate::core_types::profile::ProfileSnapshot;
use crate::interp;
use crate::precip::energy::LayerEnergy;
use crate::precip::source::{InitPhase, PrecipSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Best-guess precipitation type at the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecipType {
    /// No precipitation expected
    None,
    /// Rain
    Rain,
    /// Snow
    Snow,
    /// Sleet (ice pellets)
    Sleet,
    /// Sleet mixed with snow
    SleetAndSnow,
    /// Freezing rain or freezing drizzle
    FreezingRain,
    /// Profile too ambiguous or degraded to classify
    Unknown,
}

impl PrecipType {
    /// Display label; the trailing period is part of the wire contract
    /// with the presentation layer.
    pub fn label(self) -> &'static str {
        match self {
            PrecipType::None => "None.",
            PrecipType::Rain => "Rain.",
            PrecipType::Snow => "Snow.",
            PrecipType::Sleet => "Sleet.",
            PrecipType::SleetAndSnow => "Sleet and Snow.",
            PrecipType::FreezingRain => "Freezing Rain/Drizzle.",
            PrecipType::Unknown => "Unknown.",
        }
    }

    /// True when the label names snow (plain snow or a sleet/snow mix);
    /// the blizzard hazard rule keys on this.
    pub fn is_snowy(self) -> bool {
        self.label().contains("Snow")
    }
}

impl std::fmt::Display for PrecipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs to one classification pass.
struct RuleContext {
    phase: InitPhase,
    /// Positive area of the temperature profile (J/kg)
    tpos: f32,
    /// Negative area of the temperature profile (J/kg)
    tneg: f32,
    /// Surface temperature (°C)
    sfc_temp: f32,
    /// Source level height above ground (m)
    source_agl: f32,
    /// Temperature at the source level (°C)
    source_temp: f32,
}

/// Ordered (predicate -> type) rule table; first `Some` wins.
type Rule = fn(&RuleContext) -> Option<PrecipType>;

const RULES: &[Rule] = &[
    rule_no_source,
    rule_degraded_energies,
    rule_rain_all_warm,
    rule_snow_all_cold,
    rule_mixed_warm_surface,
    rule_mixed_cold_surface,
    rule_snow_warm_surface,
    rule_warm_layer_aloft,
];

/// No precipitation source at all.
fn rule_no_source(ctx: &RuleContext) -> Option<PrecipType> {
    (ctx.phase.code() < 0).then_some(PrecipType::None)
}

/// Sentinel energies mean the sounding was unusable below the source;
/// refuse to guess rather than compare against the sentinel.
fn rule_degraded_energies(ctx: &RuleContext) -> Option<PrecipType> {
    (!qc(ctx.tpos) || !qc(ctx.tneg)).then_some(PrecipType::Unknown)
}

/// Rain-sourced, nothing below freezing on the way down, warm surface.
fn rule_rain_all_warm(ctx: &RuleContext) -> Option<PrecipType> {
    (ctx.phase == InitPhase::Rain
        && ctx.tneg >= 0.0
        && qc(ctx.sfc_temp)
        && ctx.sfc_temp > 0.0)
        .then_some(PrecipType::Rain)
}

/// Snow-sourced and subfreezing the whole way down.
fn rule_snow_all_cold(ctx: &RuleContext) -> Option<PrecipType> {
    (ctx.phase == InitPhase::Snow
        && ctx.tpos <= 0.0
        && qc(ctx.sfc_temp)
        && ctx.sfc_temp <= 0.0)
        .then_some(PrecipType::Snow)
}

/// Mixed-phase source but the surface is above freezing.
fn rule_mixed_warm_surface(ctx: &RuleContext) -> Option<PrecipType> {
    (ctx.phase == InitPhase::FreezingOrMix
        && ctx.tpos <= 0.0
        && qc(ctx.sfc_temp)
        && ctx.sfc_temp > 0.0)
        .then_some(PrecipType::Rain)
}

/// Mixed-phase source, cold all the way down: sleet when the source is
/// high enough for refreezing, freezing rain/drizzle when it is not.
fn rule_mixed_cold_surface(ctx: &RuleContext) -> Option<PrecipType> {
    if !(ctx.phase == InitPhase::FreezingOrMix
        && ctx.tpos <= 0.0
        && qc(ctx.sfc_temp)
        && ctx.sfc_temp <= 0.0)
    {
        return None;
    }
    if qc(ctx.source_agl) && ctx.source_agl >= 3000.0 {
        if qc(ctx.source_temp) && ctx.source_temp <= -4.0 {
            Some(PrecipType::SleetAndSnow)
        } else {
            Some(PrecipType::Sleet)
        }
    } else {
        Some(PrecipType::FreezingRain)
    }
}

/// Snow-sourced but the surface is above freezing: melts when warm enough.
fn rule_snow_warm_surface(ctx: &RuleContext) -> Option<PrecipType> {
    if !(ctx.phase == InitPhase::Snow
        && ctx.tpos <= 0.0
        && qc(ctx.sfc_temp)
        && ctx.sfc_temp > 0.0)
    {
        return None;
    }
    if ctx.sfc_temp > 4.0 {
        Some(PrecipType::Rain)
    } else {
        Some(PrecipType::Snow)
    }
}

/// Genuine warm layer aloft: weigh the melting area against the refreezing
/// area beneath it. The threshold curve y = 0.62x + 60 separates sleet
/// (deep refreezing) from freezing rain or plain rain.
fn rule_warm_layer_aloft(ctx: &RuleContext) -> Option<PrecipType> {
    if ctx.tpos <= 0.0 {
        return None;
    }
    let refreeze_needed = 0.62 * ctx.tpos + 60.0;
    if -ctx.tneg > refreeze_needed {
        Some(PrecipType::Sleet)
    } else if qc(ctx.sfc_temp) && ctx.sfc_temp <= 0.0 {
        Some(PrecipType::FreezingRain)
    } else {
        Some(PrecipType::Rain)
    }
}

/// Best-guess precipitation type from the locator output and the raw
/// temperature-profile areas.
pub fn best_guess(
    prof: &ProfileSnapshot,
    src: &PrecipSource,
    temp_energy: &LayerEnergy,
) -> PrecipType {
    let ctx = RuleContext {
        phase: src.phase,
        tpos: temp_energy.pos,
        tneg: temp_energy.neg,
        sfc_temp: prof.tmpc(prof.sfc()),
        source_agl: interp::to_agl(prof, interp::hght(prof, src.level)),
        source_temp: src.temp,
    };
    let ptype = RULES
        .iter()
        .find_map(|rule| rule(&ctx))
        .unwrap_or(PrecipType::Unknown);
    debug!(?ptype, phase = ctx.phase.code(), "precipitation type classified");
    ptype
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::indices::SevereIndices;
    use crate::core_types::profile::LevelData;

    fn profile_with_sfc_temp(sfc_temp: f32) -> ProfileSnapshot {
        let data = LevelData {
            pres: vec![1000.0, 850.0, 700.0, 500.0],
            hght: vec![100.0, 1450.0, 3000.0, 5600.0],
            tmpc: vec![sfc_temp, sfc_temp - 9.0, sfc_temp - 20.0, sfc_temp - 36.0],
            dwpc: vec![sfc_temp - 2.0, sfc_temp - 11.0, sfc_temp - 24.0, sfc_temp - 42.0],
            wdir: vec![180.0; 4],
            wspd: vec![12.0; 4],
            omeg: None,
        };
        ProfileSnapshot::new(data, 40.0, SevereIndices::default()).unwrap()
    }

    fn source(phase: InitPhase, level: f32, temp: f32) -> PrecipSource {
        PrecipSource {
            level,
            phase,
            temp,
            label: "",
        }
    }

    #[test]
    fn test_no_source_gives_none() {
        let prof = profile_with_sfc_temp(-5.0);
        let t = best_guess(
            &prof,
            &PrecipSource::not_found(),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::None);
        assert_eq!(t.label(), "None.");
    }

    #[test]
    fn test_missing_energies_give_unknown() {
        let prof = profile_with_sfc_temp(2.0);
        let t = best_guess(
            &prof,
            &source(InitPhase::Rain, 800.0, 2.0),
            &LayerEnergy::missing(),
        );
        assert_eq!(t, PrecipType::Unknown);
    }

    #[test]
    fn test_warm_rain() {
        let prof = profile_with_sfc_temp(12.0);
        let t = best_guess(
            &prof,
            &source(InitPhase::Rain, 800.0, 3.0),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::Rain);
    }

    #[test]
    fn test_deep_cold_snow() {
        let prof = profile_with_sfc_temp(-4.0);
        let t = best_guess(
            &prof,
            &source(InitPhase::Snow, 750.0, -12.0),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::Snow);
    }

    #[test]
    fn test_mixed_source_high_and_cold_is_sleet() {
        // Source at 680 mb sits just above 3000 m AGL for this station
        let prof = profile_with_sfc_temp(-2.0);
        let t = best_guess(
            &prof,
            &source(InitPhase::FreezingOrMix, 680.0, -3.0),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::Sleet);
    }

    #[test]
    fn test_mixed_source_high_and_very_cold_is_sleet_and_snow() {
        let prof = profile_with_sfc_temp(-2.0);
        let t = best_guess(
            &prof,
            &source(InitPhase::FreezingOrMix, 680.0, -4.5),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::SleetAndSnow);
        assert!(t.is_snowy());
    }

    #[test]
    fn test_mixed_source_low_is_freezing_drizzle() {
        let prof = profile_with_sfc_temp(-2.0);
        let t = best_guess(
            &prof,
            &source(InitPhase::FreezingOrMix, 900.0, -2.0),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::FreezingRain);
        assert_eq!(t.label(), "Freezing Rain/Drizzle.");
    }

    #[test]
    fn test_snow_source_marginally_warm_surface_stays_snow() {
        let prof = profile_with_sfc_temp(2.5);
        let t = best_guess(
            &prof,
            &source(InitPhase::Snow, 750.0, -15.0),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::Snow);
    }

    #[test]
    fn test_snow_source_very_warm_surface_melts_to_rain() {
        let prof = profile_with_sfc_temp(6.0);
        let t = best_guess(
            &prof,
            &source(InitPhase::Snow, 750.0, -15.0),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::Rain);
    }

    #[test]
    fn test_warm_layer_with_deep_refreezing_is_sleet() {
        let prof = profile_with_sfc_temp(-3.0);
        let energy = LayerEnergy {
            pos: 50.0,
            neg: -150.0, // |neg| = 150 > 0.62*50 + 60 = 91
            top: 850.0,
            bot: 950.0,
        };
        let t = best_guess(&prof, &source(InitPhase::Snow, 750.0, -10.0), &energy);
        assert_eq!(t, PrecipType::Sleet);
    }

    #[test]
    fn test_warm_layer_shallow_refreezing_cold_surface_is_freezing_rain() {
        let prof = profile_with_sfc_temp(-1.0);
        let energy = LayerEnergy {
            pos: 100.0,
            neg: -80.0, // |neg| = 80 < 0.62*100 + 60 = 122
            top: 850.0,
            bot: 950.0,
        };
        let t = best_guess(&prof, &source(InitPhase::Snow, 750.0, -10.0), &energy);
        assert_eq!(t, PrecipType::FreezingRain);
    }

    #[test]
    fn test_warm_layer_warm_surface_is_rain() {
        let prof = profile_with_sfc_temp(3.0);
        let energy = LayerEnergy {
            pos: 100.0,
            neg: -20.0,
            top: 850.0,
            bot: 950.0,
        };
        let t = best_guess(&prof, &source(InitPhase::Snow, 750.0, -10.0), &energy);
        assert_eq!(t, PrecipType::Rain);
    }

    #[test]
    fn test_unmatched_combination_gives_unknown() {
        // Rain-sourced but subfreezing surface with no warm area: no rule
        // in the cascade matches, so the fallback applies
        let prof = profile_with_sfc_temp(-6.0);
        let t = best_guess(
            &prof,
            &source(InitPhase::Rain, 800.0, 1.0),
            &LayerEnergy::zero(),
        );
        assert_eq!(t, PrecipType::Unknown);
    }
}
