//! Hazard Classifier
//!
//! Turns a profile's severe-weather indices and best-guess precipitation
//! type into an ordered list of plausible hazard headlines. The thresholds
//! are ingredient-based forecasting heuristics, not official watch/warning
//! criteria, and the output is a suggestion for the display layer rather
//! than guidance.
//!
//! Output ordering is fixed: tornado group result, severe group result,
//! then each independent single-condition hazard in evaluation order, and
//! always a trailing baseline "no hazard" entry.

pub mod rules;

use crate::core_types::missing::qc;
use crate::core_types::profile::ProfileSnapshot;
use crate::precip::classify::PrecipType;
use crate::thermo;
use serde::Serialize;
use tracing::debug;

pub use rules::HazardInputs;

/// Hazard category, ranked by severity of the headline it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HazardType {
    /// Particularly dangerous tornado environment
    EnhancedTornado,
    /// Tornado
    Tornado,
    /// Marginal tornado
    MarginalTornado,
    /// Severe wind/hail
    Severe,
    /// Marginal severe wind/hail
    MarginalSevere,
    /// Flash flood
    FlashFlood,
    /// Blizzard
    Blizzard,
    /// Extreme wind chill
    ExtremeWindChill,
    /// Fire weather
    FireWeather,
    /// Excessive heat
    ExcessiveHeat,
    /// Hard freeze
    HardFreeze,
    /// Baseline: no hazard suggested
    NoHazard,
}

impl HazardType {
    /// Display tag; the exact strings are the wire contract with the
    /// presentation layer and must not be reworded.
    pub fn tag(self) -> &'static str {
        match self {
            HazardType::EnhancedTornado => "SPP TOR",
            HazardType::Tornado => "TOR",
            HazardType::MarginalTornado => "MRGL TOR",
            HazardType::Severe => "SVR",
            HazardType::MarginalSevere => "MRGL SVR",
            HazardType::FlashFlood => "INUND REPENT",
            HazardType::Blizzard => "TORM NIEVE",
            HazardType::ExtremeWindChill => "ST VIENTO",
            HazardType::FireWeather => "INCENDIOS",
            HazardType::ExcessiveHeat => "CALOR INTENSO",
            HazardType::HardFreeze => "HELADAS",
            HazardType::NoHazard => "NINGUNA",
        }
    }

    /// Display color (hex), also part of the wire contract.
    pub fn color(self) -> &'static str {
        match self {
            HazardType::EnhancedTornado => "#E700DF",
            HazardType::Tornado | HazardType::MarginalTornado => "#FF0000",
            HazardType::Severe => "#FFFF00",
            HazardType::MarginalSevere => "#0099CC",
            HazardType::FlashFlood => "#5FFB17",
            HazardType::Blizzard | HazardType::ExtremeWindChill | HazardType::HardFreeze => {
                "#3366FF"
            }
            HazardType::FireWeather => "#FF9900",
            HazardType::ExcessiveHeat => "#CC33CC",
            HazardType::NoHazard => "#FFCC33",
        }
    }
}

/// One line of the hazard list: category plus its display tag and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HazardEntry {
    /// Hazard category
    pub hazard: HazardType,
    /// Display tag (wire contract)
    pub tag: &'static str,
    /// Display color, hex RGB (wire contract)
    pub color: &'static str,
}

impl HazardEntry {
    fn of(hazard: HazardType) -> Self {
        HazardEntry {
            hazard,
            tag: hazard.tag(),
            color: hazard.color(),
        }
    }
}

/// Surface wind chill (°F), NWS (2001) formula.
///
/// Inputs are the surface temperature and wind speed of the profile;
/// returns `MISSING` when either is unusable.
pub fn wind_chill(prof: &ProfileSnapshot) -> f32 {
    let sfc = prof.sfc();
    let t_f = thermo::ctof(prof.tmpc(sfc));
    let v_mph = thermo::kts_to_mph(prof.wspd(sfc));
    if !qc(t_f) || !qc(v_mph) {
        return crate::core_types::missing::MISSING;
    }
    let v16 = v_mph.powf(0.16);
    35.74 + 0.6215 * t_f - 35.75 * v16 + 0.4275 * t_f * v16
}

/// Blizzard: snow with sustained surface wind above 35 mph and a
/// subfreezing surface.
fn blizzard(prof: &ProfileSnapshot, precip_type: PrecipType) -> bool {
    let sfc = prof.sfc();
    let wspd_mph = thermo::kts_to_mph(prof.wspd(sfc));
    let sfc_t = prof.tmpc(sfc);
    qc(wspd_mph) && wspd_mph > 35.0 && qc(sfc_t) && sfc_t <= 0.0 && precip_type.is_snowy()
}

/// Fire weather: dry surface air under a decent breeze. The surface
/// temperature stands in for its own dew point as a dryness approximation.
fn fire_weather(prof: &ProfileSnapshot) -> bool {
    let sfc = prof.sfc();
    let wspd_mph = thermo::kts_to_mph(prof.wspd(sfc));
    let rh = thermo::relh(prof.pres(sfc), prof.tmpc(sfc), prof.tmpc(sfc));
    qc(wspd_mph) && wspd_mph > 15.0 && qc(rh) && rh < 30.0
}

/// Excessive heat: tropical surface dew point with a forecast maximum
/// at or above 105 °F.
fn excessive_heat(prof: &ProfileSnapshot) -> bool {
    let dwpf = thermo::ctof(prof.dwpc(prof.sfc()));
    let max_t_f = thermo::ctof(prof.indices().max_temp);
    qc(dwpf) && dwpf > 75.0 && qc(max_t_f) && max_t_f >= 105.0
}

/// Hard freeze: surface dew point and wet bulb both at or below freezing
/// under light wind.
fn hard_freeze(prof: &ProfileSnapshot) -> bool {
    let sfc = prof.sfc();
    let dwpf = thermo::ctof(prof.dwpc(sfc));
    let wetbulb_f = thermo::ctof(thermo::wetbulb(
        prof.pres(sfc),
        prof.tmpc(sfc),
        prof.dwpc(sfc),
    ));
    let wspd = prof.wspd(sfc);
    qc(dwpf) && dwpf <= 32.0 && qc(wetbulb_f) && wetbulb_f <= 32.0 && qc(wspd) && wspd < 5.0
}

/// Evaluate every hazard group against the profile.
///
/// The returned list is ordered most significant first and always ends
/// with the baseline entry, so it is never empty.
pub fn possible_hazards(prof: &ProfileSnapshot, precip_type: PrecipType) -> Vec<HazardEntry> {
    let inputs = HazardInputs::from_profile(prof);
    let mut entries = Vec::new();

    if let Some(hazard) = rules::evaluate_group(rules::TORNADO_RULES, &inputs) {
        entries.push(HazardEntry::of(hazard));
    }
    if let Some(hazard) = rules::evaluate_group(rules::SEVERE_RULES, &inputs) {
        entries.push(HazardEntry::of(hazard));
    }
    if rules::flash_flood(&inputs) {
        entries.push(HazardEntry::of(HazardType::FlashFlood));
    }
    if blizzard(prof, precip_type) {
        entries.push(HazardEntry::of(HazardType::Blizzard));
    }
    let chill = wind_chill(prof);
    if qc(chill) && chill < -20.0 {
        entries.push(HazardEntry::of(HazardType::ExtremeWindChill));
    }
    if fire_weather(prof) {
        entries.push(HazardEntry::of(HazardType::FireWeather));
    }
    if excessive_heat(prof) {
        entries.push(HazardEntry::of(HazardType::ExcessiveHeat));
    }
    if hard_freeze(prof) {
        entries.push(HazardEntry::of(HazardType::HardFreeze));
    }

    entries.push(HazardEntry::of(HazardType::NoHazard));
    debug!(count = entries.len() - 1, "hazard evaluation complete");
    entries
}
