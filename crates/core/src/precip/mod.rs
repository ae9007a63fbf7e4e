//! Precipitation diagnostics: source location, layer energies, and the
//! best-guess precipitation type.
//!
//! Data flows strictly downstream: [`source::locate`] finds where falling
//! precipitation originates, [`energy`] integrates the warm/cold areas of
//! the profile beneath it, and [`classify::best_guess`] turns both into a
//! categorical type.

pub mod classify;
pub mod energy;
pub mod source;

pub use classify::{best_guess, PrecipType};
pub use energy::{posneg_temperature, posneg_wetbulb, LayerEnergy};
pub use source::{locate, InitPhase, PrecipSource};
