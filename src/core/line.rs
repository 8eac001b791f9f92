//! Transmission-line figures of a catalog cable: impedance and loss.

use crate::core::constants::COAX_IMPEDANCE_FACTOR_OHM;
use crate::domain::model::{CableSpec, Computed, GuardReason};

pub fn characteristic_impedance_checked(cable: &CableSpec) -> Computed {
    if !(cable.relative_permittivity > 0.0) {
        return Computed::Guarded(GuardReason::NonPositivePermittivity);
    }
    if !(cable.inner_diameter_m > 0.0 && cable.outer_diameter_m > cable.inner_diameter_m) {
        return Computed::Guarded(GuardReason::InvalidGeometry);
    }
    let z0 = (COAX_IMPEDANCE_FACTOR_OHM / cable.relative_permittivity.sqrt())
        * (cable.outer_diameter_m / cable.inner_diameter_m).ln();
    Computed::Value(z0)
}

/// Z0 in ohms.
pub fn characteristic_impedance(cable: &CableSpec) -> f64 {
    characteristic_impedance_checked(cable).value()
}

pub fn skin_loss_factor_checked(cable: &CableSpec, frequency_hz: f64) -> Computed {
    if !(frequency_hz > 0.0) {
        return Computed::Guarded(GuardReason::NonPositiveFrequency);
    }
    if !(cable.inner_diameter_m > 0.0 && cable.conductivity_s_per_m > 0.0) {
        return Computed::Guarded(GuardReason::InvalidGeometry);
    }
    let alpha_c = 1.0 / (cable.inner_diameter_m * cable.conductivity_s_per_m);
    Computed::Value(alpha_c * frequency_hz.sqrt())
}

/// Relative conductor loss, sqrt(f) / (d * sigma). Only meaningful as a
/// comparison between cables or frequencies.
pub fn skin_loss_factor(cable: &CableSpec, frequency_hz: f64) -> f64 {
    skin_loss_factor_checked(cable, frequency_hz).value()
}

/// Catalog loss figure scaled to a run length (dB).
pub fn nominal_loss_db(cable: &CableSpec, length_m: f64) -> f64 {
    cable.attenuation_db_per_m * length_m.max(0.0)
}
