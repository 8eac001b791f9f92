use crate::core::constants::{
    PASCHEN_A, PASCHEN_B, PRESSURE_DECAY_PER_FT, RECEIVER_LEAKAGE_THRESHOLD_VPM,
    SEA_LEVEL_PRESSURE_KPA, SECONDARY_EMISSION_GAMMA,
};
use crate::domain::model::{BreakdownVerdict, CableSpec, Computed, GuardReason, MissionStatus};

/// Barometric approximation (kPa); only meaningful over flight altitudes.
pub fn pressure_kpa(altitude_ft: f64) -> f64 {
    SEA_LEVEL_PRESSURE_KPA * (-PRESSURE_DECAY_PER_FT * altitude_ft).exp()
}

pub fn paschen_breakdown_checked(pressure_kpa: f64, gap_m: f64) -> Computed {
    let pd = pressure_kpa * gap_m;
    if !(pd > 0.0) {
        return Computed::Guarded(GuardReason::NonPositivePressureGap);
    }

    let denominator = (PASCHEN_A * pd).ln() - (1.0 + 1.0 / SECONDARY_EMISSION_GAMMA).ln().ln();
    if denominator == 0.0 || !denominator.is_finite() {
        return Computed::Guarded(GuardReason::NonFiniteDenominator);
    }

    let vb = (PASCHEN_B * pd) / denominator;
    if !vb.is_finite() {
        return Computed::Guarded(GuardReason::NonFiniteResult);
    }
    Computed::Value(vb)
}

/// Paschen breakdown voltage (V); guarded cases yield 0.
///
/// Below the Paschen minimum the log term goes negative and so does the
/// result. That value is returned as-is.
pub fn paschen_breakdown_voltage(pressure_kpa: f64, gap_m: f64) -> f64 {
    let result = paschen_breakdown_checked(pressure_kpa, gap_m);
    if let Some(reason) = result.guard_reason() {
        tracing::debug!(pressure_kpa, gap_m, "Paschen breakdown guarded: {}", reason);
    }
    result.value()
}

/// Field (V/m) that gets through a shield of the given effectiveness.
pub fn shielding_leakage(external_field_vpm: f64, shielding_effectiveness_db: f64) -> f64 {
    external_field_vpm / 10f64.powf(shielding_effectiveness_db / 20.0)
}

pub fn breakdown_verdict(operating_voltage_v: f64, breakdown_voltage_v: f64) -> BreakdownVerdict {
    BreakdownVerdict {
        breakdown_voltage_v,
        is_safe: !(operating_voltage_v > breakdown_voltage_v),
    }
}

/// Arcing check for one cable at altitude.
pub fn check_altitude_failure(
    cable: &CableSpec,
    altitude_ft: f64,
    operating_voltage_v: f64,
) -> BreakdownVerdict {
    let pressure = pressure_kpa(altitude_ft);
    let vb = paschen_breakdown_voltage(pressure, cable.gap_m());
    breakdown_verdict(operating_voltage_v, vb)
}

/// Voltage is checked first; leakage only matters if the line does not arc.
pub fn classify(
    operating_voltage_v: f64,
    breakdown_voltage_v: f64,
    leakage_vpm: f64,
) -> MissionStatus {
    if operating_voltage_v > breakdown_voltage_v {
        MissionStatus::FailedArcover
    } else if leakage_vpm > RECEIVER_LEAKAGE_THRESHOLD_VPM {
        MissionStatus::FailedNoiseInterference
    } else {
        MissionStatus::Success
    }
}
