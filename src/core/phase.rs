//! Differential phase shift of a coax run under temperature and g-load.
//!
//! Three formulations coexist:
//!
//! * velocity-factor model: ppm/°C drift plus sag-induced length, referenced
//!   to the 1 G / ΔT = 0 state and wrapped into (-180, 180].
//! * permittivity/strain model: thermal expansion, g strain and a
//!   temperature-dependent εr; not wrapped.
//! * routed model: thermal expansion plus clamp-span sag length; not wrapped.

use crate::core::constants::{
    MIN_CLAMP_SPACING_M, MIN_RELATIVE_PERMITTIVITY, REFERENCE_G_LOAD, SPEED_OF_LIGHT_M_PER_S,
};
use crate::core::routing::{span_excess_length, RoutingGeometry};
use crate::domain::model::{CableSpec, Computed, GuardReason};
use crate::domain::ports::CableLookup;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Every velocity-factor model input except the frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseSetup {
    pub cable_type: String,
    pub length_m: f64,
    pub delta_t_c: f64,
    pub g_load: f64,
    pub spans: u32,
    pub clamp_spacing_m: f64,
    pub sag_at_1g_mm: f64,
}

impl Default for PhaseSetup {
    fn default() -> Self {
        Self {
            cable_type: "RG-58".to_string(),
            length_m: 5.0,
            delta_t_c: 0.0,
            g_load: 1.0,
            spans: 10,
            clamp_spacing_m: 0.5,
            sag_at_1g_mm: 2.0,
        }
    }
}

impl PhaseSetup {
    /// Physical length of the run at `g`, including the sag excess of every span.
    pub fn effective_length_m(&self, g: f64) -> f64 {
        let sag_m = (self.sag_at_1g_mm / 1000.0) * g.max(0.0);
        let span_len = self.clamp_spacing_m.max(MIN_CLAMP_SPACING_M);
        let total_extra = span_excess_length(sag_m, span_len) * self.spans as f64;
        (self.length_m + total_extra).max(0.0)
    }

    /// Plot title for a sweep of this setup.
    pub fn title(&self) -> String {
        format!(
            "{} | L={:.2}m | ΔT={:.1}°C | G={:.1}",
            self.cable_type, self.length_m, self.delta_t_c, self.g_load
        )
    }
}

/// Maps any angle into (-180, 180].
pub fn wrap180(deg: f64) -> f64 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Phase delta (deg) of `cable` relative to its 1 G, ΔT = 0 state.
pub fn phase_for_cable(cable: &CableSpec, freq_ghz: f64, setup: &PhaseSetup) -> Computed {
    let f_hz = freq_ghz * 1e9;
    if !(f_hz > 0.0) {
        return Computed::Guarded(GuardReason::NonPositiveFrequency);
    }

    let wavelength = SPEED_OF_LIGHT_M_PER_S * cable.velocity_factor / f_hz;

    let baseline_length = setup.effective_length_m(REFERENCE_G_LOAD);
    let loaded_length = setup.effective_length_m(setup.g_load);

    // temperature drift only applies to the loaded branch
    let temp_multiplier = 1.0 + cable.temp_coeff_ppm_per_c * 1e-6 * setup.delta_t_c;
    let e0 = baseline_length;
    let e1 = loaded_length * temp_multiplier;

    let phi0 = 360.0 * (e0 / wavelength);
    let phi1 = 360.0 * (e1 / wavelength);

    Computed::Value(wrap180(phi1 - phi0))
}

pub fn compute_phase_checked<C>(catalog: &C, freq_ghz: f64, setup: &PhaseSetup) -> Result<Computed>
where
    C: CableLookup + ?Sized,
{
    let cable = catalog.resolve(&setup.cable_type)?;
    Ok(phase_for_cable(cable, freq_ghz, setup))
}

/// Velocity-factor model. Unknown cables fail; non-positive frequency yields 0.
pub fn compute_phase_deg<C>(catalog: &C, freq_ghz: f64, setup: &PhaseSetup) -> Result<f64>
where
    C: CableLookup + ?Sized,
{
    let result = compute_phase_checked(catalog, freq_ghz, setup)?;
    if let Some(reason) = result.guard_reason() {
        tracing::debug!("phase at {} GHz guarded: {}", freq_ghz, reason);
    }
    Ok(result.value())
}

/// Tunable coefficients of the permittivity/strain model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainCoefficients {
    /// Linear thermal expansion (1/°C).
    pub alpha_per_c: f64,
    /// Change of εr per °C.
    #[serde(default)]
    pub k_eps_per_c: f64,
    /// Fractional strain per G above 1 G.
    #[serde(default)]
    pub k_g_strain_per_g: f64,
}

impl StrainCoefficients {
    pub fn thermal_only(alpha_per_c: f64) -> Self {
        Self {
            alpha_per_c,
            k_eps_per_c: 0.0,
            k_g_strain_per_g: 0.0,
        }
    }
}

impl Default for StrainCoefficients {
    /// Copper expansion, no dielectric drift, no g strain.
    fn default() -> Self {
        Self::thermal_only(17e-6)
    }
}

fn phase_constant(frequency_hz: f64, epsilon_r: f64) -> f64 {
    let vp = SPEED_OF_LIGHT_M_PER_S / epsilon_r.sqrt();
    2.0 * PI * frequency_hz / vp
}

fn degenerate_line(frequency_hz: f64, length_m: f64, epsilon_r: f64) -> Option<GuardReason> {
    if !(frequency_hz > 0.0) {
        Some(GuardReason::NonPositiveFrequency)
    } else if !(length_m > 0.0) {
        Some(GuardReason::NonPositiveLength)
    } else if !(epsilon_r > 0.0) {
        Some(GuardReason::NonPositivePermittivity)
    } else {
        None
    }
}

pub fn strain_phase_checked(
    frequency_hz: f64,
    length_m: f64,
    epsilon_r: f64,
    delta_t_c: f64,
    g_load: f64,
    coeffs: &StrainCoefficients,
) -> Computed {
    if let Some(reason) = degenerate_line(frequency_hz, length_m, epsilon_r) {
        return Computed::Guarded(reason);
    }

    let phi0 = phase_constant(frequency_hz, epsilon_r) * length_m;

    let strain = coeffs.alpha_per_c * delta_t_c + coeffs.k_g_strain_per_g * (g_load - 1.0).max(0.0);
    let length1 = length_m * (1.0 + strain);

    let epsilon_r1 = (epsilon_r + coeffs.k_eps_per_c * delta_t_c).max(MIN_RELATIVE_PERMITTIVITY);
    let phi1 = phase_constant(frequency_hz, epsilon_r1) * length1;

    Computed::Value((phi1 - phi0).to_degrees())
}

/// Permittivity/strain model (deg, unwrapped). Degenerate inputs yield 0.
pub fn strain_phase_deg(
    frequency_hz: f64,
    length_m: f64,
    epsilon_r: f64,
    delta_t_c: f64,
    g_load: f64,
    coeffs: &StrainCoefficients,
) -> f64 {
    strain_phase_checked(frequency_hz, length_m, epsilon_r, delta_t_c, g_load, coeffs).value()
}

/// Strain model with εr taken from a catalog cable.
pub fn strain_phase_for_cable<C>(
    catalog: &C,
    cable_type: &str,
    frequency_hz: f64,
    length_m: f64,
    delta_t_c: f64,
    g_load: f64,
    coeffs: &StrainCoefficients,
) -> Result<f64>
where
    C: CableLookup + ?Sized,
{
    let cable = catalog.resolve(cable_type)?;
    Ok(strain_phase_deg(
        frequency_hz,
        length_m,
        cable.relative_permittivity,
        delta_t_c,
        g_load,
        coeffs,
    ))
}

pub fn routed_phase_checked(
    frequency_hz: f64,
    length_m: f64,
    epsilon_r: f64,
    delta_t_c: f64,
    alpha_per_c: f64,
    route: &RoutingGeometry,
) -> Computed {
    if let Some(reason) = degenerate_line(frequency_hz, length_m, epsilon_r) {
        return Computed::Guarded(reason);
    }

    let beta = phase_constant(frequency_hz, epsilon_r);
    let delta_temp = alpha_per_c * length_m * delta_t_c;
    let delta_route = route.delta_length_m();

    Computed::Value((beta * (delta_temp + delta_route)).to_degrees())
}

/// Thermal expansion plus routing sag (deg, unwrapped). Degenerate inputs yield 0.
pub fn routed_phase_deg(
    frequency_hz: f64,
    length_m: f64,
    epsilon_r: f64,
    delta_t_c: f64,
    alpha_per_c: f64,
    route: &RoutingGeometry,
) -> f64 {
    routed_phase_checked(frequency_hz, length_m, epsilon_r, delta_t_c, alpha_per_c, route).value()
}

pub fn routed_phase_for_cable<C>(
    catalog: &C,
    cable_type: &str,
    frequency_hz: f64,
    length_m: f64,
    delta_t_c: f64,
    alpha_per_c: f64,
    route: &RoutingGeometry,
) -> Result<f64>
where
    C: CableLookup + ?Sized,
{
    let cable = catalog.resolve(cable_type)?;
    Ok(routed_phase_deg(
        frequency_hz,
        length_m,
        cable.relative_permittivity,
        delta_t_c,
        alpha_per_c,
        route,
    ))
}
