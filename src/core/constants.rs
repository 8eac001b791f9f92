//! Physical constants and fixed model coefficients.

// ============================================================================
// Propagation
// ============================================================================

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT_M_PER_S: f64 = 299_792_458.0;

/// Floor applied to the clamp spacing before dividing by it
pub const MIN_CLAMP_SPACING_M: f64 = 1e-6;

/// Load at which the baseline sag is specified
pub const REFERENCE_G_LOAD: f64 = 1.0;

/// Floor applied to the temperature-shifted permittivity
pub const MIN_RELATIVE_PERMITTIVITY: f64 = 1e-12;

// ============================================================================
// Atmosphere
// ============================================================================

pub const SEA_LEVEL_PRESSURE_KPA: f64 = 101.325;

/// Exponential decay of pressure with altitude (1/ft)
pub const PRESSURE_DECAY_PER_FT: f64 = 0.000_036_6;

// ============================================================================
// Paschen's law (air)
// ============================================================================

pub const PASCHEN_A: f64 = 11.25;
pub const PASCHEN_B: f64 = 273.75;

/// Secondary electron emission coefficient
pub const SECONDARY_EMISSION_GAMMA: f64 = 0.01;

// ============================================================================
// Interference
// ============================================================================

/// Leakage field above which a sensitive receiver is considered jammed (V/m)
pub const RECEIVER_LEAKAGE_THRESHOLD_VPM: f64 = 0.001;

// ============================================================================
// Transmission line
// ============================================================================

/// Z0 = (60 / sqrt(er)) * ln(D / d)
pub const COAX_IMPEDANCE_FACTOR_OHM: f64 = 60.0;
