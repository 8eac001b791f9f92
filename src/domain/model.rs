use crate::utils::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Material and geometry of one catalog cable.
///
/// Carries both the velocity-factor and the permittivity parameterization so
/// that every phase formulation can read the subset it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    pub name: String,
    /// Fraction of c at which waves propagate, in (0, 1].
    pub velocity_factor: f64,
    pub relative_permittivity: f64,
    /// Signed drift of effective electrical length, ppm per °C.
    pub temp_coeff_ppm_per_c: f64,
    pub inner_diameter_m: f64,
    pub outer_diameter_m: f64,
    pub shielding_effectiveness_db: f64,
    pub conductivity_s_per_m: f64,
    pub attenuation_db_per_m: f64,
}

impl CableSpec {
    /// Dielectric gap between the centre conductor and the shield.
    pub fn gap_m(&self) -> f64 {
        self.outer_diameter_m - self.inner_diameter_m
    }
}

/// Why a guarded computation produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardReason {
    NonPositiveFrequency,
    NonPositiveLength,
    NonPositivePermittivity,
    NonPositivePressureGap,
    NonFiniteDenominator,
    NonFiniteResult,
    InvalidGeometry,
}

impl fmt::Display for GuardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GuardReason::NonPositiveFrequency => "non-positive frequency",
            GuardReason::NonPositiveLength => "non-positive length",
            GuardReason::NonPositivePermittivity => "non-positive permittivity",
            GuardReason::NonPositivePressureGap => "non-positive pressure x gap",
            GuardReason::NonFiniteDenominator => "zero or non-finite denominator",
            GuardReason::NonFiniteResult => "non-finite result",
            GuardReason::InvalidGeometry => "invalid geometry",
        };
        write!(f, "{}", text)
    }
}

/// Outcome of a numeric model that absorbs degenerate inputs.
///
/// Public wrappers collapse `Guarded` to `0.0`; the `*_checked` functions
/// expose it so callers can tell a guard apart from a genuine zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Computed {
    Value(f64),
    Guarded(GuardReason),
}

impl Computed {
    pub fn value(self) -> f64 {
        match self {
            Computed::Value(v) => v,
            Computed::Guarded(_) => 0.0,
        }
    }

    pub fn is_guarded(&self) -> bool {
        matches!(self, Computed::Guarded(_))
    }

    pub fn guard_reason(&self) -> Option<GuardReason> {
        match self {
            Computed::Value(_) => None,
            Computed::Guarded(reason) => Some(*reason),
        }
    }
}

/// Frequency sweep bounds in GHz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRequest {
    pub start_ghz: f64,
    pub stop_ghz: f64,
    pub point_count: usize,
}

impl SweepRequest {
    pub const MIN_POINTS: usize = 2;
    pub const MAX_POINTS: usize = 100_000;

    pub fn new(start_ghz: f64, stop_ghz: f64, point_count: usize) -> Self {
        Self {
            start_ghz,
            stop_ghz,
            point_count,
        }
    }

    /// Point count with the lower clamp applied.
    pub fn effective_points(&self) -> usize {
        self.point_count.max(Self::MIN_POINTS)
    }

    /// Evenly spaced frequencies from `min(start, stop)` to `max(start, stop)`.
    ///
    /// More than `MAX_POINTS` points is a validation error.
    pub fn frequencies_ghz(&self) -> Result<Vec<f64>> {
        let n = self.effective_points();
        if n > Self::MAX_POINTS {
            return Err(SimError::ValidationError {
                message: format!(
                    "sweep of {} points exceeds the limit of {}",
                    n,
                    Self::MAX_POINTS
                ),
            });
        }

        let f0 = self.start_ghz.min(self.stop_ghz);
        let f1 = self.start_ghz.max(self.stop_ghz);
        let step = (f1 - f0) / (n - 1) as f64;
        Ok((0..n).map(|i| f0 + i as f64 * step).collect())
    }
}

/// Index-aligned x/y data handed to the plot consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub const FREQUENCY_AXIS: &'static str = "Frequency (GHz)";
    pub const PHASE_AXIS: &'static str = "Delta Phase (deg)";
    pub const SKIN_LOSS_AXIS: &'static str = "Skin Loss Factor";
    pub const ALTITUDE_AXIS: &'static str = "Altitude (ft)";
    pub const VOLTAGE_AXIS: &'static str = "Voltage (V)";

    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            x,
            y,
        }
    }

    pub fn phase_vs_frequency(title: impl Into<String>, freqs: Vec<f64>, phases: Vec<f64>) -> Self {
        Self::new(title, Self::FREQUENCY_AXIS, Self::PHASE_AXIS, freqs, phases)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakdownVerdict {
    pub breakdown_voltage_v: f64,
    pub is_safe: bool,
}

impl BreakdownVerdict {
    pub const SAFE_MESSAGE: &'static str = "SAFE: Voltage below breakdown threshold";
    pub const ARCING_MESSAGE: &'static str =
        "CATASTROPHIC FAILURE: Dielectric Breakdown (Arcing)";

    pub fn message(&self) -> &'static str {
        if self.is_safe {
            Self::SAFE_MESSAGE
        } else {
            Self::ARCING_MESSAGE
        }
    }
}

/// Single reported outcome; the arcing check wins when both fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissionStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED: ARCOVER")]
    FailedArcover,
    #[serde(rename = "FAILED: NOISE INTERFERENCE")]
    FailedNoiseInterference,
}

impl MissionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, MissionStatus::Success)
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionStatus::Success => write!(f, "SUCCESS"),
            MissionStatus::FailedArcover => write!(f, "FAILED: ARCOVER"),
            MissionStatus::FailedNoiseInterference => write!(f, "FAILED: NOISE INTERFERENCE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionReport {
    pub cable: String,
    pub altitude_ft: f64,
    pub breakdown_v: f64,
    pub noise_ingress: f64,
    pub status: MissionStatus,
}
