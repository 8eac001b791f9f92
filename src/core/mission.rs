use crate::core::environment::{
    classify, paschen_breakdown_voltage, pressure_kpa, shielding_leakage,
};
use crate::domain::model::{CableSpec, MissionReport, Series};
use crate::domain::ports::CableLookup;
use crate::utils::error::{Result, SimError};
use crate::utils::validation::validate_finite;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionInputs {
    pub altitude_ft: f64,
    pub operating_voltage_v: f64,
    pub interference_vpm: f64,
}

impl Default for MissionInputs {
    fn default() -> Self {
        Self {
            altitude_ft: 55_000.0,
            operating_voltage_v: 1_500.0,
            interference_vpm: 5_000.0,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Breakdown and noise ingress of `cable` at one flight condition.
pub fn run_mission_simulation(cable: &CableSpec, inputs: &MissionInputs) -> MissionReport {
    let pressure = pressure_kpa(inputs.altitude_ft);
    let v_limit = paschen_breakdown_voltage(pressure, cable.gap_m());
    let leakage = shielding_leakage(inputs.interference_vpm, cable.shielding_effectiveness_db);
    let status = classify(inputs.operating_voltage_v, v_limit, leakage);

    tracing::debug!(
        cable = %cable.name,
        altitude_ft = inputs.altitude_ft,
        pressure_kpa = pressure,
        breakdown_v = v_limit,
        leakage_vpm = leakage,
        "mission point: {}",
        status
    );

    MissionReport {
        cable: cable.name.clone(),
        altitude_ft: inputs.altitude_ft,
        breakdown_v: round_to(v_limit, 2),
        noise_ingress: round_to(leakage, 6),
        status,
    }
}

pub fn run_mission_for<C>(
    catalog: &C,
    cable_type: &str,
    inputs: &MissionInputs,
) -> Result<MissionReport>
where
    C: CableLookup + ?Sized,
{
    let cable = catalog.resolve(cable_type)?;
    Ok(run_mission_simulation(cable, inputs))
}

/// Altitude grid for a breakdown-margin profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeProfile {
    pub max_ft: f64,
    pub step_ft: f64,
}

impl Default for AltitudeProfile {
    fn default() -> Self {
        Self {
            max_ft: 70_000.0,
            step_ft: 5_000.0,
        }
    }
}

impl AltitudeProfile {
    pub const MAX_POINTS: usize = 100_000;

    /// Altitudes from 0 to `max_ft` inclusive, at most `MAX_POINTS` of them.
    pub fn altitudes(&self) -> Result<Vec<f64>> {
        validate_finite("profile.max_ft", self.max_ft)?;
        if !(self.step_ft > 0.0 && self.step_ft.is_finite()) {
            return Err(SimError::ValidationError {
                message: format!("profile step must be positive, got {}", self.step_ft),
            });
        }
        if self.max_ft < 0.0 {
            return Ok(Vec::new());
        }

        // counted in f64 so a huge ratio cannot overflow the cast
        let count = (self.max_ft / self.step_ft).floor() + 1.0;
        if !(count <= Self::MAX_POINTS as f64) {
            return Err(SimError::ValidationError {
                message: format!(
                    "profile of {} ft every {} ft exceeds the limit of {} points",
                    self.max_ft,
                    self.step_ft,
                    Self::MAX_POINTS
                ),
            });
        }

        let count = count as usize;
        Ok((0..count).map(|i| i as f64 * self.step_ft).collect())
    }
}

/// Mission reports over an altitude grid; voltage and field held fixed.
pub fn altitude_profile<C>(
    catalog: &C,
    cable_type: &str,
    profile: &AltitudeProfile,
    operating_voltage_v: f64,
    interference_vpm: f64,
) -> Result<Vec<MissionReport>>
where
    C: CableLookup + ?Sized,
{
    let cable = catalog.resolve(cable_type)?;
    let reports: Vec<MissionReport> = profile
        .altitudes()?
        .into_iter()
        .map(|altitude_ft| {
            run_mission_simulation(
                cable,
                &MissionInputs {
                    altitude_ft,
                    operating_voltage_v,
                    interference_vpm,
                },
            )
        })
        .collect();

    let failures = reports.iter().filter(|r| !r.status.is_success()).count();
    tracing::info!(
        "{} altitude profile: {} points, {} failing",
        cable.name,
        reports.len(),
        failures
    );
    Ok(reports)
}

/// Breakdown voltage against altitude, for plotting.
pub fn breakdown_series(reports: &[MissionReport]) -> Series {
    let title = reports
        .first()
        .map(|r| format!("{}: Dielectric Breakdown vs. Altitude", r.cable))
        .unwrap_or_else(|| "Dielectric Breakdown vs. Altitude".to_string());
    Series::new(
        title,
        Series::ALTITUDE_AXIS,
        Series::VOLTAGE_AXIS,
        reports.iter().map(|r| r.altitude_ft).collect(),
        reports.iter().map(|r| r.breakdown_v).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CableCatalog;
    use crate::domain::model::MissionStatus;

    #[test]
    fn test_reference_mission_arcs_over() {
        let catalog = CableCatalog::builtin();
        let report = run_mission_for(&catalog, "RG-400", &MissionInputs::default()).unwrap();
        assert_eq!(report.status, MissionStatus::FailedArcover);
        assert_eq!(report.noise_ingress, 0.158114);
        assert_eq!(report.altitude_ft, 55_000.0);
    }

    #[test]
    fn test_low_voltage_mission_hits_noise_check() {
        let catalog = CableCatalog::builtin();
        let inputs = MissionInputs {
            altitude_ft: 0.0,
            operating_voltage_v: 1.0,
            interference_vpm: 5_000.0,
        };
        // RG-213 has a wide enough gap to sit above the Paschen minimum at sea level
        let report = run_mission_for(&catalog, "RG-213", &inputs).unwrap();
        assert!(report.breakdown_v > 1.0);
        assert_eq!(report.status, MissionStatus::FailedNoiseInterference);
    }

    #[test]
    fn test_quiet_mission_succeeds() {
        let catalog = CableCatalog::builtin();
        let inputs = MissionInputs {
            altitude_ft: 0.0,
            operating_voltage_v: 1.0,
            interference_vpm: 1.0,
        };
        let report = run_mission_for(&catalog, "LMR-400", &inputs).unwrap();
        assert_eq!(report.status, MissionStatus::Success);
    }

    #[test]
    fn test_profile_grid() {
        let altitudes = AltitudeProfile::default().altitudes().unwrap();
        assert_eq!(altitudes.len(), 15);
        assert_eq!(altitudes[0], 0.0);
        assert_eq!(altitudes[14], 70_000.0);

        let bad = AltitudeProfile {
            max_ft: 1000.0,
            step_ft: 0.0,
        };
        assert!(bad.altitudes().is_err());
    }

    #[test]
    fn test_profile_point_limit() {
        let huge = AltitudeProfile {
            max_ft: 1e300,
            step_ft: 1.0,
        };
        assert!(matches!(
            huge.altitudes(),
            Err(SimError::ValidationError { .. })
        ));

        let large = AltitudeProfile {
            max_ft: 1e10,
            step_ft: 1.0,
        };
        assert!(large.altitudes().is_err());

        let tiny_step = AltitudeProfile {
            max_ft: 70_000.0,
            step_ft: 1e-300,
        };
        assert!(tiny_step.altitudes().is_err());

        let at_limit = AltitudeProfile {
            max_ft: (AltitudeProfile::MAX_POINTS - 1) as f64,
            step_ft: 1.0,
        };
        assert_eq!(at_limit.altitudes().unwrap().len(), AltitudeProfile::MAX_POINTS);
    }

    #[test]
    fn test_altitude_profile_series() {
        let catalog = CableCatalog::builtin();
        let profile = AltitudeProfile::default();
        let reports = altitude_profile(&catalog, "RG-400", &profile, 1500.0, 5000.0).unwrap();
        let series = breakdown_series(&reports);
        assert_eq!(series.len(), 15);
        assert_eq!(series.x_label, Series::ALTITUDE_AXIS);
        assert!(series.y.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.158_113_883, 6), 0.158114);
        assert_eq!(round_to(-3.274_9, 2), -3.27);
    }
}
