use crate::adapters::output::{write_json, write_reports_csv, write_series_csv};
use crate::adapters::storage::LocalStorage;
use crate::app::resolve_permittivity;
use crate::config::scenario::ScenarioConfig;
use crate::core::catalog::CableCatalog;
use crate::core::mission::{altitude_profile, breakdown_series, run_mission_for};
use crate::core::phase::{compute_phase_deg, routed_phase_deg, strain_phase_deg};
use crate::core::sweep::phase_sweep_series;
use crate::domain::model::{MissionReport, Series};
use crate::utils::error::Result;
use serde::Serialize;

/// Scalar results of a scenario run plus the files it wrote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioSummary {
    pub scenario: String,
    pub marker_phase_deg: Option<f64>,
    pub strain_phase_deg: Option<f64>,
    pub routed_phase_deg: Option<f64>,
    pub mission: Option<MissionReport>,
    pub profile_failures: Option<usize>,
    pub files: Vec<String>,
}

pub struct ScenarioRunner {
    config: ScenarioConfig,
    catalog: CableCatalog,
    storage: LocalStorage,
}

impl ScenarioRunner {
    pub fn new(config: ScenarioConfig, catalog: CableCatalog) -> Self {
        let storage = LocalStorage::new(config.output_path().to_string());
        Self {
            config,
            catalog,
            storage,
        }
    }

    /// Steps `run` would perform, without computing anything.
    pub fn plan(&self) -> Vec<String> {
        let mut steps = Vec::new();
        if let Some(phase) = &self.config.phase {
            if let Some(f) = phase.marker_freq_ghz {
                steps.push(format!("phase marker of {} at {} GHz", phase.setup.cable_type, f));
            }
            if let Some(sweep) = &phase.sweep {
                steps.push(format!(
                    "phase sweep of {} from {} to {} GHz ({} points)",
                    phase.setup.cable_type,
                    sweep.start_ghz,
                    sweep.stop_ghz,
                    sweep.effective_points()
                ));
            }
        }
        if let Some(strain) = &self.config.strain {
            steps.push(format!("strain model at {} Hz", strain.frequency_hz));
        }
        if let Some(routed) = &self.config.routed {
            steps.push(format!("routed model at {} Hz", routed.frequency_hz));
        }
        if let Some(mission) = &self.config.mission {
            steps.push(format!(
                "mission check of {} at {} ft",
                mission.cable, mission.inputs.altitude_ft
            ));
            if let Some(profile) = &mission.profile {
                steps.push(format!(
                    "altitude profile of {} up to {} ft every {} ft",
                    mission.cable, profile.max_ft, profile.step_ft
                ));
            }
        }
        steps
    }

    pub fn run(&self) -> Result<ScenarioSummary> {
        tracing::info!("Starting scenario '{}'", self.config.scenario.name);
        let mut summary = ScenarioSummary {
            scenario: self.config.scenario.name.clone(),
            ..ScenarioSummary::default()
        };

        if let Some(phase) = &self.config.phase {
            if let Some(freq_ghz) = phase.marker_freq_ghz {
                let dphi = compute_phase_deg(&self.catalog, freq_ghz, &phase.setup)?;
                tracing::info!("ΔPhase @ {:.2} GHz: {:.2}°", freq_ghz, dphi);
                summary.marker_phase_deg = Some(dphi);
            }
            if let Some(request) = &phase.sweep {
                let series = phase_sweep_series(&self.catalog, request, &phase.setup)?;
                tracing::info!("Phase sweep: {} points", series.len());
                self.save_series("phase_sweep", &series, &mut summary.files)?;
            }
        }

        if let Some(strain) = &self.config.strain {
            let epsilon_r = resolve_permittivity(
                &self.catalog,
                strain.cable.as_deref(),
                strain.epsilon_r,
                "strain",
            )?;
            let coeffs = strain.coefficients.unwrap_or_default();
            let dphi = strain_phase_deg(
                strain.frequency_hz,
                strain.length_m,
                epsilon_r,
                strain.delta_t_c,
                strain.g_load,
                &coeffs,
            );
            tracing::info!("Strain model Δφ: {:.4}°", dphi);
            summary.strain_phase_deg = Some(dphi);
        }

        if let Some(routed) = &self.config.routed {
            let epsilon_r = resolve_permittivity(
                &self.catalog,
                routed.cable.as_deref(),
                routed.epsilon_r,
                "routed",
            )?;
            let dphi = routed_phase_deg(
                routed.frequency_hz,
                routed.length_m,
                epsilon_r,
                routed.delta_t_c,
                routed.alpha_per_c,
                &routed.route,
            );
            tracing::info!("Routed model Δφ: {:.4}°", dphi);
            summary.routed_phase_deg = Some(dphi);
        }

        if let Some(mission) = &self.config.mission {
            let report = run_mission_for(&self.catalog, &mission.cable, &mission.inputs)?;
            tracing::info!(
                "Mission {} @ {} ft: {}",
                report.cable,
                report.altitude_ft,
                report.status
            );
            summary.mission = Some(report);

            if let Some(profile) = &mission.profile {
                let reports = altitude_profile(
                    &self.catalog,
                    &mission.cable,
                    profile,
                    mission.inputs.operating_voltage_v,
                    mission.inputs.interference_vpm,
                )?;
                summary.profile_failures =
                    Some(reports.iter().filter(|r| !r.status.is_success()).count());
                self.save_reports("altitude_profile", &reports, &mut summary.files)?;
            }
        }

        if self.config.wants_format("json") {
            let mut buf = Vec::new();
            write_json("scenario", &summary, &mut buf)?;
            summary
                .files
                .push(self.storage.write_file("summary.json", &buf)?);
        }

        tracing::info!("✅ Scenario '{}' completed", summary.scenario);
        Ok(summary)
    }

    fn save_series(&self, stem: &str, series: &Series, files: &mut Vec<String>) -> Result<()> {
        if self.config.wants_format("csv") {
            let mut buf = Vec::new();
            write_series_csv(series, &mut buf)?;
            files.push(self.storage.write_file(&format!("{}.csv", stem), &buf)?);
        }
        if self.config.wants_format("json") {
            let mut buf = Vec::new();
            write_json(stem, series, &mut buf)?;
            files.push(self.storage.write_file(&format!("{}.json", stem), &buf)?);
        }
        Ok(())
    }

    fn save_reports(
        &self,
        stem: &str,
        reports: &[MissionReport],
        files: &mut Vec<String>,
    ) -> Result<()> {
        if self.config.wants_format("csv") {
            let mut buf = Vec::new();
            write_reports_csv(reports, &mut buf)?;
            files.push(self.storage.write_file(&format!("{}.csv", stem), &buf)?);
        }
        if self.config.wants_format("json") {
            let mut buf = Vec::new();
            let series = breakdown_series(reports);
            let payload = serde_json::json!({ "reports": reports, "series": series });
            write_json(stem, &payload, &mut buf)?;
            files.push(self.storage.write_file(&format!("{}.json", stem), &buf)?);
        }
        Ok(())
    }
}
