use crate::config::{read_toml_file, substitute_env_vars};
use crate::core::mission::{AltitudeProfile, MissionInputs};
use crate::core::phase::{PhaseSetup, StrainCoefficients};
use crate::core::routing::RoutingGeometry;
use crate::domain::model::SweepRequest;
use crate::utils::error::{Result, SimError};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_positive, validate_range,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

/// Batch run description for the `scenario_sim` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioInfo,
    pub phase: Option<PhaseScenario>,
    pub strain: Option<StrainScenario>,
    pub routed: Option<RoutedScenario>,
    pub mission: Option<MissionScenario>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: Option<String>,
    /// Optional catalog file; the built-in cables are used otherwise.
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseScenario {
    #[serde(flatten)]
    pub setup: PhaseSetup,
    pub marker_freq_ghz: Option<f64>,
    pub sweep: Option<SweepRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrainScenario {
    pub cable: Option<String>,
    pub epsilon_r: Option<f64>,
    pub frequency_hz: f64,
    pub length_m: f64,
    #[serde(default)]
    pub delta_t_c: f64,
    #[serde(default = "default_g_load")]
    pub g_load: f64,
    #[serde(default)]
    pub coefficients: Option<StrainCoefficients>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedScenario {
    pub cable: Option<String>,
    pub epsilon_r: Option<f64>,
    pub frequency_hz: f64,
    pub length_m: f64,
    #[serde(default)]
    pub delta_t_c: f64,
    pub alpha_per_c: f64,
    pub route: RoutingGeometry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionScenario {
    pub cable: String,
    #[serde(flatten)]
    pub inputs: MissionInputs,
    pub profile: Option<AltitudeProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
}

fn default_g_load() -> f64 {
    1.0
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_toml_file(path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析情境設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SimError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn output_path(&self) -> &str {
        &self.output.output_path
    }

    pub fn wants_format(&self, format: &str) -> bool {
        self.output.output_formats.iter().any(|f| f == format)
    }

    /// Number of computation steps the scenario will run.
    pub fn step_count(&self) -> usize {
        let phase_steps = self
            .phase
            .as_ref()
            .map(|p| p.marker_freq_ghz.is_some() as usize + p.sweep.is_some() as usize)
            .unwrap_or(0);
        let mission_steps = self
            .mission
            .as_ref()
            .map(|m| 1 + m.profile.is_some() as usize)
            .unwrap_or(0);
        phase_steps
            + self.strain.is_some() as usize
            + self.routed.is_some() as usize
            + mission_steps
    }
}

fn validate_permittivity_source(
    section: &str,
    cable: &Option<String>,
    epsilon_r: Option<f64>,
) -> Result<()> {
    match (cable, epsilon_r) {
        (None, None) => Err(SimError::MissingConfigError {
            field: format!("{}.cable or {}.epsilon_r", section, section),
        }),
        (Some(name), _) => validate_non_empty_string(&format!("{}.cable", section), name),
        (None, Some(_)) => Ok(()),
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("scenario.name", &self.scenario.name)?;
        if let Some(catalog) = &self.scenario.catalog {
            validate_path("scenario.catalog", catalog)?;
        }

        validate_path("output.output_path", &self.output.output_path)?;
        for format in &self.output.output_formats {
            validate_one_of("output.output_formats", format, &OUTPUT_FORMATS)?;
        }

        if let Some(phase) = &self.phase {
            validate_non_empty_string("phase.cable_type", &phase.setup.cable_type)?;
            if phase.marker_freq_ghz.is_none() && phase.sweep.is_none() {
                return Err(SimError::ConfigValidationError {
                    field: "phase".to_string(),
                    message: "Set marker_freq_ghz and/or a [phase.sweep] table".to_string(),
                });
            }
            if let Some(sweep) = &phase.sweep {
                validate_range(
                    "phase.sweep.point_count",
                    sweep.point_count,
                    0,
                    SweepRequest::MAX_POINTS,
                )?;
            }
        }

        if let Some(strain) = &self.strain {
            validate_permittivity_source("strain", &strain.cable, strain.epsilon_r)?;
        }

        if let Some(routed) = &self.routed {
            validate_permittivity_source("routed", &routed.cable, routed.epsilon_r)?;
        }

        if let Some(mission) = &self.mission {
            validate_non_empty_string("mission.cable", &mission.cable)?;
            if let Some(profile) = &mission.profile {
                validate_positive("mission.profile.step_ft", profile.step_ft)?;
                profile.altitudes()?;
            }
        }

        if self.step_count() == 0 {
            return Err(SimError::ConfigValidationError {
                field: "scenario".to_string(),
                message: "Nothing to run: add a [phase], [strain], [routed] or [mission] section"
                    .to_string(),
            });
        }

        Ok(())
    }
}
