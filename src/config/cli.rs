use crate::adapters::output::OutputFormat;
use crate::core::mission::{AltitudeProfile, MissionInputs};
use crate::core::phase::{PhaseSetup, StrainCoefficients};
use crate::core::routing::RoutingGeometry;
use crate::domain::model::SweepRequest;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "coax-phase-sim")]
#[command(
    about = "Phase shift, breakdown and shielding estimates for RF coax under flight conditions"
)]
pub struct CliConfig {
    /// TOML cable catalog replacing the built-in one
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the result to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Phase delta at one frequency (velocity-factor model, wrapped)
    Phase {
        #[arg(long, default_value_t = 1.0)]
        freq_ghz: f64,
        #[command(flatten)]
        setup: PhaseArgs,
    },
    /// Phase delta across a frequency sweep
    Sweep {
        #[command(flatten)]
        sweep: SweepArgs,
        #[command(flatten)]
        setup: PhaseArgs,
    },
    /// Permittivity/strain model (unwrapped)
    Strain(StrainArgs),
    /// Thermal expansion plus routing sag (unwrapped)
    Routed(RoutedArgs),
    /// Extra length pulled out of clamp spans under g-load
    Routing(RouteArgs),
    /// Breakdown and noise verdict at one altitude
    Mission(MissionArgs),
    /// Breakdown voltage from sea level up to a ceiling
    AltitudeProfile {
        #[command(flatten)]
        mission: MissionArgs,
        #[arg(long, default_value_t = 70_000.0)]
        max_ft: f64,
        #[arg(long, default_value_t = 5_000.0)]
        step_ft: f64,
    },
    /// Impedance and loss figures of a cable
    Line {
        #[arg(long, default_value = "RG-58")]
        cable: String,
        #[arg(long, default_value_t = 1.0)]
        freq_ghz: f64,
        #[arg(long, default_value_t = 5.0)]
        length_m: f64,
        /// Sweep the skin loss factor instead of reporting one point
        #[arg(long)]
        sweep: bool,
        #[command(flatten)]
        range: SweepArgs,
    },
    /// List catalog cables
    Cables,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Phase { .. } => "phase",
            Command::Sweep { .. } => "sweep",
            Command::Strain(_) => "strain",
            Command::Routed(_) => "routed",
            Command::Routing(_) => "routing",
            Command::Mission(_) => "mission",
            Command::AltitudeProfile { .. } => "altitude-profile",
            Command::Line { .. } => "line",
            Command::Cables => "cables",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct PhaseArgs {
    #[arg(long, default_value = "RG-58")]
    pub cable: String,
    #[arg(long, default_value_t = 5.0)]
    pub length_m: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub delta_t: f64,
    #[arg(long, default_value_t = 1.0)]
    pub g_load: f64,
    #[arg(long, default_value_t = 10)]
    pub spans: u32,
    #[arg(long, default_value_t = 0.5)]
    pub clamp_spacing_m: f64,
    #[arg(long, default_value_t = 2.0)]
    pub sag_mm: f64,
}

impl PhaseArgs {
    pub fn to_setup(&self) -> PhaseSetup {
        PhaseSetup {
            cable_type: self.cable.clone(),
            length_m: self.length_m,
            delta_t_c: self.delta_t,
            g_load: self.g_load,
            spans: self.spans,
            clamp_spacing_m: self.clamp_spacing_m,
            sag_at_1g_mm: self.sag_mm,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SweepArgs {
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub start_ghz: f64,
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub stop_ghz: f64,
    #[arg(long, default_value_t = 200)]
    pub points: usize,
}

impl SweepArgs {
    pub fn to_request(&self) -> SweepRequest {
        SweepRequest::new(self.start_ghz, self.stop_ghz, self.points)
    }
}

#[derive(Debug, Clone, Args)]
pub struct StrainArgs {
    /// Take εr from this catalog cable
    #[arg(long)]
    pub cable: Option<String>,
    /// Explicit εr; wins over --cable
    #[arg(long)]
    pub epsilon_r: Option<f64>,
    #[arg(long, default_value_t = 1e9)]
    pub freq_hz: f64,
    #[arg(long, default_value_t = 5.0)]
    pub length_m: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub delta_t: f64,
    #[arg(long, default_value_t = 1.0)]
    pub g_load: f64,
    #[arg(long, default_value_t = 17e-6, allow_negative_numbers = true)]
    pub alpha_per_c: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub k_eps_per_c: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub k_g_strain_per_g: f64,
}

impl StrainArgs {
    pub fn coefficients(&self) -> StrainCoefficients {
        StrainCoefficients {
            alpha_per_c: self.alpha_per_c,
            k_eps_per_c: self.k_eps_per_c,
            k_g_strain_per_g: self.k_g_strain_per_g,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RouteArgs {
    #[arg(long, default_value_t = 1.0)]
    pub g_load: f64,
    #[arg(long, default_value_t = 10)]
    pub spans: u32,
    #[arg(long, default_value_t = 0.5)]
    pub clamp_spacing_m: f64,
    #[arg(long, default_value_t = 2.0)]
    pub sag_mm: f64,
}

impl RouteArgs {
    pub fn to_geometry(&self) -> RoutingGeometry {
        RoutingGeometry {
            g_load: self.g_load,
            spans: self.spans,
            clamp_spacing_m: self.clamp_spacing_m,
            sag_at_1g_m: self.sag_mm / 1000.0,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RoutedArgs {
    #[arg(long)]
    pub cable: Option<String>,
    #[arg(long)]
    pub epsilon_r: Option<f64>,
    #[arg(long, default_value_t = 1e9)]
    pub freq_hz: f64,
    #[arg(long, default_value_t = 5.0)]
    pub length_m: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub delta_t: f64,
    #[arg(long, default_value_t = 17e-6, allow_negative_numbers = true)]
    pub alpha_per_c: f64,
    #[command(flatten)]
    pub route: RouteArgs,
}

#[derive(Debug, Clone, Args)]
pub struct MissionArgs {
    #[arg(long, default_value = "RG-400")]
    pub cable: String,
    #[arg(long, default_value_t = 55_000.0, allow_negative_numbers = true)]
    pub altitude_ft: f64,
    #[arg(long, default_value_t = 1_500.0)]
    pub op_voltage: f64,
    #[arg(long, default_value_t = 5_000.0)]
    pub field_vpm: f64,
}

impl MissionArgs {
    pub fn to_inputs(&self) -> MissionInputs {
        MissionInputs {
            altitude_ft: self.altitude_ft,
            operating_voltage_v: self.op_voltage,
            interference_vpm: self.field_vpm,
        }
    }
}

impl CliConfig {
    pub fn altitude_profile(&self) -> Option<AltitudeProfile> {
        match &self.command {
            Command::AltitudeProfile { max_ft, step_ft, .. } => Some(AltitudeProfile {
                max_ft: *max_ft,
                step_ft: *step_ft,
            }),
            _ => None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            validate_path("catalog", catalog)?;
        }
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        if let Some(profile) = self.altitude_profile() {
            profile.altitudes()?;
        }
        if let Command::Sweep { sweep: range, .. } | Command::Line { range, .. } = &self.command {
            validate_range("points", range.points, 0, SweepRequest::MAX_POINTS)?;
        }
        Ok(())
    }
}
