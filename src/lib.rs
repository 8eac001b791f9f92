pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{output::OutputFormat, storage::LocalStorage};
pub use crate::app::scenario_runner::{ScenarioRunner, ScenarioSummary};
pub use crate::config::{catalog_file::load_catalog, scenario::ScenarioConfig};
pub use crate::core::catalog::CableCatalog;
pub use crate::core::environment::{
    check_altitude_failure, paschen_breakdown_voltage, pressure_kpa, shielding_leakage,
};
pub use crate::core::mission::{run_mission_simulation, MissionInputs};
pub use crate::core::phase::{
    compute_phase_deg, routed_phase_deg, strain_phase_deg, wrap180, PhaseSetup,
};
pub use crate::core::routing::routing_delta_length;
pub use crate::core::sweep::sweep_phase_vs_frequency;
pub use crate::domain::ports::CableLookup;
pub use crate::utils::error::{Result, SimError};
