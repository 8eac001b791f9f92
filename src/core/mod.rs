pub mod catalog;
pub mod constants;
pub mod environment;
pub mod line;
pub mod mission;
pub mod phase;
pub mod routing;
pub mod sweep;

pub use crate::domain::model::{
    BreakdownVerdict, CableSpec, Computed, GuardReason, MissionReport, MissionStatus, Series,
    SweepRequest,
};
pub use crate::domain::ports::CableLookup;
pub use crate::utils::error::Result;
