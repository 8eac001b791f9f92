// Adapters layer: plot data files and result storage for external consumers.

pub mod output;
pub mod storage;
