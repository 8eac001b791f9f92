use crate::domain::model::CableSpec;
use crate::utils::error::{Result, SimError};

/// Read-only source of cable definitions passed into every model call.
pub trait CableLookup {
    fn find(&self, name: &str) -> Option<&CableSpec>;
    fn names(&self) -> Vec<&str>;

    fn resolve(&self, name: &str) -> Result<&CableSpec> {
        self.find(name)
            .ok_or_else(|| SimError::unknown_cable(name, self.names()))
    }
}
