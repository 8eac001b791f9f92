// Application layer: wires config, core models and adapters together for the binaries.

#[cfg(feature = "cli")]
pub mod commands;
pub mod scenario_runner;

use crate::domain::ports::CableLookup;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

/// εr for the permittivity-based models: explicit value first, then the cable's.
pub fn resolve_permittivity<C>(
    catalog: &C,
    cable: Option<&str>,
    epsilon_r: Option<f64>,
    section: &str,
) -> Result<f64>
where
    C: CableLookup + ?Sized,
{
    if let Some(er) = epsilon_r {
        return Ok(er);
    }
    let name = validate_required_field(&format!("{}: epsilon_r or cable", section), &cable)?;
    Ok(catalog.resolve(name)?.relative_permittivity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CableCatalog;
    use crate::utils::error::SimError;

    #[test]
    fn test_explicit_permittivity_wins() {
        let catalog = CableCatalog::builtin();
        let explicit = resolve_permittivity(&catalog, Some("RG-58"), Some(3.0), "strain");
        assert_eq!(explicit.unwrap(), 3.0);
        let from_cable = resolve_permittivity(&catalog, Some("RG-400"), None, "strain");
        assert_eq!(from_cable.unwrap(), 2.1);
        assert!(matches!(
            resolve_permittivity(&catalog, Some("nope"), None, "strain"),
            Err(SimError::UnknownCable { .. })
        ));
    }

    #[test]
    fn test_missing_permittivity_source() {
        let catalog = CableCatalog::builtin();
        match resolve_permittivity(&catalog, None, None, "routed") {
            Err(SimError::MissingConfigError { field }) => {
                assert_eq!(field, "routed: epsilon_r or cable")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
