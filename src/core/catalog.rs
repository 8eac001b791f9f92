use crate::domain::model::CableSpec;
use crate::domain::ports::CableLookup;
use crate::utils::error::{Result, SimError};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_non_negative, validate_positive,
    validate_range, Validate,
};
use std::collections::BTreeMap;

/// Immutable name → cable mapping, built once and passed by reference.
#[derive(Debug, Clone, Default)]
pub struct CableCatalog {
    cables: BTreeMap<String, CableSpec>,
}

impl CableCatalog {
    /// Validates every entry; duplicate names are rejected.
    pub fn from_specs<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = CableSpec>,
    {
        let mut cables = BTreeMap::new();
        for spec in specs {
            spec.validate()?;
            if cables.contains_key(&spec.name) {
                return Err(SimError::InvalidConfigValueError {
                    field: "cables".to_string(),
                    value: spec.name.clone(),
                    reason: "Duplicate cable name".to_string(),
                });
            }
            cables.insert(spec.name.clone(), spec);
        }
        Ok(Self { cables })
    }

    /// Reference cables shipped with the tool.
    pub fn builtin() -> Self {
        let specs = [
            CableSpec {
                name: "RG-58".to_string(),
                velocity_factor: 0.66,
                relative_permittivity: 2.29,
                temp_coeff_ppm_per_c: 50.0,
                inner_diameter_m: 0.000_81,
                outer_diameter_m: 0.002_95,
                shielding_effectiveness_db: 40.0,
                conductivity_s_per_m: 5.8e7,
                attenuation_db_per_m: 0.20,
            },
            CableSpec {
                name: "RG-213".to_string(),
                velocity_factor: 0.66,
                relative_permittivity: 2.29,
                temp_coeff_ppm_per_c: 45.0,
                inner_diameter_m: 0.002_26,
                outer_diameter_m: 0.007_24,
                shielding_effectiveness_db: 60.0,
                conductivity_s_per_m: 5.8e7,
                attenuation_db_per_m: 0.12,
            },
            CableSpec {
                name: "LMR-400".to_string(),
                velocity_factor: 0.85,
                relative_permittivity: 1.38,
                temp_coeff_ppm_per_c: 20.0,
                inner_diameter_m: 0.002_74,
                outer_diameter_m: 0.007_24,
                shielding_effectiveness_db: 90.0,
                conductivity_s_per_m: 5.8e7,
                attenuation_db_per_m: 0.07,
            },
            CableSpec {
                name: "RG-400".to_string(),
                velocity_factor: 0.69,
                relative_permittivity: 2.1,
                temp_coeff_ppm_per_c: 30.0,
                inner_diameter_m: 0.000_9,
                outer_diameter_m: 0.002_9,
                shielding_effectiveness_db: 90.0,
                conductivity_s_per_m: 5.8e7,
                attenuation_db_per_m: 0.45,
            },
        ];

        Self {
            cables: specs.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    /// Entries in `other` replace same-named entries in `self`.
    pub fn merged_with(mut self, other: CableCatalog) -> Self {
        self.cables.extend(other.cables);
        self
    }

    pub fn len(&self) -> usize {
        self.cables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CableSpec> {
        self.cables.values()
    }
}

impl CableLookup for CableCatalog {
    fn find(&self, name: &str) -> Option<&CableSpec> {
        self.cables.get(name)
    }

    fn names(&self) -> Vec<&str> {
        self.cables.keys().map(String::as_str).collect()
    }
}

impl Validate for CableSpec {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;

        let field = |f: &str| format!("cables.{}.{}", self.name, f);

        if !(self.velocity_factor > 0.0 && self.velocity_factor <= 1.0) {
            return Err(SimError::InvalidConfigValueError {
                field: field("velocity_factor"),
                value: self.velocity_factor.to_string(),
                reason: "Value must be in (0, 1]".to_string(),
            });
        }
        validate_positive(&field("relative_permittivity"), self.relative_permittivity)?;
        validate_finite(&field("temp_coeff_ppm_per_c"), self.temp_coeff_ppm_per_c)?;
        validate_positive(&field("inner_diameter_m"), self.inner_diameter_m)?;
        validate_positive(&field("outer_diameter_m"), self.outer_diameter_m)?;
        if self.outer_diameter_m <= self.inner_diameter_m {
            return Err(SimError::InvalidConfigValueError {
                field: field("outer_diameter_m"),
                value: self.outer_diameter_m.to_string(),
                reason: format!(
                    "Shield diameter must exceed the inner conductor diameter ({})",
                    self.inner_diameter_m
                ),
            });
        }
        validate_range(
            &field("shielding_effectiveness_db"),
            self.shielding_effectiveness_db,
            0.0,
            200.0,
        )?;
        validate_positive(&field("conductivity_s_per_m"), self.conductivity_s_per_m)?;
        validate_non_negative(&field("attenuation_db_per_m"), self.attenuation_db_per_m)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = CableCatalog::builtin();
        assert_eq!(catalog.len(), 4);
        for cable in catalog.iter() {
            assert!(cable.validate().is_ok(), "{} should validate", cable.name);
        }
    }

    #[test]
    fn test_resolve_unknown_cable_fails() {
        let catalog = CableCatalog::builtin();
        let err = catalog.resolve("RG-6").unwrap_err();
        match err {
            SimError::UnknownCable { name, available } => {
                assert_eq!(name, "RG-6");
                assert!(available.contains("LMR-400"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_specs_rejects_inverted_geometry() {
        let mut cable = CableCatalog::builtin().resolve("RG-58").unwrap().clone();
        cable.outer_diameter_m = cable.inner_diameter_m / 2.0;
        assert!(CableCatalog::from_specs([cable]).is_err());
    }

    #[test]
    fn test_from_specs_rejects_duplicates() {
        let cable = CableCatalog::builtin().resolve("RG-58").unwrap().clone();
        assert!(CableCatalog::from_specs([cable.clone(), cable]).is_err());
    }

    #[test]
    fn test_merged_with_overrides_by_name() {
        let mut custom = CableCatalog::builtin().resolve("RG-58").unwrap().clone();
        custom.temp_coeff_ppm_per_c = -10.0;
        let overlay = CableCatalog::from_specs([custom]).unwrap();

        let merged = CableCatalog::builtin().merged_with(overlay);
        assert_eq!(merged.len(), 4);
        assert_eq!(merged.resolve("RG-58").unwrap().temp_coeff_ppm_per_c, -10.0);
    }
}
