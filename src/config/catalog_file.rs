use crate::config::{read_toml_file, substitute_env_vars};
use crate::core::catalog::CableCatalog;
use crate::domain::model::CableSpec;
use crate::utils::error::{Result, SimError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk cable catalog.
///
/// ```toml
/// extend_builtin = true
///
/// [cables."RG-316"]
/// relative_permittivity = 2.1
/// temp_coeff_ppm_per_c = 35.0
/// inner_diameter_m = 0.00051
/// outer_diameter_m = 0.00152
/// shielding_effectiveness_db = 50.0
/// conductivity_s_per_m = 5.8e7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub extend_builtin: bool,
    pub cables: BTreeMap<String, CableEntry>,
}

/// One cable as written in the file; either propagation parameter may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableEntry {
    pub velocity_factor: Option<f64>,
    pub relative_permittivity: Option<f64>,
    pub temp_coeff_ppm_per_c: f64,
    pub inner_diameter_m: f64,
    pub outer_diameter_m: f64,
    pub shielding_effectiveness_db: f64,
    pub conductivity_s_per_m: f64,
    #[serde(default)]
    pub attenuation_db_per_m: f64,
}

impl CableEntry {
    /// 補齊缺少的傳播參數 (vf = 1/sqrt(er))
    pub fn into_spec(self, name: &str) -> Result<CableSpec> {
        let (velocity_factor, relative_permittivity) =
            match (self.velocity_factor, self.relative_permittivity) {
                (Some(vf), Some(er)) => (vf, er),
                (Some(vf), None) => (vf, 1.0 / (vf * vf)),
                (None, Some(er)) => (1.0 / er.sqrt(), er),
                (None, None) => {
                    return Err(SimError::MissingConfigError {
                        field: format!("cables.{}.velocity_factor or relative_permittivity", name),
                    })
                }
            };

        let spec = CableSpec {
            name: name.to_string(),
            velocity_factor,
            relative_permittivity,
            temp_coeff_ppm_per_c: self.temp_coeff_ppm_per_c,
            inner_diameter_m: self.inner_diameter_m,
            outer_diameter_m: self.outer_diameter_m,
            shielding_effectiveness_db: self.shielding_effectiveness_db,
            conductivity_s_per_m: self.conductivity_s_per_m,
            attenuation_db_per_m: self.attenuation_db_per_m,
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl CatalogFile {
    /// 從 TOML 檔案載入線材目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_toml_file(path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析線材目錄
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SimError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn into_catalog(self) -> Result<CableCatalog> {
        let extend_builtin = self.extend_builtin;
        let specs = self
            .cables
            .into_iter()
            .map(|(name, entry)| entry.into_spec(&name))
            .collect::<Result<Vec<_>>>()?;
        let loaded = CableCatalog::from_specs(specs)?;

        tracing::info!(
            "Loaded {} cable(s) from catalog file{}",
            loaded.len(),
            if extend_builtin { " on top of the built-in set" } else { "" }
        );

        if extend_builtin {
            Ok(CableCatalog::builtin().merged_with(loaded))
        } else {
            Ok(loaded)
        }
    }
}

impl Validate for CatalogFile {
    fn validate(&self) -> Result<()> {
        if self.cables.is_empty() && !self.extend_builtin {
            return Err(SimError::ConfigValidationError {
                field: "cables".to_string(),
                message: "Catalog file defines no cables".to_string(),
            });
        }
        for (name, entry) in &self.cables {
            entry.clone().into_spec(name)?;
        }
        Ok(())
    }
}

/// Built-in catalog, or the one at `path` when given.
pub fn load_catalog(path: Option<&str>) -> Result<CableCatalog> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading cable catalog from: {}", path);
            let file = CatalogFile::from_file(path)?;
            file.validate()?;
            file.into_catalog()
        }
        None => Ok(CableCatalog::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CableLookup;

    const RG316: &str = r#"
[cables."RG-316"]
relative_permittivity = 2.1
temp_coeff_ppm_per_c = 35.0
inner_diameter_m = 0.00051
outer_diameter_m = 0.00152
shielding_effectiveness_db = 50.0
conductivity_s_per_m = 5.8e7
"#;

    #[test]
    fn test_parse_catalog_derives_velocity_factor() {
        let catalog = CatalogFile::from_toml_str(RG316).unwrap().into_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        let cable = catalog.resolve("RG-316").unwrap();
        assert!((cable.velocity_factor - 1.0 / 2.1f64.sqrt()).abs() < 1e-12);
        assert_eq!(cable.attenuation_db_per_m, 0.0);
    }

    #[test]
    fn test_extend_builtin_keeps_reference_cables() {
        let content = format!("extend_builtin = true\n{}", RG316);
        let catalog = CatalogFile::from_toml_str(&content).unwrap().into_catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.resolve("RG-58").is_ok());
    }

    #[test]
    fn test_missing_propagation_parameters() {
        let content = r#"
[cables.bare]
temp_coeff_ppm_per_c = 35.0
inner_diameter_m = 0.00051
outer_diameter_m = 0.00152
shielding_effectiveness_db = 50.0
conductivity_s_per_m = 5.8e7
"#;
        let file = CatalogFile::from_toml_str(content).unwrap();
        assert!(matches!(
            file.validate(),
            Err(SimError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COAX_TEST_SE_DB", "75.5");
        let content = RG316.replace("50.0", "${COAX_TEST_SE_DB}");
        let catalog = CatalogFile::from_toml_str(&content).unwrap().into_catalog().unwrap();
        assert_eq!(catalog.resolve("RG-316").unwrap().shielding_effectiveness_db, 75.5);
        std::env::remove_var("COAX_TEST_SE_DB");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = CatalogFile::from_toml_str("[cables").unwrap_err();
        assert!(matches!(err, SimError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_load_catalog_defaults_to_builtin() {
        assert_eq!(load_catalog(None).unwrap().len(), 4);
    }
}
