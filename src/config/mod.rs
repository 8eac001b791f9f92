pub mod catalog_file;
#[cfg(feature = "cli")]
pub mod cli;
pub mod scenario;

use crate::utils::error::{Result, SimError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// 替換環境變數 (例如 ${CABLE_SE_DB})；未設定的變數保持原樣
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let result = env_var_pattern().replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

pub(crate) fn read_toml_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| SimError::ConfigError {
        message: format!("Cannot read '{}': {}", path.display(), e),
    })
}
