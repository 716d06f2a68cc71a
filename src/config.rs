use crate::error::CliError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "tsconfig.json";

/// The project configuration, resolved once per invocation and handed to the oracle unchanged.
/// `compiler_options` is kept as an opaque JSON value — this tool's carried oracle does not
/// need any particular key from it today, but accepting and threading it through (rather than
/// rejecting unknown keys) keeps config files written for other tooling in this family usable
/// here too.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    #[serde(default)]
    pub compiler_options: serde_json::Value,
}

/// Locates and parses the project configuration file, per section 6's external collaborator
/// contract: an explicit `--project` path must exist verbatim, otherwise the search walks
/// upward from the current directory for `tsconfig.json`.
pub fn resolve_options(project_override: Option<&Path>) -> Result<ResolvedOptions, CliError> {
    let config_path = match project_override {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let start = std::env::current_dir()
                .map_err(|e| CliError::Config(format!("Could not determine current directory: {e}")))?;
            find_config_file(&start)
                .ok_or_else(|| CliError::Config("Could not find a valid tsconfig.json.".to_string()))?
        }
    };

    let text = fs::read_to_string(&config_path)
        .map_err(|e| CliError::Config(format!("Error parsing tsconfig.json: {e}")))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Config(format!("Error parsing tsconfig.json. Config file diagnostic: {e}")))
}

fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start.to_path_buf());
    while let Some(current) = dir {
        let candidate = current.join(DEFAULT_CONFIG_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent().map(Path::to_path_buf);
    }
    None
}
