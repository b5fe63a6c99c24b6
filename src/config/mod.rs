pub mod init;

pub use init::write_default_standards;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::standards::{StandardsConfig, StandardsTable};

/// Get the config directory path (~/.config/fitpass/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("fitpass"))
}

/// Get the default standards file path (~/.config/fitpass/standards.yaml)
pub fn get_standards_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("standards.yaml"))
}

/// Load the standards table.
///
/// * `Some(path)` - the file must exist and be valid.
/// * `None` - uses ~/.config/fitpass/standards.yaml when present, otherwise
///   the built-in table.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit path does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed
/// - The standards fail validation (all problems are listed)
pub fn load_standards(path: Option<PathBuf>) -> Result<StandardsTable> {
    let standards_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Standards file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_standards_path()?;
            if !default_path.exists() {
                tracing::debug!(
                    "no standards file at {}, using built-in table",
                    default_path.display()
                );
                return StandardsTable::builtin();
            }
            default_path
        }
    };

    load_standards_file(&standards_path)
}

fn load_standards_file(path: &Path) -> Result<StandardsTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read standards file at {}", path.display()))?;

    let config: StandardsConfig = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse standards: invalid YAML in {}", path.display()))?;

    let table = StandardsTable::from_config(&config).map_err(|errors| {
        anyhow::anyhow!(
            "Invalid standards in {}:\n  - {}",
            path.display(),
            errors.join("\n  - ")
        )
    })?;

    tracing::debug!(
        path = %path.display(),
        universities = table.universities().len(),
        "loaded standards"
    );

    Ok(table)
}
