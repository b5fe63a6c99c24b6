use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::get_standards_path;
use crate::standards::builtin_yaml;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    Ok(parse_yes_no(&input, default_yes))
}

fn parse_yes_no(input: &str, default_yes: bool) -> bool {
    let input = input.to_lowercase();
    if input.is_empty() {
        default_yes
    } else {
        input == "y" || input == "yes"
    }
}

/// Write the built-in standards to disk as a starting point for editing.
///
/// Asks before replacing an existing file unless `force` is set.
/// Returns the path written, or None if the user declined.
pub fn write_default_standards(path: Option<PathBuf>, force: bool) -> Result<Option<PathBuf>> {
    let standards_path = match path {
        Some(p) => p,
        None => get_standards_path()?,
    };

    if standards_path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!(
                "Standards file already exists at {}. Overwrite?",
                standards_path.display()
            ),
            false,
        )?;
        if !overwrite {
            return Ok(None);
        }
    }

    write_standards(&standards_path, builtin_yaml())?;
    Ok(Some(standards_path))
}

fn write_standards(path: &Path, yaml: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write standards to {}", path.display()))?;

    tracing::debug!(path = %path.display(), "wrote default standards");
    Ok(())
}
