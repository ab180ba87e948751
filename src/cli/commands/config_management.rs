use std::fs;
use std::path::PathBuf;

use colored::*;

use crate::config::{CONFIG_FILE_NAME, Config, tool_dir};
use crate::errors::{LinkregError, Result};

/// Write a sample config, refusing to clobber an existing file unless forced.
pub fn config_generate(output_path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = output_path.unwrap_or_else(|| tool_dir().join(CONFIG_FILE_NAME));

    if !force && path.exists() {
        return Err(LinkregError::invalid_input(format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        )));
    }

    fs::write(&path, Config::generate_sample_config()).map_err(|e| {
        LinkregError::file_operation(format!(
            "Unable to write configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    println!(
        "{} Configuration file generated: {}",
        "✓".bold().green(),
        path.display().to_string().blue()
    );
    Ok(())
}
