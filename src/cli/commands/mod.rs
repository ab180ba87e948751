mod config_management;
mod help;
mod link_management;

pub use config_management::*;
pub use help::*;
pub use link_management::*;

use std::path::PathBuf;

use super::args::{Commands, ConfigCommands};
use crate::config::Config;
use crate::errors::Result;

impl Commands {
    /// Whether the command reads the mapping file and so needs a config.
    pub fn needs_config(&self) -> bool {
        matches!(
            self,
            Commands::Add(_) | Commands::Remove(_) | Commands::List(_) | Commands::Resolve(_)
        )
    }

    /// Run the command. `file` is the global `--file` override.
    pub fn execute(self, config: &Config, file: Option<PathBuf>) -> Result<()> {
        match self {
            Commands::Add(args) => add_link(config, file, args),
            Commands::Remove(args) => remove_link(config, file, args),
            Commands::List(args) => list_links(config, file, args),
            Commands::Resolve(args) => resolve_link(config, file, args),
            Commands::Config { action } => match action {
                ConfigCommands::Generate { output_path, force } => {
                    config_generate(output_path, force)
                }
            },
            Commands::Help => {
                show_help();
                Ok(())
            }
            Commands::Unknown(args) => {
                show_unknown_command(args.first().map(String::as_str).unwrap_or(""));
                Ok(())
            }
        }
    }
}
