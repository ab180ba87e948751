pub mod args;
pub mod commands;

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, warn};

pub use args::{Cli, Commands, ConfigCommands};
use commands::show_help;

use crate::config::Config;
use crate::errors::Result;
use crate::system::init_logging;

/// Run one invocation; `args` includes the program name.
///
/// Errors are printed to stderr and turn into a failing exit code.
pub fn run_cli<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match run_cli_inner(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    }
}

fn run_cli_inner<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let Some(command) = cli.command else {
        show_help();
        return Ok(());
    };

    // help、未知命令和 config generate 不读取配置文件
    if !command.needs_config() {
        return command.execute(&Config::default(), cli.file);
    }

    let loaded = Config::load(cli.config.as_deref())?;
    let _guard = init_logging(&loaded.config.logging)?;
    if let Some(warning) = &loaded.warning {
        warn!("{}", warning);
    }

    debug!("Running command '{}'", command.name());
    command.execute(&loaded.config, cli.file)
}
