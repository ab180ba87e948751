use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    linkreg::cli::run_cli(env::args_os())
}
