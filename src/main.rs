/// remote-build - Remote build helper
///
/// Pushes the local change set to a build host over SSH and runs the build
/// there, exiting with the status of whatever failed.
use remote_build::{error::exit_code_for, log_error};

mod commands;

fn main() {
    if let Err(err) = commands::remote_build::run() {
        log_error!("{err:#}");
        std::process::exit(exit_code_for(&err));
    }
}
