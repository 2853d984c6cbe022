//! WorldWise command-line entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match worldwise::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            worldwise::ui::output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
