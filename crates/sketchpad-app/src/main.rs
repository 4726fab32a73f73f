//! Main application entry point.

use sketchpad_app::{App, AppConfig, TerminalPrompter};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Sketchpad");

    let config = AppConfig {
        initial_file: std::env::args_os().nth(1).map(PathBuf::from),
        ..AppConfig::default()
    };
    let mut app = match App::with_config(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            eprintln!("sketchpad: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut prompter = TerminalPrompter::new(io::stdin().lock(), io::stdout());
    if let Err(e) = app.run(&mut prompter) {
        log::error!("Terminal I/O failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
