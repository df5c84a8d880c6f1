// example_error_boundary — failures escaping main end up in the default log

use filelog::{ErrorBoundary, Level, LoggerRegistry};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

const APP_NAME: &str = "example_error_boundary";

fn load_settings() -> Result<String, std::io::Error> {
    // Missing on purpose
    fs::read_to_string("settings/does-not-exist.toml")
}

fn main() -> ExitCode {
    let registry = Arc::new(LoggerRegistry::new("logs", Level::Error).with_default_name(APP_NAME));

    // A second boundary takes over panics; both write to the same default logger
    ErrorBoundary::new(Arc::clone(&registry), APP_NAME).install_panic_hook();

    let boundary = ErrorBoundary::new(Arc::clone(&registry), APP_NAME);
    boundary.run(|| -> Result<(), std::io::Error> {
        let settings = load_settings()?;
        println!("Loaded {} bytes of settings", settings.len());
        Ok(())
    })
}
