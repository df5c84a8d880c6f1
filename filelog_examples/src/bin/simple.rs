// example_simple — a plain file logger: construction, levels, context, close

use filelog::{debug, error, warning, Context, FileLogger, Level, LoggerOptions, SystemLog};
use serde_json::json;

const APP_NAME: &str = "example_simple";
const APP_VERSION: &str = "1.0.0";

fn main() {
    // 1. Preamble: the system log is where we complain if the file cannot be opened
    let system_log = SystemLog::connect(APP_NAME);
    system_log.report(Level::Info, &format!("Starting {} v{}", APP_NAME, APP_VERSION));

    // 2. Initialization: open logs/simple.log, flushing after every second line
    let options = LoggerOptions::default()
        .with_filename("simple.log")
        .with_flush_frequency(2);
    let mut file_logger = match FileLogger::new("logs", Level::Info, options) {
        Ok(l) => l,
        Err(e) => {
            system_log.report(Level::Error, &format!("Failed to open log file: {}", e));
            std::process::exit(1);
        }
    };

    // 3. Main part: only the file from here on
    let mut context = Context::new();
    context.insert("block".into(), json!(1));
    context.insert("sizes".into(), json!({"in": 4096, "out": 512}));

    let result = file_logger
        .info("Application initialized successfully")
        .and_then(|()| file_logger.info_with("Processing data block", &context))
        .and_then(|()| debug!(file_logger, "x = {}", 5)) // below the threshold
        .and_then(|()| warning!(file_logger, "Non-critical issue detected"))
        .and_then(|()| error!(file_logger, "An error occurred, but we continue"));

    if let Err(e) = result {
        system_log.report(Level::Error, &format!("Failed to write log: {}", e));
    }

    println!("Last line in {}: {}", file_logger.destination(), file_logger.last_line());

    // 4. Final part
    if let Err(e) = file_logger.close() {
        system_log.report(Level::Error, &format!("Failed to close log: {}", e));
    }
    system_log.report(Level::Info, "Application finished successfully");
}
