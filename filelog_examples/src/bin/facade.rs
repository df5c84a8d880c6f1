// example_facade — `log` crate macros routed into a file logger

use filelog::{init_log_facade, FileLogger, Level, LoggerOptions, SharedLogger};
use log::LevelFilter;

fn main() {
    let logger = match FileLogger::new(
        "logs",
        Level::Info,
        LoggerOptions::default()
            .with_filename("facade")
            .with_extension("log")
            .with_flush_frequency(1),
    ) {
        Ok(l) => SharedLogger::new(l),
        Err(e) => {
            eprintln!("[FATAL] Cannot open log file: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_log_facade(logger.clone(), LevelFilter::Info, "example_facade") {
        eprintln!("[FATAL] Another logger is already installed: {}", e);
        std::process::exit(1);
    }

    log::info!("service listening on {}", "0.0.0.0:8080");
    log::warn!("cache is cold");
    log::debug!("not written: the facade is capped at info");

    println!("{} now ends with: {}", logger.destination(), logger.last_line());
}
