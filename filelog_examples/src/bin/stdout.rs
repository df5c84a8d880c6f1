// example_stdout — log lines on standard output with a custom template

use filelog::{critical, notice, FileLogger, Level, LoggerOptions};

fn main() -> filelog::Result<()> {
    let options = LoggerOptions::default()
        .with_date_format("%H:%M:%S%.3f")
        .with_log_format("{date} {level}{level-padding}({priority}) {message}");

    let mut logger = FileLogger::new("stream://stdout", Level::Notice, options)?;

    for level in Level::ALL {
        logger.log(level, &format!("sample at {}", level), &Default::default())?;
    }

    notice!(logger, "{} levels above, info and debug were filtered", 6)?;
    logger.set_threshold(Level::Debug);
    logger.debug("debug is visible after lowering the threshold")?;
    critical!(logger, "done")?;

    logger.close()
}
