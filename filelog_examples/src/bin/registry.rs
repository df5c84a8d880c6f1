// example_registry — one logger per plugin, shared between threads

use filelog::{Level, LoggerRegistry, SystemLog};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const APP_NAME: &str = "example_registry";
const PLUGINS: [&str; 3] = ["auth", "sync", "reports"];

fn main() {
    let system_log = SystemLog::connect(APP_NAME);

    // The composition root owns the registry and hands it out
    let registry = Arc::new(LoggerRegistry::new("logs/plugins", Level::Debug));

    let handles: Vec<_> = PLUGINS
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || -> filelog::Result<()> {
                let logger = registry.get_or_create(name)?;
                logger.debug(&format!("Plugin {} started", name))?;
                thread::sleep(Duration::from_millis(50 * (i as u64 + 1)));

                if i == 1 {
                    logger.warning(&format!("Plugin {} detected high latency", name))?;
                }

                // Same name, same logger: no second file handle
                registry.get_or_create(name)?.debug("finished")
            })
        })
        .collect();

    for h in handles {
        match h.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => system_log.report(Level::Error, &format!("Plugin logging failed: {}", e)),
            Err(_) => system_log.report(Level::Critical, "Plugin thread panicked"),
        }
    }

    for name in registry.names() {
        if let Ok(logger) = registry.get_or_create(&name) {
            println!("{:<8} {} lines -> {}", name, logger.line_count(), logger.destination());
        }
    }
}
