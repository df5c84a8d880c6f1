use std::fmt::Display;
use std::panic;
use std::process::ExitCode;
use std::sync::Arc;

use serde_json::Value;

use crate::context::{context_to_string, Context};
use crate::level::Level;
use crate::registry::LoggerRegistry;
use crate::system::SystemLog;

// What the end user sees once the details are in the log.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An unexpected error occurred. The details have been written to the application log.";

// ===== Error boundary =====

pub struct ErrorBoundary {
    registry: Arc<LoggerRegistry>,
    system: SystemLog,
}

impl ErrorBoundary {
    pub fn new(registry: Arc<LoggerRegistry>, process: &str) -> Self {
        ErrorBoundary {
            registry,
            system: SystemLog::connect(process),
        }
    }

    pub fn report(&self, message: &str, context: &Context) {
        let logged = self
            .registry
            .default_logger()
            .and_then(|logger| logger.error_with(message, context));

        if let Err(e) = logged {
            self.system
                .report(Level::Error, &format!("{message} (log unavailable: {e})"));
        }
    }

    pub fn run<E, F>(&self, main: F) -> ExitCode
    where
        E: Display,
        F: FnOnce() -> Result<(), E>,
    {
        match main() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                let mut context = Context::new();
                context.insert("error".into(), Value::String(e.to_string()));
                self.report("Unhandled error", &context);
                eprintln!("{GENERIC_FAILURE_MESSAGE}");
                ExitCode::FAILURE
            }
        }
    }

    // The hook only uses a logger that is already open and never waits on its
    // lock; the panicking thread may be the one holding it.
    fn report_panic(&self, message: &str, context: &Context) {
        let logged = self
            .registry
            .open_default_logger()
            .and_then(|logger| logger.try_log(Level::Error, message, context));

        match logged {
            Some(Ok(())) => {}
            Some(Err(e)) => self
                .system
                .report(Level::Error, &format!("{message} (log unavailable: {e})")),
            None => self.system.report(
                Level::Error,
                &format!("{message}: {}", context_to_string(context)),
            ),
        }
    }

    pub fn install_panic_hook(self) {
        panic::set_hook(Box::new(move |info| {
            let payload = info.payload();
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_owned());

            let mut context = Context::new();
            context.insert("panic".into(), Value::String(message));
            if let Some(location) = info.location() {
                context.insert(
                    "location".into(),
                    Value::String(format!("{}:{}", location.file(), location.line())),
                );
            }

            self.report_panic("Unhandled panic", &context);
            eprintln!("{GENERIC_FAILURE_MESSAGE}");
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Destination;
    use std::sync::{Mutex, PoisonError};
    use std::thread;
    use std::time::{Duration, Instant};

    // The panic hook is process-wide.
    static HOOK: Mutex<()> = Mutex::new(());

    fn explode(message: &str) {
        panic!("{message}");
    }

    fn default_log_text(registry: &LoggerRegistry) -> String {
        let Destination::File(path) = registry.default_logger().unwrap().destination() else {
            panic!("expected a file destination");
        };
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn errors_are_logged_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(LoggerRegistry::new(dir.path(), Level::Debug));
        let boundary = ErrorBoundary::new(Arc::clone(&registry), "boundary-test");

        let _ = boundary.run(|| Err::<(), _>("config file missing"));

        let text = default_log_text(&registry);
        assert!(text.contains("[error] Unhandled error\n"));
        assert!(text.contains("    error: 'config file missing'\n"));
    }

    #[test]
    fn success_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(LoggerRegistry::new(dir.path(), Level::Debug));
        let boundary = ErrorBoundary::new(Arc::clone(&registry), "boundary-test");

        let _ = boundary.run(|| Ok::<(), String>(()));

        assert!(registry.names().is_empty());
    }

    #[test]
    fn panics_on_other_threads_are_logged() {
        let _hook = HOOK.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(LoggerRegistry::new(dir.path(), Level::Debug));
        registry.default_logger().unwrap();
        let previous = panic::take_hook();
        ErrorBoundary::new(Arc::clone(&registry), "boundary-test").install_panic_hook();

        let outcome = thread::spawn(|| explode("worker exploded")).join();
        panic::set_hook(previous);

        assert!(outcome.is_err());
        let text = default_log_text(&registry);
        assert!(text.contains("[error] Unhandled panic\n"));
        assert!(text.contains("    panic: 'worker exploded'\n"));
        assert!(text.contains("    location: '"));
    }

    #[test]
    fn panic_while_logging_does_not_hang() {
        let _hook = HOOK.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(LoggerRegistry::new(dir.path(), Level::Debug));
        let logger = registry.default_logger().unwrap();
        let previous = panic::take_hook();
        ErrorBoundary::new(Arc::clone(&registry), "boundary-test").install_panic_hook();

        let held = logger.clone();
        let handle = thread::spawn(move || held.with(|_| explode("inside the logger")));
        let started = Instant::now();
        while !handle.is_finished() && started.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(10));
        }
        let finished = handle.is_finished();
        if finished {
            assert!(handle.join().is_err());
        }
        panic::set_hook(previous);

        assert!(finished);
        // The poisoned lock is still usable afterwards.
        logger.info("after").unwrap();
        assert!(default_log_text(&registry).ends_with("[info] after\n"));
    }

    #[test]
    fn panic_hook_never_opens_the_log() {
        let _hook = HOOK.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(LoggerRegistry::new(dir.path(), Level::Debug));
        let previous = panic::take_hook();
        ErrorBoundary::new(Arc::clone(&registry), "boundary-test").install_panic_hook();

        let outcome = thread::spawn(|| explode("before any logging")).join();
        panic::set_hook(previous);

        assert!(outcome.is_err());
        assert!(registry.names().is_empty());
    }
}
