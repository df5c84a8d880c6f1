use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::context::Context;
use crate::error::{LoggerError, Result};
use crate::format::{format_record, validate_date_format};
use crate::level::Level;
use crate::options::LoggerOptions;
use crate::sink::{Destination, Sink, STREAM_SCHEME};

pub const DEFAULT_DIR_MODE: u32 = 0o777;

pub struct FileLogger {
    threshold: Level,
    destination: Destination,
    sink: Option<Sink>,
    options: LoggerOptions,
    line_count: u64,
    last_line: String,
}

impl FileLogger {
    // `stream://stdout` and `stream://stderr` skip the directory entirely.
    pub fn new<P: AsRef<Path>>(
        directory: P,
        threshold: Level,
        options: LoggerOptions,
    ) -> Result<Self> {
        validate_date_format(&options.date_format)?;
        let directory = directory.as_ref();

        if let Some(stream) = directory.to_str().and_then(|d| d.strip_prefix(STREAM_SCHEME)) {
            let sink = Sink::stream(stream)?;
            let destination = Destination::Stream(format!("{STREAM_SCHEME}{stream}"));
            return Ok(Self::from_parts(destination, sink, threshold, options));
        }

        let directory: PathBuf = directory.components().collect();
        ensure_directory(&directory)?;

        let path = resolve_file_path(&directory, &options, Local::now().date_naive());
        let sink = Sink::append(&path)?;
        Ok(Self::from_parts(Destination::File(path), sink, threshold, options))
    }

    pub fn with_writer<W>(writer: W, threshold: Level, options: LoggerOptions) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        validate_date_format(&options.date_format)?;
        let destination = Destination::Stream(format!("{STREAM_SCHEME}custom"));
        Ok(Self::from_parts(
            destination,
            Sink::Writer(Box::new(writer)),
            threshold,
            options,
        ))
    }

    fn from_parts(
        destination: Destination,
        sink: Sink,
        threshold: Level,
        options: LoggerOptions,
    ) -> Self {
        FileLogger {
            threshold,
            destination,
            sink: Some(sink),
            options,
            line_count: 0,
            last_line: String::new(),
        }
    }

    pub fn log(&mut self, level: Level, message: &str, context: &Context) -> Result<()> {
        if !level.passes(self.threshold) {
            return Ok(());
        }
        let line = format_record(&self.options, level, message, context, &Local::now());
        self.write(&line)
    }

    pub fn log_named(&mut self, level: &str, message: &str, context: &Context) -> Result<()> {
        let level: Level = level.parse()?;
        self.log(level, message, context)
    }

    level_methods!(mut);

    // Raw line: no threshold, no formatting.
    pub fn write(&mut self, line: &str) -> Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Err(LoggerError::Write(io::Error::new(
                io::ErrorKind::NotConnected,
                "log sink is closed",
            )));
        };

        sink.write_all(line.as_bytes()).map_err(LoggerError::Write)?;
        self.line_count += 1;
        self.last_line = line.trim_end().to_owned();

        let every = u64::from(self.options.flush_frequency);
        if every > 0 && self.line_count % every == 0 {
            sink.sync().map_err(LoggerError::Flush)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.sync().map_err(LoggerError::Flush),
            None => Ok(()),
        }
    }

    pub fn close(mut self) -> Result<()> {
        match self.sink.take() {
            Some(mut sink) => sink.sync().map_err(LoggerError::Flush),
            None => Ok(()),
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn last_line(&self) -> &str {
        &self.last_line
    }

    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    pub fn set_threshold(&mut self, threshold: Level) {
        self.threshold = threshold;
    }

    pub fn set_date_format(&mut self, pattern: &str) -> Result<()> {
        validate_date_format(pattern)?;
        self.options.date_format = pattern.to_owned();
        Ok(())
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            let _ = sink.sync();
        }
    }
}

fn ensure_directory(directory: &Path) -> Result<()> {
    if directory.exists() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DEFAULT_DIR_MODE);
    }

    builder
        .create(directory)
        .map_err(|source| LoggerError::CreateDirectory {
            path: directory.to_path_buf(),
            source,
        })
}

// `app.log` stays, `app` becomes `app.<extension>`, none gives `<prefix><date>.<extension>`.
pub(crate) fn resolve_file_path(
    directory: &Path,
    options: &LoggerOptions,
    today: NaiveDate,
) -> PathBuf {
    let name = match options.filename.as_deref().filter(|f| !f.is_empty()) {
        Some(filename) if has_log_extension(filename) => filename.to_owned(),
        Some(filename) => format!("{filename}.{}", options.extension),
        None => format!(
            "{}{}.{}",
            options.prefix,
            today.format("%Y-%m-%d"),
            options.extension
        ),
    };
    directory.join(name)
}

fn has_log_extension(filename: &str) -> bool {
    matches!(
        Path::new(filename).extension().and_then(|ext| ext.to_str()),
        Some("log" | "txt")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    // Remembers after which write each flush happened.
    #[derive(Clone, Default)]
    struct Recorder {
        writes: Arc<Mutex<usize>>,
        flushed_after: Arc<Mutex<Vec<usize>>>,
        bytes: Arc<Mutex<Vec<u8>>>,
    }

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            *self.writes.lock().unwrap() += 1;
            self.bytes.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            let writes = *self.writes.lock().unwrap();
            self.flushed_after.lock().unwrap().push(writes);
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn flushes_every_nth_write() {
        let recorder = Recorder::default();
        let options = LoggerOptions::default().with_flush_frequency(3);
        let mut log = FileLogger::with_writer(recorder.clone(), Level::Debug, options).unwrap();

        for i in 0..10 {
            log.write(&format!("line {i}\n")).unwrap();
        }

        assert_eq!(*recorder.flushed_after.lock().unwrap(), vec![3, 6, 9]);
    }

    #[test]
    fn zero_frequency_flushes_only_on_close() {
        let recorder = Recorder::default();
        let mut log =
            FileLogger::with_writer(recorder.clone(), Level::Debug, LoggerOptions::default())
                .unwrap();

        log.write("a\n").unwrap();
        log.write("b\n").unwrap();
        assert!(recorder.flushed_after.lock().unwrap().is_empty());

        log.close().unwrap();
        assert_eq!(*recorder.flushed_after.lock().unwrap(), vec![2]);
    }

    #[test]
    fn filtered_levels_leave_state_untouched() {
        let recorder = Recorder::default();
        let mut log =
            FileLogger::with_writer(recorder.clone(), Level::Warning, LoggerOptions::default())
                .unwrap();

        for level in [Level::Notice, Level::Info, Level::Debug] {
            log.log(level, "quiet", &Context::new()).unwrap();
        }

        assert_eq!(log.line_count(), 0);
        assert_eq!(log.last_line(), "");
        assert!(recorder.bytes.lock().unwrap().is_empty());
    }

    #[test]
    fn passing_levels_write_one_line_each() {
        let recorder = Recorder::default();
        let options = LoggerOptions::default().with_log_format("{level}: {message}");
        let mut log = FileLogger::with_writer(recorder.clone(), Level::Warning, options).unwrap();

        for (n, level) in [Level::Emergency, Level::Alert, Level::Critical, Level::Error, Level::Warning]
            .into_iter()
            .enumerate()
        {
            log.log(level, "loud", &Context::new()).unwrap();
            assert_eq!(log.line_count(), n as u64 + 1);
            assert_eq!(log.last_line(), format!("{}: loud", level.as_str().to_uppercase()));
        }
    }

    #[test]
    fn write_bypasses_threshold() {
        let recorder = Recorder::default();
        let mut log =
            FileLogger::with_writer(recorder.clone(), Level::Emergency, LoggerOptions::default())
                .unwrap();

        log.write("raw line  \n").unwrap();

        assert_eq!(log.line_count(), 1);
        assert_eq!(log.last_line(), "raw line");
        assert_eq!(recorder.bytes.lock().unwrap().as_slice(), b"raw line  \n");
    }

    #[test]
    fn unknown_level_name_is_rejected() {
        let mut log =
            FileLogger::with_writer(Recorder::default(), Level::Debug, LoggerOptions::default())
                .unwrap();

        let err = log.log_named("verbose", "nope", &Context::new()).unwrap_err();

        assert_eq!(err.kind(), crate::ErrorKind::InvalidLevel);
        assert_eq!(log.line_count(), 0);
    }

    #[test]
    fn log_named_accepts_known_levels() {
        let mut log =
            FileLogger::with_writer(Recorder::default(), Level::Debug, LoggerOptions::default())
                .unwrap();

        log.log_named("notice", "hello", &Context::new()).unwrap();
        assert!(log.last_line().ends_with("[notice] hello"));
    }

    #[test]
    fn write_failure_is_reported_and_not_counted() {
        let mut log =
            FileLogger::with_writer(Broken, Level::Debug, LoggerOptions::default()).unwrap();

        let err = log.error("disk full").unwrap_err();

        assert_eq!(err.kind(), crate::ErrorKind::Write);
        assert_eq!(log.line_count(), 0);
    }

    #[test]
    fn threshold_can_be_lowered_later() {
        let mut log =
            FileLogger::with_writer(Recorder::default(), Level::Error, LoggerOptions::default())
                .unwrap();

        log.info("hidden").unwrap();
        log.set_threshold(Level::Info);
        log.info("shown").unwrap();

        assert_eq!(log.line_count(), 1);
    }

    #[test]
    fn date_format_setter_validates() {
        let mut log =
            FileLogger::with_writer(Recorder::default(), Level::Debug, LoggerOptions::default())
                .unwrap();

        assert!(log.set_date_format("%H:%M").is_ok());
        assert_eq!(log.options().date_format, "%H:%M");
        assert!(log.set_date_format("%H %").is_err());
        assert_eq!(log.options().date_format, "%H:%M");
    }

    #[test]
    fn file_names() {
        let dir = Path::new("/var/log/app");
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let defaults = LoggerOptions::default();

        assert_eq!(
            resolve_file_path(dir, &defaults, day),
            dir.join("log_2024-03-05.txt")
        );
        assert_eq!(
            resolve_file_path(dir, &defaults.clone().with_filename("app.log"), day),
            dir.join("app.log")
        );
        assert_eq!(
            resolve_file_path(dir, &defaults.clone().with_filename("app.txt"), day),
            dir.join("app.txt")
        );
        assert_eq!(
            resolve_file_path(
                dir,
                &defaults.clone().with_filename("app").with_extension("txt"),
                day
            ),
            dir.join("app.txt")
        );
        assert_eq!(
            resolve_file_path(
                dir,
                &defaults.with_filename("app.json").with_extension("log"),
                day
            ),
            dir.join("app.json.log")
        );
    }
}
