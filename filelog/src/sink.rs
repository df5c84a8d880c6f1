use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{LoggerError, Result};

pub const STREAM_SCHEME: &str = "stream://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    // Kept verbatim, e.g. `stream://stdout`.
    Stream(String),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::File(path) => write!(f, "{}", path.display()),
            Destination::Stream(name) => f.write_str(name),
        }
    }
}

// ===== Sinks =====

pub(crate) enum Sink {
    File(File),
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    Writer(Box<dyn Write + Send>),
}

impl Sink {
    pub(crate) fn append(path: &Path) -> Result<Self> {
        let existed = match fs::metadata(path) {
            Ok(meta) if meta.permissions().readonly() => {
                return Err(LoggerError::NotWritable {
                    path: path.to_path_buf(),
                })
            }
            Ok(_) => true,
            Err(_) => false,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| {
                if existed && source.kind() == io::ErrorKind::PermissionDenied {
                    LoggerError::NotWritable {
                        path: path.to_path_buf(),
                    }
                } else {
                    LoggerError::Open {
                        destination: path.display().to_string(),
                        source,
                    }
                }
            })?;

        Ok(Sink::File(file))
    }

    pub(crate) fn stream(name: &str) -> Result<Self> {
        match name {
            "stdout" => Ok(Sink::Stdout(io::stdout())),
            "stderr" => Ok(Sink::Stderr(io::stderr())),
            other => Err(LoggerError::UnknownStream(other.to_owned())),
        }
    }

    // Files go all the way to the disk, streams and writers only drain their buffers.
    pub(crate) fn sync(&mut self) -> io::Result<()> {
        match self {
            Sink::File(file) => file.sync_data(),
            other => other.flush(),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(file) => file.write(buf),
            Sink::Stdout(out) => out.write(buf),
            Sink::Stderr(err) => err.write(buf),
            Sink::Writer(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(file) => file.flush(),
            Sink::Stdout(out) => out.flush(),
            Sink::Stderr(err) => err.flush(),
            Sink::Writer(writer) => writer.flush(),
        }
    }
}
