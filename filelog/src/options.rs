use serde::{Deserialize, Deserializer};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %-H:%M:%S%.6f";
pub const DEFAULT_PREFIX: &str = "log_";
pub const DEFAULT_EXTENSION: &str = "txt";

// Hosts keep these under camelCase keys; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerOptions {
    pub date_format: String,
    // `None` selects `[date] [level] message`.
    pub log_format: Option<String>,
    pub append_context: bool,
    // Sync every N successful writes; 0 leaves it to close.
    #[serde(deserialize_with = "flush_frequency")]
    pub flush_frequency: u32,
    pub filename: Option<String>,
    pub prefix: String,
    pub extension: String,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            log_format: None,
            append_context: true,
            flush_frequency: 0,
            filename: None,
            prefix: DEFAULT_PREFIX.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

impl LoggerOptions {
    #[must_use]
    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    #[must_use]
    pub fn with_log_format(mut self, template: impl Into<String>) -> Self {
        self.log_format = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_append_context(mut self, append: bool) -> Self {
        self.append_context = append;
        self
    }

    #[must_use]
    pub fn with_flush_frequency(mut self, every: u32) -> Self {
        self.flush_frequency = every;
        self
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

// Older configs write `false` for "never force a flush".
fn flush_frequency<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Frequency {
        Flag(bool),
        Every(u32),
    }

    Ok(match Frequency::deserialize(deserializer)? {
        Frequency::Flag(false) => 0,
        Frequency::Flag(true) => 1,
        Frequency::Every(n) => n,
    })
}
